use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use typed_id_schema::{verify_graph, TypeGraph};

use crate::{
    attribute::{attribute_source, ATTRIBUTE_ARTIFACT_NAME},
    codedom::{CompilationUnit, TypeDeclaration},
    containers::{container_chain, wrap},
    converters::{default_emitters, emit_converters, ConverterEmitter},
    diagnostics::DiagnosticSink,
    error::TypedIdError,
    members::{emit_core_members, EmitContext},
    presence::analyze_members,
    registry::collect_candidates,
    resolver::resolve_descriptors,
    sink::{ArtifactSink, CancellationToken},
    types::{Candidate, ContainerChain, Descriptor},
    utils::quote,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Process candidates on the rayon thread pool.
    pub parallel:                  bool,
    pub tool_name:                 String,
    pub tool_version:              String,
    /// Register `StronglyTypedIdAttribute.g.cs` during post-initialization.
    pub emit_attribute_definition: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            parallel:                  true,
            tool_name:                 "typedid".to_string(),
            tool_version:              env!("CARGO_PKG_VERSION").to_string(),
            emit_attribute_definition: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub candidates: usize,
    pub artifacts:  Vec<String>,
}

/// `{Qualified}.g.cs` for the first annotation of a type, then
/// `{Qualified}.2.g.cs`, `{Qualified}.3.g.cs`, ...
pub fn artifact_name(qualified_name: &str, index: usize) -> String {
    if index == 0 {
        format!("{}.g.cs", qualified_name)
    } else {
        format!("{}.{}.g.cs", qualified_name, index + 1)
    }
}

pub struct Generator {
    options:  GeneratorOptions,
    emitters: Vec<Box<dyn ConverterEmitter>>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(GeneratorOptions::default())
    }
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Generator::with_emitters(options, default_emitters())
    }

    pub fn with_emitters(options: GeneratorOptions, emitters: Vec<Box<dyn ConverterEmitter>>) -> Self {
        Generator { options, emitters }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Registers the annotation definition.
    pub fn post_initialize(&self, artifacts: &dyn ArtifactSink) -> Result<(), TypedIdError> {
        if self.options.emit_attribute_definition {
            artifacts.add_source(
                ATTRIBUTE_ARTIFACT_NAME,
                attribute_source(&self.options.tool_name, &self.options.tool_version),
            )?;
        }
        Ok(())
    }

    /// Runs one generation pass over `graph`.
    pub fn execute(
        &self,
        graph: &TypeGraph,
        diagnostics: &dyn DiagnosticSink,
        artifacts: &dyn ArtifactSink,
        cancellation: &CancellationToken,
    ) -> Result<GenerationSummary, TypedIdError> {
        verify_graph(graph)?;
        let candidates = collect_candidates(graph);

        let generate = |candidate: &Candidate<'_>| {
            self.generate_candidate(graph, candidate, diagnostics, artifacts, cancellation)
        };
        let names: Vec<Vec<String>> = if self.options.parallel {
            candidates.par_iter().map(generate).collect::<Result<_, _>>()?
        } else {
            candidates.iter().map(generate).collect::<Result<_, _>>()?
        };

        let mut summary = GenerationSummary {
            candidates: candidates.len(),
            artifacts:  names.into_iter().flatten().collect(),
        };
        summary.artifacts.sort();
        info!(
            "generated {} artifact(s) from {} candidate(s)",
            summary.artifacts.len(),
            summary.candidates
        );
        Ok(summary)
    }

    fn generate_candidate(
        &self,
        graph: &TypeGraph,
        candidate: &Candidate<'_>,
        diagnostics: &dyn DiagnosticSink,
        artifacts: &dyn ArtifactSink,
        cancellation: &CancellationToken,
    ) -> Result<Vec<String>, TypedIdError> {
        cancellation.check()?;

        let descriptors = resolve_descriptors(graph, candidate, diagnostics);
        if descriptors.is_empty() {
            return Ok(Vec::new());
        }
        let chain = container_chain(graph, candidate)?;

        let sources: Vec<(String, String)> = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                (
                    artifact_name(&candidate.qualified_name, index),
                    self.render(graph, candidate, descriptor, &chain),
                )
            })
            .collect();

        cancellation.check()?;
        let mut names = Vec::with_capacity(sources.len());
        for (name, text) in sources {
            debug!("{}: adding {}", candidate.qualified_name, name);
            artifacts.add_source(&name, text)?;
            names.push(name);
        }
        Ok(names)
    }

    fn generated_code_attribute(&self) -> String {
        format!(
            "global::System.CodeDom.Compiler.GeneratedCode({}, {})",
            quote(&self.options.tool_name),
            quote(&self.options.tool_version)
        )
    }

    fn header(&self) -> Vec<String> {
        vec![
            "<auto-generated>".to_string(),
            format!("    This code was generated by {} {}.", self.options.tool_name, self.options.tool_version),
            "    Changes to this file may cause incorrect behavior and will be lost if the code is regenerated.".to_string(),
            "</auto-generated>".to_string(),
        ]
    }

    fn render(&self, graph: &TypeGraph, candidate: &Candidate<'_>, descriptor: &Descriptor, chain: &ContainerChain) -> String {
        let context = EmitContext::new(candidate, descriptor);
        let existing = analyze_members(graph, candidate, descriptor.kind);

        let mut wrapper = TypeDeclaration::partial(candidate.kind, &candidate.name);
        emit_core_members(&context, &existing, &mut wrapper);
        emit_converters(&self.emitters, &context, &mut wrapper);

        let mut unit = wrap(chain, wrapper, CompilationUnit::new().with_header(self.header()));
        if descriptor.mark_generated {
            unit.mark_generated(&self.generated_code_attribute());
        }
        unit.render()
    }
}
