use log::{debug, warn};
use typed_id_schema::{AttributeArgument, AttributeData, TypeGraph};

use crate::{
    diagnostics::{Diagnostic, DiagnosticSink, UNSUPPORTED_TYPE},
    kinds::IdKind,
    types::{Candidate, Converter, Converters, Descriptor},
};

/// Short name of the annotation class.
pub const ATTRIBUTE_NAME: &str = "StronglyTypedId";

/// Constructor arity of the annotation: id type, four converter toggles and
/// the generated-code toggle.
pub const ARGUMENT_COUNT: usize = 6;

/// Converter toggled by constructor arguments 1 to 4.
pub const CONVERTER_ARGUMENTS: [Converter; 4] = [
    Converter::SystemTextJson,
    Converter::NewtonsoftJson,
    Converter::TypeConverter,
    Converter::MongoDbBson,
];

/// The annotation class lives in the global namespace; an attribute of the
/// same name in any other namespace is a different type.
pub fn is_annotation(attribute: &AttributeData) -> bool {
    let name = attribute.name.trim();
    let name = name.strip_prefix("global::").unwrap_or(name);
    let name = name.strip_suffix("Attribute").unwrap_or(name);
    name == ATTRIBUTE_NAME
}

/// A boolean argument. A missing argument takes the parameter default
/// (`true`); any other non-boolean constant disables the flag.
fn flag(argument: &AttributeArgument) -> bool {
    match argument {
        AttributeArgument::Null => true,
        other => other.as_bool().unwrap_or(false),
    }
}

/// Resolves one annotation of `candidate`. Returns `None` when the attribute
/// is not the annotation, has another arity, or names an unsupported type;
/// only the last case reports a diagnostic.
pub fn resolve_descriptor(
    graph: &TypeGraph,
    candidate: &Candidate<'_>,
    attribute: &AttributeData,
    diagnostics: &dyn DiagnosticSink,
) -> Option<Descriptor> {
    if !is_annotation(attribute) {
        return None;
    }

    let arguments = &attribute.arguments;
    if arguments.len() != ARGUMENT_COUNT {
        debug!(
            "{}: annotation has {} argument(s), expected {}; skipped",
            candidate.qualified_name,
            arguments.len(),
            ARGUMENT_COUNT
        );
        return None;
    }

    let id_type = match arguments[0].as_type() {
        Some(type_ref) => type_ref,
        None => {
            warn!("{}: first annotation argument is not a type; skipped", candidate.qualified_name);
            return None;
        }
    };

    let mut converters = Converters::none();
    for (argument, converter) in arguments[1..5].iter().zip(CONVERTER_ARGUMENTS) {
        converters.set(converter, flag(argument));
    }
    let mark_generated = flag(&arguments[5]);

    let location = candidate.location.clone().or_else(|| attribute.location.clone());
    let identity = graph.identity_of(id_type, Some(candidate.id));

    match IdKind::from_identity(&identity) {
        Some(kind) => {
            debug!("{}: underlying kind {:?}", candidate.qualified_name, kind);
            Some(Descriptor {
                kind,
                id_type: id_type.clone(),
                converters,
                mark_generated,
                location,
            })
        }
        None => {
            diagnostics.report(Diagnostic::create(&UNSUPPORTED_TYPE, location, &identity.display_name()));
            None
        }
    }
}

/// Resolves every annotation on `candidate`; each valid one yields its own
/// descriptor, in declaration order.
pub fn resolve_descriptors(
    graph: &TypeGraph,
    candidate: &Candidate<'_>,
    diagnostics: &dyn DiagnosticSink,
) -> Vec<Descriptor> {
    candidate
        .attributes
        .iter()
        .filter_map(|attribute| resolve_descriptor(graph, candidate, attribute, diagnostics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{diagnostics::DiagnosticBag, registry::collect_candidates};
    use typed_id_schema::{Location, SymbolKind};

    fn graph_with(arguments: &str) -> TypeGraph {
        TypeGraph::from_json(&format!(
            r#"{{ "symbols": [
                {{ "name": "Ns", "kind": "namespace" }},
                {{ "name": "OrderId", "kind": "type", "declaration": "struct", "containing": 0,
                   "location": {{ "file": "OrderId.cs", "line": 7, "column": 1 }},
                   "attributes": [ {{ "name": "StronglyTypedIdAttribute", "arguments": {} }} ] }}
            ] }}"#,
            arguments
        ))
        .unwrap()
    }

    fn resolve(graph: &TypeGraph) -> (Vec<Descriptor>, Vec<Diagnostic>) {
        let bag = DiagnosticBag::new();
        let candidates = collect_candidates(graph);
        let descriptors = resolve_descriptors(graph, &candidates[0], &bag);
        (descriptors, bag.into_vec())
    }

    #[test]
    fn test_resolves_kind_and_flags() {
        let graph = graph_with(r#"[ { "type": "System.Guid" }, true, false, true, false, false ]"#);
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(diagnostics.is_empty());
        assert_eq!(descriptors.len(), 1);
        let descriptor = &descriptors[0];
        assert_eq!(descriptor.kind, IdKind::Guid);
        assert!(descriptor.converters.system_text_json);
        assert!(!descriptor.converters.newtonsoft_json);
        assert!(descriptor.converters.type_converter);
        assert!(!descriptor.converters.mongodb_bson);
        assert!(!descriptor.mark_generated);
    }

    #[test]
    fn test_missing_flags_take_the_default() {
        let graph = graph_with(r#"[ { "type": "long" }, null, null, null, null, null ]"#);
        let (descriptors, _) = resolve(&graph);
        assert_eq!(descriptors[0].converters, Converters::all());
        assert!(descriptors[0].mark_generated);
    }

    #[test]
    fn test_non_boolean_constants_disable_flags() {
        let graph = graph_with(r#"[ { "type": "long" }, "x", 0, null, 1, "no" ]"#);
        let (descriptors, _) = resolve(&graph);
        let converters = &descriptors[0].converters;
        assert!(!converters.system_text_json);
        assert!(!converters.newtonsoft_json);
        assert!(converters.type_converter);
        assert!(!converters.mongodb_bson);
        assert!(!descriptors[0].mark_generated);
    }

    #[test]
    fn test_unsupported_type_reports_once_at_candidate_location() {
        let mut graph = graph_with(r#"[ { "type": "object" }, true, true, true, true, true ]"#);
        if let SymbolKind::Type(decl) = &mut graph.symbols[1].kind {
            decl.attributes[0].location = Some(Location { file: "OrderId.cs".into(), line: 6, column: 2 });
        }
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].id, "TID0001");
        assert_eq!(diagnostics[0].message, "The type 'object' is not supported.");
        assert_eq!(
            diagnostics[0].location,
            Some(Location { file: "OrderId.cs".into(), line: 7, column: 1 })
        );
    }

    #[test]
    fn test_nullable_primitive_is_unsupported() {
        let graph = graph_with(r#"[ { "type": "int?" }, true, true, true, true, true ]"#);
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert_eq!(diagnostics[0].message, "The type 'int?' is not supported.");
    }

    #[test]
    fn test_wrong_arity_is_silently_skipped() {
        let graph = graph_with(r#"[ { "type": "int" }, true, true, true, true ]"#);
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_first_argument_must_be_a_type() {
        let graph = graph_with(r#"[ "int", true, true, true, true, true ]"#);
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_other_attributes_are_ignored() {
        let graph = TypeGraph::from_json(
            r#"{ "symbols": [ { "name": "A", "kind": "type", "declaration": "class",
                 "attributes": [ { "name": "Serializable" },
                                 { "name": "Other.StronglyTypedIdentifier", "arguments": [ { "type": "int" }, true, true, true, true, true ] } ] } ] }"#,
        )
        .unwrap();
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_only_the_global_namespace_annotation_counts() {
        let mk = |name: &str| AttributeData { name: name.into(), arguments: vec![], location: None };
        assert!(is_annotation(&mk("StronglyTypedId")));
        assert!(is_annotation(&mk("StronglyTypedIdAttribute")));
        assert!(is_annotation(&mk("global::StronglyTypedIdAttribute")));
        assert!(!is_annotation(&mk("global::Acme.StronglyTypedId")));

        let graph = TypeGraph::from_json(
            r#"{ "symbols": [ { "name": "A", "kind": "type", "declaration": "class",
                 "attributes": [ { "name": "ThirdParty.Ids.StronglyTypedIdAttribute",
                                   "arguments": [ { "type": "int" }, true, true, true, true, true ] } ] } ] }"#,
        )
        .unwrap();
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_id_type_may_be_nested_in_the_candidate() {
        let graph = TypeGraph::from_json(
            r#"{ "symbols": [
                { "name": "Ns", "kind": "namespace" },
                { "name": "OrderId", "kind": "type", "declaration": "struct", "containing": 0,
                  "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "Guid" }, true, true, true, true, true ] } ] },
                { "name": "Guid", "kind": "type", "declaration": "struct", "containing": 1 }
            ] }"#,
        )
        .unwrap();
        let (descriptors, diagnostics) = resolve(&graph);
        assert!(descriptors.is_empty());
        assert_eq!(diagnostics[0].message, "The type 'Ns.OrderId.Guid' is not supported.");
    }
}
