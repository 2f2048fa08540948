//! typed-id-compiler
//!
//! This crate implements:
//!  1) Candidate discovery and annotation resolution over a `TypeGraph`,
//!  2) Member-presence analysis against hand-written declarations,
//!  3) Container reconstruction (namespaces and partial outer types),
//!  4) Core member and converter emission into a small C# document model,
//!  5) The generation pass (`Generator::execute`) writing `.g.cs` artifacts,
//!  6) Error types (`TypedIdError`) and diagnostics (`TID0001`).

pub mod error;
pub mod types;
pub mod utils;
pub mod kinds;
pub mod diagnostics;
pub mod sink;
pub mod registry;
pub mod resolver;
pub mod presence;
pub mod containers;
pub mod codedom;
pub mod writer;
pub mod members;
pub mod converters;
pub mod attribute;
pub mod generator;

pub use attribute::{attribute_source, ATTRIBUTE_ARTIFACT_NAME};
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSink, Severity};
pub use error::TypedIdError;
pub use generator::{artifact_name, GenerationSummary, Generator, GeneratorOptions};
pub use kinds::IdKind;
pub use sink::{ArtifactSink, ArtifactStore, CancellationToken};
