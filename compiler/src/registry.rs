use log::debug;
use typed_id_schema::{TypeGraph, TypeKind};

use crate::types::Candidate;

/// Declaration kinds that can become strongly-typed ids.
pub fn is_candidate_kind(kind: TypeKind) -> bool {
    matches!(kind, TypeKind::Struct | TypeKind::Class | TypeKind::Record)
}

/// Collects every struct, class and record declaration of the graph, in
/// symbol order. Whether a candidate is annotated is decided later.
pub fn collect_candidates(graph: &TypeGraph) -> Vec<Candidate<'_>> {
    let candidates: Vec<Candidate<'_>> = graph
        .types()
        .filter(|(_, _, decl)| is_candidate_kind(decl.declaration))
        .map(|(id, symbol, decl)| Candidate {
            id,
            name:           symbol.name.clone(),
            qualified_name: graph.qualified_name(id),
            kind:           decl.declaration,
            is_sealed:      decl.sealed,
            attributes:     &decl.attributes,
            members:        &decl.members,
            location:       symbol.location.clone(),
        })
        .collect();
    debug!("collected {} candidate declaration(s)", candidates.len());
    candidates
}
