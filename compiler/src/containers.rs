use typed_id_schema::{SymbolKind, TypeGraph, TypeKind};

use crate::{
    codedom::{CompilationUnit, NamespaceDeclaration, TypeDeclaration, TypeItem},
    error::TypedIdError,
    types::{Candidate, ContainerChain, ContainerNode},
};

/// Walks the containing symbols of `candidate` outward and returns the
/// nesting to reproduce, outermost first. Nested namespaces collapse into a
/// single dotted namespace; the global namespace yields none.
pub fn container_chain(graph: &TypeGraph, candidate: &Candidate<'_>) -> Result<ContainerChain, TypedIdError> {
    let malformed = |symbol: &str, reason: &str| TypedIdError::MalformedNesting {
        candidate: candidate.qualified_name.clone(),
        symbol:    symbol.to_string(),
        reason:    reason.to_string(),
    };

    let mut types: Vec<ContainerNode> = Vec::new();
    let mut namespace: Vec<&str> = Vec::new();

    for ancestor in graph.ancestors(candidate.id) {
        let symbol = graph.symbol(ancestor)?;
        match &symbol.kind {
            SymbolKind::Namespace => namespace.push(&symbol.name),
            SymbolKind::Type(decl) => {
                if !namespace.is_empty() {
                    return Err(malformed(&symbol.name, "a namespace cannot be declared inside a type"));
                }
                if decl.declaration == TypeKind::Enum {
                    return Err(malformed(&symbol.name, "an enum cannot contain types"));
                }
                types.push(ContainerNode::Type {
                    kind: decl.declaration,
                    name: symbol.name.clone(),
                });
            }
            SymbolKind::Method => {
                return Err(malformed(&symbol.name, "local types cannot be extended with partial declarations"));
            }
        }
    }

    let mut chain = Vec::with_capacity(types.len() + 1);
    if !namespace.is_empty() {
        namespace.reverse();
        chain.push(ContainerNode::Namespace(namespace.join(".")));
    }
    types.reverse();
    chain.extend(types);
    Ok(ContainerChain(chain))
}

/// Wraps `inner` into the partial nesting described by `chain` and adds the
/// result to `unit`.
pub fn wrap(chain: &ContainerChain, inner: TypeDeclaration, mut unit: CompilationUnit) -> CompilationUnit {
    fn nest(nodes: &[ContainerNode], inner: TypeDeclaration) -> TypeItem {
        match nodes.split_first() {
            None => TypeItem::Type(inner),
            Some((node, rest)) => {
                let mut parent = match node {
                    ContainerNode::Namespace(name)   => TypeItem::Namespace(NamespaceDeclaration::new(name)),
                    ContainerNode::Type { kind, name } => TypeItem::Type(TypeDeclaration::partial(*kind, name)),
                };
                parent.append(nest(rest, inner));
                parent
            }
        }
    }

    unit.add_item(nest(&chain.0, inner));
    unit
}
