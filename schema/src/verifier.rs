use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::SchemaError,
    graph::{SymbolId, SymbolKind, TypeGraph},
    member::MemberKind,
};

/// A C# identifier: letters (any script) or `_`, followed by letters, digits,
/// connectors, combining marks and formatting characters.
const IDENTIFIER_PATTERN: &str = r"@?[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Nd}\p{Pc}\p{Mn}\p{Mc}\p{Cf}]*";

lazy_static! {
    static ref IDENTIFIER:        Regex = Regex::new(&format!(r"^{}$", IDENTIFIER_PATTERN)).unwrap();
    static ref DOTTED_IDENTIFIER: Regex =
        Regex::new(&format!(r"^(global::)?{0}(\.{0})*$", IDENTIFIER_PATTERN)).unwrap();
    static ref OPERATOR_TOKEN:    Regex = Regex::new(r"^(==|!=|<=|>=|<|>|\+|-|\*|/|%|!|~|\+\+|--|true|false|implicit|explicit)$").unwrap();
}

fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Returns `Ok(())` if the graph is well formed, or
/// `Err(SchemaError::VerifierError(_))` describing the first problem found.
pub fn verify_graph(graph: &TypeGraph) -> Result<(), SchemaError> {
    let count = graph.symbols.len();

    // 1) Names and container links
    for (id, symbol) in graph.iter() {
        let valid_name = match symbol.kind {
            SymbolKind::Namespace => DOTTED_IDENTIFIER.is_match(&symbol.name) && !symbol.name.starts_with("global::"),
            _ => IDENTIFIER.is_match(&symbol.name),
        };
        if !valid_name {
            return Err(SchemaError::VerifierError(format!(
                "The symbol name {} is not a valid identifier",
                quote(&symbol.name)
            )));
        }

        if let Some(parent) = symbol.containing {
            if parent.0 >= count {
                return Err(SchemaError::VerifierError(format!(
                    "The symbol {} refers to missing container {}",
                    quote(&symbol.name),
                    parent
                )));
            }
            if parent == id {
                return Err(SchemaError::VerifierError(format!(
                    "The symbol {} contains itself",
                    quote(&symbol.name)
                )));
            }
        }

        if let SymbolKind::Type(decl) = &symbol.kind {
            for attribute in &decl.attributes {
                if !DOTTED_IDENTIFIER.is_match(attribute.name.trim()) {
                    return Err(SchemaError::VerifierError(format!(
                        "The attribute name {} on {} is not a valid name",
                        quote(&attribute.name),
                        quote(&symbol.name)
                    )));
                }
            }
            for member in &decl.members {
                let valid_member = match member.kind {
                    MemberKind::Constructor => true,
                    MemberKind::Operator    => OPERATOR_TOKEN.is_match(&member.name),
                    _                       => IDENTIFIER.is_match(&member.name),
                };
                if !valid_member {
                    return Err(SchemaError::VerifierError(format!(
                        "The member name {} in {} is not valid",
                        quote(&member.name),
                        quote(&symbol.name)
                    )));
                }
            }
        }
    }

    // 2) Container chains must terminate
    let mut state: HashMap<SymbolId, u8> = HashMap::new();
    fn check_cycle(
        id: SymbolId,
        graph: &TypeGraph,
        state: &mut HashMap<SymbolId, u8>,
    ) -> Result<(), SchemaError> {
        match state.get(&id) {
            Some(1) => {
                return Err(SchemaError::VerifierError(format!(
                    "The containing chain of {} is cyclic",
                    quote(&graph.symbols[id.0].name)
                )));
            }
            Some(_) => return Ok(()),
            None => {}
        }
        state.insert(id, 1);
        if let Some(parent) = graph.symbols[id.0].containing {
            check_cycle(parent, graph, state)?;
        }
        state.insert(id, 2);
        Ok(())
    }

    for (id, _) in graph.iter() {
        check_cycle(id, graph, &mut state)?;
    }

    // 3) A container declares each type name once
    let mut seen: HashMap<(Option<SymbolId>, &str), SymbolId> = HashMap::new();
    for (id, symbol) in graph.iter() {
        if symbol.as_type().is_none() {
            continue;
        }
        if seen.insert((symbol.containing, symbol.name.as_str()), id).is_some() {
            return Err(SchemaError::VerifierError(format!(
                "The type {} is defined twice",
                quote(&graph.qualified_name(id))
            )));
        }
    }

    Ok(())
}
