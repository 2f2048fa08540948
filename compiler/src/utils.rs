use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    static ref CSHARP_KEYWORDS: HashSet<&'static str> = [
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch",
        "char", "checked", "class", "const", "continue", "decimal", "default",
        "delegate", "do", "double", "else", "enum", "event", "explicit",
        "extern", "false", "finally", "fixed", "float", "for", "foreach",
        "goto", "if", "implicit", "in", "int", "interface", "internal", "is",
        "lock", "long", "namespace", "new", "null", "object", "operator",
        "out", "override", "params", "private", "protected", "public",
        "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof",
        "stackalloc", "static", "string", "struct", "switch", "this", "throw",
        "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe",
        "ushort", "using", "virtual", "void", "volatile", "while",
    ]
    .into_iter()
    .collect();
}

/// A C# string literal. JSON string escaping is a subset of C#'s.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

pub fn is_keyword(identifier: &str) -> bool {
    CSHARP_KEYWORDS.contains(identifier)
}

/// Escapes C# reserved keywords used as identifiers by prefixing `@`.
pub fn escape_identifier(identifier: &str) -> String {
    if is_keyword(identifier) {
        format!("@{}", identifier)
    } else {
        identifier.to_string()
    }
}

/// Escapes every segment of a dotted namespace path.
pub fn escape_namespace(path: &str) -> String {
    path.split('.').map(escape_identifier).collect::<Vec<_>>().join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("typedid"), "\"typedid\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("event"), "@event");
        assert_eq!(escape_identifier("OrderId"), "OrderId");
        assert_eq!(escape_identifier("value"), "value");
        assert_eq!(escape_namespace("Contoso.namespace.Orders"), "Contoso.@namespace.Orders");
    }
}
