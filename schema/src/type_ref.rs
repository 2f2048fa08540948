use std::{collections::HashMap, fmt};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// C# keyword aliases and the metadata name they denote.
    static ref KEYWORD_ALIASES: HashMap<&'static str, &'static str> = [
        ("bool",    "System.Boolean"),
        ("byte",    "System.Byte"),
        ("sbyte",   "System.SByte"),
        ("short",   "System.Int16"),
        ("ushort",  "System.UInt16"),
        ("int",     "System.Int32"),
        ("uint",    "System.UInt32"),
        ("long",    "System.Int64"),
        ("ulong",   "System.UInt64"),
        ("nint",    "System.IntPtr"),
        ("nuint",   "System.UIntPtr"),
        ("float",   "System.Single"),
        ("double",  "System.Double"),
        ("decimal", "System.Decimal"),
        ("char",    "System.Char"),
        ("string",  "System.String"),
        ("object",  "System.Object"),
        ("void",    "System.Void"),
    ]
    .into_iter()
    .collect();
}

/// Well-known `System` value types. Also bound from their simple name, as if
/// `using System;` were in effect.
pub const WELL_KNOWN_VALUE_TYPES: [&str; 20] = [
    "System.Boolean", "System.Byte", "System.SByte", "System.Int16", "System.UInt16",
    "System.Int32", "System.UInt32", "System.Int64", "System.UInt64", "System.IntPtr",
    "System.UIntPtr", "System.Single", "System.Double", "System.Decimal", "System.Char",
    "System.DateTime", "System.DateTimeOffset", "System.TimeSpan", "System.Guid", "System.Half",
];

pub const WELL_KNOWN_REFERENCE_TYPES: [&str; 3] = ["System.String", "System.Object", "System.Type"];

/// A type as written in source, e.g. `int`, `string?`, `OrderId`,
/// `global::System.Guid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(pub String);

impl TypeRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeRef {
    fn from(text: &str) -> Self {
        TypeRef(text.to_string())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The bound identity of a type: two references denote the same type exactly
/// when their identities are equal. Nullable reference annotations are not
/// part of the identity; nullable value types are `System.Nullable<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    pub fn from_metadata_name(name: &str) -> Self {
        TypeIdentity(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_nullable_value_type(&self) -> bool {
        self.0.starts_with("System.Nullable<")
    }

    /// Display name as a C# programmer writes it: keyword aliases where one
    /// exists, the metadata name otherwise.
    pub fn display_name(&self) -> String {
        if let Some(inner) = self
            .0
            .strip_prefix("System.Nullable<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return format!("{}?", TypeIdentity::from_metadata_name(inner).display_name());
        }
        KEYWORD_ALIASES
            .iter()
            .find(|(_, metadata)| **metadata == self.0)
            .map(|(keyword, _)| keyword.to_string())
            .unwrap_or_else(|| self.0.clone())
    }

    /// Binds `type_ref`. `lookup` resolves a simple or partially qualified
    /// name against the declared types in scope and returns its qualified
    /// name; `is_declared_value_type` tells whether a qualified declared type
    /// is a struct or enum. A `global::` dotted name is taken as written.
    pub fn resolve(
        type_ref: &TypeRef,
        lookup: impl Fn(&str) -> Option<String>,
        is_declared_value_type: impl Fn(&str) -> bool,
    ) -> TypeIdentity {
        let text = type_ref.as_str().trim();
        let (text, global) = match text.strip_prefix("global::") {
            Some(rest) => (rest, true),
            None       => (text, false),
        };
        let (base, nullable) = match text.strip_suffix('?') {
            Some(base) => (base.trim_end(), true),
            None       => (text, false),
        };

        let metadata = if let Some(alias) = KEYWORD_ALIASES.get(base) {
            alias.to_string()
        } else if base.contains('.') {
            let relative = if global { None } else { lookup(base) };
            relative.unwrap_or_else(|| base.to_string())
        } else if let Some(qualified) = lookup(base) {
            qualified
        } else {
            let system = format!("System.{}", base);
            if WELL_KNOWN_VALUE_TYPES.contains(&system.as_str())
                || WELL_KNOWN_REFERENCE_TYPES.contains(&system.as_str())
            {
                system
            } else {
                base.to_string()
            }
        };

        let is_value_type = WELL_KNOWN_VALUE_TYPES.contains(&metadata.as_str())
            || is_declared_value_type(&metadata);
        if nullable && is_value_type {
            TypeIdentity(format!("System.Nullable<{}>", metadata))
        } else {
            TypeIdentity(metadata)
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
