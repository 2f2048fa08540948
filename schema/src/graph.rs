use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    attribute::AttributeData,
    error::SchemaError,
    member::MemberDecl,
    type_ref::{TypeIdentity, TypeRef},
};

/// Index of a symbol inside its [TypeGraph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub usize);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source position of a declaration or an attribute application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub file:   String,
    pub line:   usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({},{})", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    Class,
    Record,
    Interface,
    Enum,
}

impl TypeKind {
    pub fn is_value_type(self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn is_reference_type(self) -> bool {
        !self.is_value_type()
    }

    /// The C# keyword introducing a declaration of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Struct    => "struct",
            TypeKind::Class     => "class",
            TypeKind::Record    => "record",
            TypeKind::Interface => "interface",
            TypeKind::Enum      => "enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub declaration: TypeKind,
    #[serde(default)]
    pub sealed:      bool,
    #[serde(default)]
    pub attributes:  Vec<AttributeData>,
    #[serde(default)]
    pub members:     Vec<MemberDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolKind {
    Namespace,
    /// A method body; types declared inside it are local types.
    Method,
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub name:       String,
    #[serde(flatten)]
    pub kind:       SymbolKind,
    /// `None` means the global namespace.
    #[serde(default)]
    pub containing: Option<SymbolId>,
    #[serde(default)]
    pub location:   Option<Location>,
}

impl Symbol {
    pub fn as_type(&self) -> Option<&TypeDecl> {
        match &self.kind {
            SymbolKind::Type(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self.kind, SymbolKind::Namespace)
    }
}

/// Immutable symbol table. Symbols refer to their container by index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeGraph {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

impl TypeGraph {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        TypeGraph { symbols }
    }

    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    pub fn symbol(&self, id: SymbolId) -> Result<&Symbol, SchemaError> {
        self.get(id).ok_or(SchemaError::UnknownSymbol(id.0))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols.iter().enumerate().map(|(i, s)| (SymbolId(i), s))
    }

    /// Type declarations only.
    pub fn types(&self) -> impl Iterator<Item = (SymbolId, &Symbol, &TypeDecl)> {
        self.iter()
            .filter_map(|(id, s)| s.as_type().map(|decl| (id, s, decl)))
    }

    /// Containing symbols of `id`, innermost first. Stops at the global
    /// namespace, at a dangling index, or after visiting every symbol once
    /// (which only happens for a cyclic graph the verifier would reject).
    pub fn ancestors(&self, id: SymbolId) -> Vec<SymbolId> {
        let mut chain   = Vec::new();
        let mut current = self.get(id).and_then(|s| s.containing);
        while let Some(parent) = current {
            if chain.len() > self.symbols.len() {
                break;
            }
            chain.push(parent);
            current = self.get(parent).and_then(|s| s.containing);
        }
        chain
    }

    /// Dotted name of `id` including every enclosing namespace and type.
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let mut parts: Vec<&str> = self
            .ancestors(id)
            .iter()
            .rev()
            .filter_map(|&a| self.get(a))
            .map(|s| s.name.as_str())
            .collect();
        if let Some(symbol) = self.get(id) {
            parts.push(&symbol.name);
        }
        parts.join(".")
    }

    /// Finds a type named `name` declared directly in `container`
    /// (`None` = global namespace).
    pub fn find_type_in(&self, container: Option<SymbolId>, name: &str) -> Option<SymbolId> {
        self.iter()
            .find(|(_, s)| s.containing == container && s.name == name && s.as_type().is_some())
            .map(|(id, _)| id)
    }

    /// Binds a simple type name the way name lookup does from inside `scope`:
    /// nested types of the scope first, then each enclosing level outward,
    /// finally the global namespace.
    pub fn lookup_type(&self, name: &str, scope: Option<SymbolId>) -> Option<SymbolId> {
        if let Some(scope) = scope {
            if let Some(found) = self.find_type_in(Some(scope), name) {
                return Some(found);
            }
            for level in self.ancestors(scope) {
                if let Some(found) = self.find_type_in(Some(level), name) {
                    return Some(found);
                }
            }
        }
        self.find_type_in(None, name)
    }

    /// Binds a dotted type name as written inside `scope`: the name is tried
    /// below the scope and each enclosing level, innermost first, and as a
    /// fully qualified name last.
    pub fn lookup_dotted(&self, dotted: &str, scope: Option<SymbolId>) -> Option<SymbolId> {
        let levels = scope
            .into_iter()
            .chain(scope.map(|s| self.ancestors(s)).unwrap_or_default());
        for level in levels {
            let prefixed = format!("{}.{}", self.qualified_name(level), dotted);
            if let Some(found) = self.find_qualified(&prefixed) {
                return Some(found);
            }
        }
        self.find_qualified(dotted)
    }

    /// Finds a declared type by its qualified name.
    pub fn find_qualified(&self, qualified: &str) -> Option<SymbolId> {
        self.types()
            .map(|(id, _, _)| id)
            .find(|&id| self.qualified_name(id) == qualified)
    }

    /// Resolves a type reference, as written inside `scope`, to its identity.
    pub fn identity_of(&self, type_ref: &TypeRef, scope: Option<SymbolId>) -> TypeIdentity {
        TypeIdentity::resolve(type_ref, |name| {
            let found = if name.contains('.') {
                self.lookup_dotted(name, scope)
            } else {
                self.lookup_type(name, scope)
            };
            found.map(|id| self.qualified_name(id))
        }, |qualified| self.is_declared_value_type(qualified))
    }

    /// Identity of the declared type `id` itself.
    pub fn identity_of_symbol(&self, id: SymbolId) -> TypeIdentity {
        TypeIdentity::from_metadata_name(&self.qualified_name(id))
    }

    fn is_declared_value_type(&self, qualified: &str) -> bool {
        self.find_qualified(qualified)
            .and_then(|id| self.get(id))
            .and_then(Symbol::as_type)
            .map(|decl| decl.declaration.is_value_type())
            .unwrap_or(false)
    }
}
