use std::collections::BTreeSet;

use serde::Serialize;
use typed_id_schema::{AttributeData, Location, MemberDecl, SymbolId, TypeKind, TypeRef};

use crate::kinds::IdKind;

/// A struct, class or record declaration that may carry an annotation.
#[derive(Debug, Clone)]
pub struct Candidate<'g> {
    pub id:             SymbolId,
    pub name:           String,
    pub qualified_name: String,
    pub kind:           TypeKind,
    pub is_sealed:      bool,
    pub attributes:     &'g [AttributeData],
    pub members:        &'g [MemberDecl],
    pub location:       Option<Location>,
}

impl<'g> Candidate<'g> {
    pub fn is_reference_type(&self) -> bool {
        self.kind.is_reference_type()
    }
}

/// One serialization or conversion framework an adapter can be emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Converter {
    SystemTextJson,
    NewtonsoftJson,
    TypeConverter,
    MongoDbBson,
}

/// Requested converters, one independent toggle each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Converters {
    pub system_text_json: bool,
    pub newtonsoft_json:  bool,
    pub type_converter:   bool,
    pub mongodb_bson:     bool,
}

impl Default for Converters {
    fn default() -> Self {
        Converters::all()
    }
}

impl Converters {
    pub fn all() -> Self {
        Converters {
            system_text_json: true,
            newtonsoft_json:  true,
            type_converter:   true,
            mongodb_bson:     true,
        }
    }

    pub fn none() -> Self {
        Converters {
            system_text_json: false,
            newtonsoft_json:  false,
            type_converter:   false,
            mongodb_bson:     false,
        }
    }

    pub fn contains(&self, converter: Converter) -> bool {
        match converter {
            Converter::SystemTextJson => self.system_text_json,
            Converter::NewtonsoftJson => self.newtonsoft_json,
            Converter::TypeConverter  => self.type_converter,
            Converter::MongoDbBson    => self.mongodb_bson,
        }
    }

    pub fn set(&mut self, converter: Converter, enabled: bool) {
        match converter {
            Converter::SystemTextJson => self.system_text_json = enabled,
            Converter::NewtonsoftJson => self.newtonsoft_json = enabled,
            Converter::TypeConverter  => self.type_converter = enabled,
            Converter::MongoDbBson    => self.mongodb_bson = enabled,
        }
    }
}

/// Resolved configuration of one annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor {
    pub kind:           IdKind,
    pub id_type:        TypeRef,
    pub converters:     Converters,
    pub mark_generated: bool,
    pub location:       Option<Location>,
}

/// The members the core emitter knows how to generate, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum GeneratableMember {
    Field,
    Constructor,
    Value,
    ValueAsString,
    ToString,
    GetHashCode,
    EqualsObject,
    EqualsTyped,
    EqualityOperator,
    InequalityOperator,
    TryParse,
    Parse,
}

impl GeneratableMember {
    pub const ALL: [GeneratableMember; 12] = [
        GeneratableMember::Field,
        GeneratableMember::Constructor,
        GeneratableMember::Value,
        GeneratableMember::ValueAsString,
        GeneratableMember::ToString,
        GeneratableMember::GetHashCode,
        GeneratableMember::EqualsObject,
        GeneratableMember::EqualsTyped,
        GeneratableMember::EqualityOperator,
        GeneratableMember::InequalityOperator,
        GeneratableMember::TryParse,
        GeneratableMember::Parse,
    ];
}

/// Members already declared for a candidate, whether hand-written or
/// synthesized by the compiler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExistingMembers(BTreeSet<GeneratableMember>);

impl ExistingMembers {
    pub fn insert(&mut self, member: GeneratableMember) {
        self.0.insert(member);
    }

    pub fn contains(&self, member: GeneratableMember) -> bool {
        self.0.contains(&member)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members that still have to be generated, in emission order.
    pub fn missing(&self) -> impl Iterator<Item = GeneratableMember> + '_ {
        GeneratableMember::ALL.iter().copied().filter(move |m| !self.contains(*m))
    }
}

impl FromIterator<GeneratableMember> for ExistingMembers {
    fn from_iter<I: IntoIterator<Item = GeneratableMember>>(iter: I) -> Self {
        ExistingMembers(iter.into_iter().collect())
    }
}

/// One level of nesting around a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerNode {
    Namespace(String),
    Type { kind: TypeKind, name: String },
}

/// Containers of a candidate, outermost first. At most one namespace, and
/// only in first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerChain(pub Vec<ContainerNode>);

impl ContainerChain {
    pub fn namespace(&self) -> Option<&str> {
        match self.0.first() {
            Some(ContainerNode::Namespace(name)) => Some(name),
            _ => None,
        }
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeKind, &str)> {
        self.0.iter().filter_map(|node| match node {
            ContainerNode::Type { kind, name } => Some((*kind, name.as_str())),
            ContainerNode::Namespace(_) => None,
        })
    }
}
