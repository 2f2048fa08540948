use serde::{Deserialize, Serialize};

use crate::type_ref::TypeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
    /// User-defined operator; `name` holds the operator token (`==`, `!=`, ...).
    Operator,
}

/// A hand-written member of a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name:        String,
    pub kind:        MemberKind,
    #[serde(default, rename = "static")]
    pub is_static:   bool,
    #[serde(default)]
    pub parameters:  Vec<TypeRef>,
    /// Return type of methods and operators, declared type of fields and
    /// properties. Absent for constructors.
    #[serde(default, alias = "type")]
    pub return_type: Option<TypeRef>,
}

impl MemberDecl {
    pub fn new(name: &str, kind: MemberKind) -> Self {
        MemberDecl {
            name:        name.to_string(),
            kind,
            is_static:   false,
            parameters:  Vec::new(),
            return_type: None,
        }
    }

    pub fn method(name: &str, parameters: &[&str], return_type: &str) -> Self {
        MemberDecl {
            parameters:  parameters.iter().map(|&p| TypeRef::from(p)).collect(),
            return_type: Some(TypeRef::from(return_type)),
            ..MemberDecl::new(name, MemberKind::Method)
        }
    }

    pub fn constructor(parameters: &[&str]) -> Self {
        MemberDecl {
            parameters: parameters.iter().map(|&p| TypeRef::from(p)).collect(),
            ..MemberDecl::new(".ctor", MemberKind::Constructor)
        }
    }

    pub fn operator(token: &str, parameters: &[&str], return_type: &str) -> Self {
        MemberDecl {
            kind: MemberKind::Operator,
            ..MemberDecl::method(token, parameters, return_type)
        }
    }

    pub fn property(name: &str, type_: &str) -> Self {
        MemberDecl {
            return_type: Some(TypeRef::from(type_)),
            ..MemberDecl::new(name, MemberKind::Property)
        }
    }

    pub fn field(name: &str, type_: &str) -> Self {
        MemberDecl {
            return_type: Some(TypeRef::from(type_)),
            ..MemberDecl::new(name, MemberKind::Field)
        }
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Operators are always static in C#, whatever the flag says.
    pub fn is_static(&self) -> bool {
        self.is_static || self.kind == MemberKind::Operator
    }
}
