use serde::{Deserialize, Serialize};

use crate::{graph::Location, type_ref::TypeRef};

/// A bound attribute constructor argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeArgument {
    /// `typeof`-style argument, written `{ "type": "int" }`.
    Type {
        #[serde(rename = "type")]
        type_ref: TypeRef,
    },
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Missing or erroneous constant.
    Null,
}

impl AttributeArgument {
    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            AttributeArgument::Type { type_ref } => Some(type_ref),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            AttributeArgument::Bool(value) => Some(value),
            _ => None,
        }
    }
}

/// An attribute applied to a declaration, with its constructor arguments as
/// bound by the compiler (optional parameters already filled in).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    pub name:      String,
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
    #[serde(default)]
    pub location:  Option<Location>,
}
