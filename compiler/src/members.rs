use log::debug;

use crate::{
    codedom::{Body, Member, Modifier, Parameter, TypeDeclaration},
    kinds::IdKind,
    presence::{FIELD_NAME, VALUE_AS_STRING_PROPERTY_NAME, VALUE_PROPERTY_NAME},
    types::{Candidate, Descriptor, ExistingMembers, GeneratableMember},
    utils::escape_identifier,
};

const NOT_NULL_WHEN_TRUE: &str = "global::System.Diagnostics.CodeAnalysis.NotNullWhen(true)";

/// What every emitter sees of the annotation being processed.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub candidate:  &'a Candidate<'a>,
    pub descriptor: &'a Descriptor,
}

impl<'a> EmitContext<'a> {
    pub fn new(candidate: &'a Candidate<'a>, descriptor: &'a Descriptor) -> Self {
        EmitContext { candidate, descriptor }
    }

    pub fn kind(&self) -> IdKind {
        self.descriptor.kind
    }

    pub fn is_reference_type(&self) -> bool {
        self.candidate.is_reference_type()
    }

    /// The wrapper as a type reference.
    pub fn type_name(&self) -> String {
        escape_identifier(&self.candidate.name)
    }

    /// The wrapper type, annotated nullable when it is a reference type.
    pub fn nullable_type_name(&self) -> String {
        if self.is_reference_type() {
            format!("{}?", self.type_name())
        } else {
            self.type_name()
        }
    }

    /// Name of a nested helper type, e.g. `OrderIdJsonConverter`.
    pub fn nested_type_name(&self, suffix: &str) -> String {
        format!("{}{}", self.candidate.name, suffix)
    }

    /// `new T(argument)`
    pub fn construct(&self, argument: &str) -> String {
        format!("new {}({})", self.type_name(), argument)
    }
}

/// Field visibility: derived types of a non-sealed class or record need the
/// stored value.
fn field_modifiers(context: &EmitContext<'_>) -> [Modifier; 2] {
    if context.is_reference_type() && !context.candidate.is_sealed {
        [Modifier::Protected, Modifier::Readonly]
    } else {
        [Modifier::Private, Modifier::Readonly]
    }
}

/// Adds the missing core members to `wrapper`, in emission order.
pub fn emit_core_members(context: &EmitContext<'_>, existing: &ExistingMembers, wrapper: &mut TypeDeclaration) {
    wrapper.add_base_type(&format!("global::System.IEquatable<{}>", context.type_name()));

    for member in existing.missing() {
        debug!("{}: emitting {:?}", context.candidate.qualified_name, member);
        wrapper.add_member(core_member(context, member));
    }
}

fn core_member(context: &EmitContext<'_>, member: GeneratableMember) -> Member {
    let kind       = context.kind();
    let value_type = kind.value_type_syntax();
    let this_type  = context.type_name();
    let other_type = context.nullable_type_name();
    let string_type = if kind.is_nullable() { "string?" } else { "string" };

    match member {
        GeneratableMember::Field => Member::field(&field_modifiers(context), &value_type, FIELD_NAME),

        GeneratableMember::Constructor => Member::constructor(
            &[Modifier::Public],
            vec![Parameter::new(&value_type, "value")],
            Body::block([format!("{} = value;", FIELD_NAME)]),
        ),

        GeneratableMember::Value => Member::property(
            &[Modifier::Public],
            &value_type,
            VALUE_PROPERTY_NAME,
            Body::expression(FIELD_NAME),
        ),

        GeneratableMember::ValueAsString => Member::property(
            &[Modifier::Public],
            string_type,
            VALUE_AS_STRING_PROPERTY_NAME,
            Body::expression(kind.format_expression(FIELD_NAME)),
        ),

        GeneratableMember::ToString => Member::method(
            &[Modifier::Public, Modifier::Override],
            string_type,
            "ToString",
            vec![],
            Body::expression(VALUE_AS_STRING_PROPERTY_NAME),
        ),

        GeneratableMember::GetHashCode => Member::method(
            &[Modifier::Public, Modifier::Override],
            "int",
            "GetHashCode",
            vec![],
            Body::expression(kind.hash_expression(FIELD_NAME)),
        ),

        GeneratableMember::EqualsObject => Member::method(
            &[Modifier::Public, Modifier::Override],
            "bool",
            "Equals",
            vec![Parameter::new("object?", "obj")],
            Body::expression(format!("obj is {} other && Equals(other)", this_type)),
        ),

        GeneratableMember::EqualsTyped => {
            let equals = kind.equals_expression(FIELD_NAME, &format!("other.{}", FIELD_NAME));
            let body = if context.is_reference_type() {
                Body::block([
                    "if (other is null)".to_string(),
                    "    return false;".to_string(),
                    "if (ReferenceEquals(this, other))".to_string(),
                    "    return true;".to_string(),
                    format!("return {};", equals),
                ])
            } else {
                Body::expression(equals)
            };
            Member::method(
                &[Modifier::Public],
                "bool",
                "Equals",
                vec![Parameter::new(&other_type, "other")],
                body,
            )
        }

        GeneratableMember::EqualityOperator => {
            let body = if context.is_reference_type() {
                "a is null ? b is null : a.Equals(b)".to_string()
            } else {
                "a.Equals(b)".to_string()
            };
            Member::operator(
                "bool",
                "==",
                vec![Parameter::new(&other_type, "a"), Parameter::new(&other_type, "b")],
                Body::expression(body),
            )
        }

        GeneratableMember::InequalityOperator => {
            let body = if context.is_reference_type() {
                "!(a == b)".to_string()
            } else {
                "!a.Equals(b)".to_string()
            };
            Member::operator(
                "bool",
                "!=",
                vec![Parameter::new(&other_type, "a"), Parameter::new(&other_type, "b")],
                Body::expression(body),
            )
        }

        GeneratableMember::TryParse => {
            let mut statements = vec![
                "if (value is null)".to_string(),
                "{".to_string(),
                "    result = default;".to_string(),
                "    return false;".to_string(),
                "}".to_string(),
                String::new(),
            ];
            match kind.try_parse_expression("value", "parsed") {
                Some(try_parse) => statements.extend([
                    format!("if ({})", try_parse),
                    "{".to_string(),
                    format!("    result = {};", context.construct("parsed")),
                    "    return true;".to_string(),
                    "}".to_string(),
                    String::new(),
                    "result = default;".to_string(),
                    "return false;".to_string(),
                ]),
                None => statements.extend([
                    format!("result = {};", context.construct("value")),
                    "return true;".to_string(),
                ]),
            }
            let result = if context.is_reference_type() {
                Parameter::out(&other_type, "result").with_attribute(NOT_NULL_WHEN_TRUE)
            } else {
                Parameter::out(&this_type, "result")
            };
            Member::method(
                &[Modifier::Public, Modifier::Static],
                "bool",
                "TryParse",
                vec![Parameter::new("string?", "value").with_attribute(NOT_NULL_WHEN_TRUE), result],
                Body::block(statements),
            )
        }

        GeneratableMember::Parse => Member::method(
            &[Modifier::Public, Modifier::Static],
            &this_type,
            "Parse",
            vec![Parameter::new("string", "value")],
            Body::expression(context.construct(&kind.parse_expression("value"))),
        ),
    }
}
