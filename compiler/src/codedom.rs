//! A small document model of a C# compilation unit: namespaces, type
//! declarations and members, assembled by the emitters and rendered by
//! [crate::writer].

use typed_id_schema::TypeKind;

use crate::writer::CSharpWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
    Static,
    Sealed,
    Override,
    Readonly,
    Partial,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public    => "public",
            Modifier::Protected => "protected",
            Modifier::Internal  => "internal",
            Modifier::Private   => "private",
            Modifier::Static    => "static",
            Modifier::Sealed    => "sealed",
            Modifier::Override  => "override",
            Modifier::Readonly  => "readonly",
            Modifier::Partial   => "partial",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<String>,
    /// `out`, `ref`, `in`
    pub passing:    Option<&'static str>,
    pub type_:      String,
    pub name:       String,
}

impl Parameter {
    pub fn new(type_: &str, name: &str) -> Self {
        Parameter {
            attributes: Vec::new(),
            passing:    None,
            type_:      type_.to_string(),
            name:       name.to_string(),
        }
    }

    pub fn out(type_: &str, name: &str) -> Self {
        Parameter {
            passing: Some("out"),
            ..Parameter::new(type_, name)
        }
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attributes.push(attribute.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// `=> expression;`
    Expression(String),
    /// Statements, one per line; nested blocks carry their own indentation.
    Block(Vec<String>),
}

impl Body {
    pub fn block<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Body::Block(lines.into_iter().map(Into::into).collect())
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Body::Expression(expression.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signature {
    Field { type_: String, name: String },
    /// Named after the enclosing type when rendered.
    Constructor { parameters: Vec<Parameter> },
    Property { type_: String, name: String },
    Method { return_type: String, name: String, parameters: Vec<Parameter> },
    Operator { return_type: String, token: String, parameters: Vec<Parameter> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub attributes: Vec<String>,
    pub modifiers:  Vec<Modifier>,
    pub signature:  Signature,
    pub body:       Option<Body>,
}

impl Member {
    pub fn new(modifiers: &[Modifier], signature: Signature, body: Option<Body>) -> Self {
        Member {
            attributes: Vec::new(),
            modifiers:  modifiers.to_vec(),
            signature,
            body,
        }
    }

    pub fn field(modifiers: &[Modifier], type_: &str, name: &str) -> Self {
        Member::new(
            modifiers,
            Signature::Field { type_: type_.to_string(), name: name.to_string() },
            None,
        )
    }

    pub fn constructor(modifiers: &[Modifier], parameters: Vec<Parameter>, body: Body) -> Self {
        Member::new(modifiers, Signature::Constructor { parameters }, Some(body))
    }

    pub fn property(modifiers: &[Modifier], type_: &str, name: &str, getter: Body) -> Self {
        Member::new(
            modifiers,
            Signature::Property { type_: type_.to_string(), name: name.to_string() },
            Some(getter),
        )
    }

    pub fn method(modifiers: &[Modifier], return_type: &str, name: &str, parameters: Vec<Parameter>, body: Body) -> Self {
        Member::new(
            modifiers,
            Signature::Method {
                return_type: return_type.to_string(),
                name:        name.to_string(),
                parameters,
            },
            Some(body),
        )
    }

    pub fn operator(return_type: &str, token: &str, parameters: Vec<Parameter>, body: Body) -> Self {
        Member::new(
            &[Modifier::Public, Modifier::Static],
            Signature::Operator {
                return_type: return_type.to_string(),
                token:       token.to_string(),
                parameters,
            },
            Some(body),
        )
    }

    pub fn add_attribute(&mut self, attribute: &str) {
        self.attributes.push(attribute.to_string());
    }

    /// Name used to identify the member, `.ctor` for constructors and the
    /// token for operators.
    pub fn name(&self) -> &str {
        match &self.signature {
            Signature::Field { name, .. }
            | Signature::Property { name, .. }
            | Signature::Method { name, .. } => name,
            Signature::Constructor { .. } => ".ctor",
            Signature::Operator { token, .. } => token,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    pub kind:       TypeKind,
    pub name:       String,
    pub modifiers:  Vec<Modifier>,
    pub attributes: Vec<String>,
    pub base_types: Vec<String>,
    pub members:    Vec<Member>,
    pub nested:     Vec<TypeDeclaration>,
}

impl TypeDeclaration {
    pub fn new(kind: TypeKind, name: &str, modifiers: &[Modifier]) -> Self {
        TypeDeclaration {
            kind,
            name:       name.to_string(),
            modifiers:  modifiers.to_vec(),
            attributes: Vec::new(),
            base_types: Vec::new(),
            members:    Vec::new(),
            nested:     Vec::new(),
        }
    }

    /// A `partial` declaration merging with a hand-written one.
    pub fn partial(kind: TypeKind, name: &str) -> Self {
        TypeDeclaration::new(kind, name, &[Modifier::Partial])
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(&Modifier::Partial)
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn add_nested_type(&mut self, nested: TypeDeclaration) {
        self.nested.push(nested);
    }

    pub fn add_attribute(&mut self, attribute: &str) {
        self.attributes.push(attribute.to_string());
    }

    pub fn add_base_type(&mut self, base_type: &str) {
        if !self.base_types.iter().any(|b| b == base_type) {
            self.base_types.push(base_type.to_string());
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Visits this declaration and every nested one, outer first.
    pub fn visit_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDeclaration)) {
        visitor(self);
        for nested in &mut self.nested {
            nested.visit_mut(visitor);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDeclaration {
    pub name:  String,
    pub items: Vec<TypeItem>,
}

impl NamespaceDeclaration {
    pub fn new(name: &str) -> Self {
        NamespaceDeclaration {
            name:  name.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: TypeItem) {
        self.items.push(item);
    }
}

/// Anything that can sit in a namespace body.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeItem {
    Namespace(NamespaceDeclaration),
    Type(TypeDeclaration),
}

impl TypeItem {
    /// Appends `child` to this item's body. Types cannot hold namespaces; a
    /// namespace appended to a type contributes its types instead.
    pub fn append(&mut self, child: TypeItem) {
        fn into_type(parent: &mut TypeDeclaration, child: TypeItem) {
            match child {
                TypeItem::Type(child) => parent.add_nested_type(child),
                TypeItem::Namespace(ns) => {
                    debug_assert!(false, "namespace `{}` appended to type `{}`", ns.name, parent.name);
                    for grandchild in ns.items {
                        into_type(parent, grandchild);
                    }
                }
            }
        }

        match self {
            TypeItem::Namespace(ns) => ns.add_item(child),
            TypeItem::Type(parent) => into_type(parent, child),
        }
    }

    pub fn visit_types_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDeclaration)) {
        match self {
            TypeItem::Namespace(ns) => {
                for item in &mut ns.items {
                    item.visit_types_mut(visitor);
                }
            }
            TypeItem::Type(declaration) => declaration.visit_mut(visitor),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub header:          Vec<String>,
    pub nullable_enable: bool,
    pub items:           Vec<TypeItem>,
}

impl Default for CompilationUnit {
    fn default() -> Self {
        CompilationUnit::new()
    }
}

impl CompilationUnit {
    pub fn new() -> Self {
        CompilationUnit {
            header:          Vec::new(),
            nullable_enable: true,
            items:           Vec::new(),
        }
    }

    pub fn with_header<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_item(&mut self, item: TypeItem) {
        self.items.push(item);
    }

    pub fn add_type(&mut self, declaration: TypeDeclaration) {
        self.add_item(TypeItem::Type(declaration));
    }

    pub fn add_namespace(&mut self, namespace: NamespaceDeclaration) {
        self.add_item(TypeItem::Namespace(namespace));
    }

    pub fn visit_types_mut(&mut self, visitor: &mut dyn FnMut(&mut TypeDeclaration)) {
        for item in &mut self.items {
            item.visit_types_mut(visitor);
        }
    }

    /// Tags every member, and every non-partial type, with `attribute`.
    /// Partial declarations mirror hand-written types and stay untagged.
    pub fn mark_generated(&mut self, attribute: &str) {
        self.visit_types_mut(&mut |declaration| {
            if !declaration.is_partial() {
                declaration.add_attribute(attribute);
            }
            for member in &mut declaration.members {
                member.add_attribute(attribute);
            }
        });
    }

    pub fn render(&self) -> String {
        let mut writer = CSharpWriter::new();
        writer.write_unit(self);
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_generated_skips_partial_declarations() {
        let mut wrapper = TypeDeclaration::partial(TypeKind::Struct, "OrderId");
        wrapper.add_member(Member::field(&[Modifier::Private], "int", "_value"));
        let mut converter = TypeDeclaration::new(TypeKind::Class, "OrderIdJsonConverter", &[Modifier::Public]);
        converter.add_member(Member::method(&[Modifier::Public], "void", "Write", vec![], Body::block(Vec::<String>::new())));
        wrapper.add_nested_type(converter);

        let mut outer = TypeItem::Type(TypeDeclaration::partial(TypeKind::Class, "Outer"));
        outer.append(TypeItem::Type(wrapper));
        let mut unit = CompilationUnit::new();
        unit.add_item(outer);
        unit.mark_generated("Generated");

        let outer = match &unit.items[0] {
            TypeItem::Type(t) => t,
            _ => unreachable!(),
        };
        let wrapper = &outer.nested[0];
        assert!(outer.attributes.is_empty());
        assert!(wrapper.attributes.is_empty());
        assert_eq!(wrapper.members[0].attributes, vec!["Generated"]);
        assert_eq!(wrapper.nested[0].attributes, vec!["Generated"]);
        assert_eq!(wrapper.nested[0].members[0].attributes, vec!["Generated"]);
    }

    #[test]
    fn test_member_names() {
        assert_eq!(Member::constructor(&[Modifier::Public], vec![], Body::block(Vec::<String>::new())).name(), ".ctor");
        assert_eq!(Member::operator("bool", "==", vec![], Body::expression("true")).name(), "==");
    }

    #[test]
    fn test_base_types_are_not_repeated() {
        let mut declaration = TypeDeclaration::partial(TypeKind::Struct, "OrderId");
        declaration.add_base_type("global::System.IEquatable<OrderId>");
        declaration.add_base_type("global::System.IEquatable<OrderId>");
        assert_eq!(declaration.base_types.len(), 1);
    }
}
