//! Renders a [CompilationUnit] as C# source text.

use crate::{
    codedom::{Body, CompilationUnit, Member, Modifier, NamespaceDeclaration, Parameter, Signature, TypeDeclaration, TypeItem},
    utils::{escape_identifier, escape_namespace},
};

const INDENT: &str = "    ";

#[derive(Debug, Default)]
pub struct CSharpWriter {
    out:    String,
    indent: usize,
}

impl CSharpWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent -= 1;
        self.line("}");
    }

    pub fn write_unit(&mut self, unit: &CompilationUnit) {
        for line in &unit.header {
            let comment = format!("// {}", line);
            self.line(comment.trim_end());
        }
        if !unit.header.is_empty() {
            self.line("");
        }
        if unit.nullable_enable {
            self.line("#nullable enable");
            self.line("");
        }
        self.write_items(&unit.items);
    }

    fn write_items(&mut self, items: &[TypeItem]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.line("");
            }
            match item {
                TypeItem::Namespace(ns) => self.write_namespace(ns),
                TypeItem::Type(declaration) => self.write_type(declaration),
            }
        }
    }

    fn write_namespace(&mut self, namespace: &NamespaceDeclaration) {
        self.line(&format!("namespace {}", escape_namespace(&namespace.name)));
        self.open();
        self.write_items(&namespace.items);
        self.close();
    }

    fn write_attributes(&mut self, attributes: &[String]) {
        for attribute in attributes {
            self.line(&format!("[{}]", attribute));
        }
    }

    pub fn write_type(&mut self, declaration: &TypeDeclaration) {
        self.write_attributes(&declaration.attributes);

        let mut head = modifiers(&declaration.modifiers);
        head.push_str(declaration.kind.keyword());
        head.push(' ');
        head.push_str(&escape_identifier(&declaration.name));
        if !declaration.base_types.is_empty() {
            head.push_str(" : ");
            head.push_str(&declaration.base_types.join(", "));
        }
        self.line(&head);
        self.open();

        let mut first = true;
        for member in &declaration.members {
            if !first {
                self.line("");
            }
            first = false;
            self.write_member(member, &declaration.name);
        }
        for nested in &declaration.nested {
            if !first {
                self.line("");
            }
            first = false;
            self.write_type(nested);
        }

        self.close();
    }

    fn write_member(&mut self, member: &Member, type_name: &str) {
        self.write_attributes(&member.attributes);
        let mods = modifiers(&member.modifiers);

        let head = match &member.signature {
            Signature::Field { type_, name } => {
                self.line(&format!("{}{} {};", mods, type_, escape_identifier(name)));
                return;
            }
            Signature::Constructor { parameters } => {
                format!("{}{}({})", mods, escape_identifier(type_name), parameter_list(parameters))
            }
            Signature::Property { type_, name } => {
                format!("{}{} {}", mods, type_, escape_identifier(name))
            }
            Signature::Method { return_type, name, parameters } => {
                format!("{}{} {}({})", mods, return_type, escape_identifier(name), parameter_list(parameters))
            }
            Signature::Operator { return_type, token, parameters } => {
                format!("{}{} operator {}({})", mods, return_type, token, parameter_list(parameters))
            }
        };

        let is_property = matches!(member.signature, Signature::Property { .. });
        match &member.body {
            None => self.line(&format!("{};", head)),
            Some(Body::Expression(expression)) => self.line(&format!("{} => {};", head, expression)),
            Some(Body::Block(statements)) if is_property => {
                self.line(&head);
                self.open();
                self.line("get");
                self.write_block(statements);
                self.close();
            }
            Some(Body::Block(statements)) => {
                self.line(&head);
                self.write_block(statements);
            }
        }
    }

    fn write_block(&mut self, statements: &[String]) {
        self.open();
        for statement in statements {
            if statement.is_empty() {
                self.line("");
            }
            for line in statement.lines() {
                self.line(line);
            }
        }
        self.close();
    }
}

fn modifiers(modifiers: &[Modifier]) -> String {
    modifiers.iter().map(|m| format!("{} ", m.keyword())).collect()
}

fn parameter_list(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| {
            let mut text = String::new();
            for attribute in &p.attributes {
                text.push_str(&format!("[{}] ", attribute));
            }
            if let Some(passing) = p.passing {
                text.push_str(passing);
                text.push(' ');
            }
            text.push_str(&p.type_);
            text.push(' ');
            text.push_str(&escape_identifier(&p.name));
            text
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use typed_id_schema::TypeKind;

    #[test]
    fn test_renders_header_namespace_and_members() {
        let mut declaration = TypeDeclaration::partial(TypeKind::Struct, "OrderId");
        declaration.add_base_type("global::System.IEquatable<OrderId>");
        declaration.add_member(Member::field(&[Modifier::Private, Modifier::Readonly], "int", "_value"));
        declaration.add_member(Member::property(&[Modifier::Public], "int", "Value", Body::expression("_value")));
        declaration.add_member(Member::method(
            &[Modifier::Public, Modifier::Static],
            "bool",
            "TryParse",
            vec![Parameter::new("string?", "value"), Parameter::out("OrderId", "result")],
            Body::block(["result = default;", "return false;"]),
        ));

        let mut ns = NamespaceDeclaration::new("Contoso.Orders");
        ns.add_item(TypeItem::Type(declaration));
        let mut unit = CompilationUnit::new().with_header(["<auto-generated/>"]);
        unit.add_namespace(ns);

        let expected = "\
// <auto-generated/>

#nullable enable

namespace Contoso.Orders
{
    partial struct OrderId : global::System.IEquatable<OrderId>
    {
        private readonly int _value;

        public int Value => _value;

        public static bool TryParse(string? value, out OrderId result)
        {
            result = default;
            return false;
        }
    }
}
";
        assert_eq!(unit.render(), expected);
    }

    #[test]
    fn test_escapes_keyword_identifiers() {
        let mut declaration = TypeDeclaration::partial(TypeKind::Class, "event");
        declaration.add_member(Member::constructor(
            &[Modifier::Public],
            vec![Parameter::new("int", "object")],
            Body::block(["_value = @object;"]),
        ));
        let mut writer = CSharpWriter::new();
        writer.write_type(&declaration);
        let text = writer.finish();
        assert!(text.starts_with("partial class @event\n"));
        assert!(text.contains("public @event(int @object)"));
    }

    #[test]
    fn test_block_property_renders_getter() {
        let mut declaration = TypeDeclaration::partial(TypeKind::Struct, "A");
        declaration.add_member(Member::property(&[Modifier::Public], "int", "Value", Body::block(["return 1;"])));
        let mut writer = CSharpWriter::new();
        writer.write_type(&declaration);
        assert!(writer.finish().contains("    public int Value\n    {\n        get\n        {\n            return 1;\n        }\n    }\n"));
    }
}
