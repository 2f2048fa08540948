use crate::{
    codedom::{Body, Member, Modifier, Parameter, TypeDeclaration},
    converters::{bind_adapter, ConverterEmitter},
    kinds::IdKind,
    members::EmitContext,
    types::Converter,
};

const COMPONENT_MODEL: &str = "global::System.ComponentModel";
const CONTEXT: &str = "global::System.ComponentModel.ITypeDescriptorContext?";
const CULTURE: &str = "global::System.Globalization.CultureInfo?";

/// `System.ComponentModel.TypeConverter`, converting from and to `string` and
/// the underlying type.
pub struct TypeConverterEmitter;

impl ConverterEmitter for TypeConverterEmitter {
    fn converter(&self) -> Converter {
        Converter::TypeConverter
    }

    fn emit(&self, context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) -> bool {
        let kind = context.kind();
        let underlying = kind.type_syntax();
        let this_type = context.type_name();
        let mut adapter = bind_adapter(
            context,
            wrapper,
            "TypeConverter",
            &format!("{}.TypeConverter", COMPONENT_MODEL),
            &format!("{}.TypeConverter", COMPONENT_MODEL),
        );

        let accepts = |parameter: &str| {
            if kind == IdKind::String {
                format!("{} == typeof(string)", parameter)
            } else {
                format!("{0} == typeof(string) || {0} == typeof({1})", parameter, underlying)
            }
        };

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "bool",
            "CanConvertFrom",
            vec![Parameter::new(CONTEXT, "context"), Parameter::new("global::System.Type", "sourceType")],
            Body::expression(format!(
                "{} || base.CanConvertFrom(context, sourceType)",
                accepts("sourceType")
            )),
        ));

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "bool",
            "CanConvertTo",
            vec![Parameter::new(CONTEXT, "context"), Parameter::new("global::System.Type?", "destinationType")],
            Body::expression(format!(
                "{} || base.CanConvertTo(context, destinationType)",
                accepts("destinationType")
            )),
        ));

        let mut convert_from = Vec::new();
        if kind != IdKind::String {
            convert_from.push(format!("if (value is {} typedValue)", underlying));
            convert_from.push(format!("    return {};", context.construct("typedValue")));
            convert_from.push(String::new());
        }
        convert_from.push("if (value is string stringValue)".to_string());
        convert_from.push(format!(
            "    return {};",
            context.construct(&kind.parse_expression("stringValue"))
        ));
        convert_from.push(String::new());
        convert_from.push("return base.ConvertFrom(context, culture, value);".to_string());
        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "object?",
            "ConvertFrom",
            vec![
                Parameter::new(CONTEXT, "context"),
                Parameter::new(CULTURE, "culture"),
                Parameter::new("object", "value"),
            ],
            Body::block(convert_from),
        ));

        let mut convert_to = vec![format!("if (value is {} id)", this_type), "{".to_string()];
        if kind != IdKind::String {
            convert_to.push(format!("    if (destinationType == typeof({}))", underlying));
            convert_to.push("        return id.Value;".to_string());
            convert_to.push(String::new());
        }
        convert_to.push("    if (destinationType == typeof(string))".to_string());
        convert_to.push(format!("        return {};", kind.format_expression("id.Value")));
        convert_to.push("}".to_string());
        convert_to.push(String::new());
        convert_to.push("return base.ConvertTo(context, culture, value, destinationType);".to_string());
        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "object?",
            "ConvertTo",
            vec![
                Parameter::new(CONTEXT, "context"),
                Parameter::new(CULTURE, "culture"),
                Parameter::new("object?", "value"),
                Parameter::new("global::System.Type", "destinationType"),
            ],
            Body::block(convert_to),
        ));

        wrapper.add_nested_type(adapter);
        true
    }
}
