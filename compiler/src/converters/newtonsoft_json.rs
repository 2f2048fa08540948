use crate::{
    codedom::{Body, Member, Modifier, Parameter, TypeDeclaration},
    converters::{bind_adapter, ConverterEmitter},
    members::EmitContext,
    types::Converter,
};

const NEWTONSOFT: &str = "global::Newtonsoft.Json";

/// `Newtonsoft.Json.JsonConverter<T>`
pub struct NewtonsoftJsonEmitter;

impl ConverterEmitter for NewtonsoftJsonEmitter {
    fn converter(&self) -> Converter {
        Converter::NewtonsoftJson
    }

    fn emit(&self, context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) -> bool {
        let this_type = context.type_name();
        let value_type = context.nullable_type_name();
        let mut adapter = bind_adapter(
            context,
            wrapper,
            "NewtonsoftJsonConverter",
            &format!("{}.JsonConverter<{}>", NEWTONSOFT, this_type),
            &format!("{}.JsonConverter", NEWTONSOFT),
        );

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            &value_type,
            "ReadJson",
            vec![
                Parameter::new(&format!("{}.JsonReader", NEWTONSOFT), "reader"),
                Parameter::new("global::System.Type", "objectType"),
                Parameter::new(&value_type, "existingValue"),
                Parameter::new("bool", "hasExistingValue"),
                Parameter::new(&format!("{}.JsonSerializer", NEWTONSOFT), "serializer"),
            ],
            Body::block([
                format!("if (reader.TokenType == {}.JsonToken.Null)", NEWTONSOFT),
                "    return default;".to_string(),
                String::new(),
                format!(
                    "var value = serializer.Deserialize<{}>(reader);",
                    context.kind().value_type_syntax()
                ),
                format!("return {};", context.construct("value")),
            ]),
        ));

        let write = if context.is_reference_type() {
            Body::block([
                "if (value is null)",
                "    writer.WriteNull();",
                "else",
                "    writer.WriteValue(value.Value);",
            ])
        } else {
            Body::block(["writer.WriteValue(value.Value);"])
        };
        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "void",
            "WriteJson",
            vec![
                Parameter::new(&format!("{}.JsonWriter", NEWTONSOFT), "writer"),
                Parameter::new(&value_type, "value"),
                Parameter::new(&format!("{}.JsonSerializer", NEWTONSOFT), "serializer"),
            ],
            write,
        ));

        wrapper.add_nested_type(adapter);
        true
    }
}
