use crate::{
    codedom::{Body, Member, Modifier, Parameter, TypeDeclaration},
    converters::{bind_adapter, ConverterEmitter},
    kinds::IdKind,
    members::EmitContext,
    types::Converter,
};

const JSON: &str = "global::System.Text.Json";

/// `System.Text.Json.Serialization.JsonConverter<T>`
pub struct SystemTextJsonEmitter;

fn reader_method(kind: IdKind) -> &'static str {
    match kind {
        IdKind::Boolean        => "GetBoolean",
        IdKind::Byte           => "GetByte",
        IdKind::SByte          => "GetSByte",
        IdKind::Int16          => "GetInt16",
        IdKind::UInt16         => "GetUInt16",
        IdKind::Int32          => "GetInt32",
        IdKind::UInt32         => "GetUInt32",
        IdKind::Int64          => "GetInt64",
        IdKind::UInt64         => "GetUInt64",
        IdKind::Single         => "GetSingle",
        IdKind::Double         => "GetDouble",
        IdKind::Decimal        => "GetDecimal",
        IdKind::String         => "GetString",
        IdKind::DateTime       => "GetDateTime",
        IdKind::DateTimeOffset => "GetDateTimeOffset",
        IdKind::Guid           => "GetGuid",
    }
}

fn writer_method(kind: IdKind) -> &'static str {
    match kind {
        IdKind::Boolean => "WriteBooleanValue",
        IdKind::String | IdKind::DateTime | IdKind::DateTimeOffset | IdKind::Guid => "WriteStringValue",
        _ => "WriteNumberValue",
    }
}

impl ConverterEmitter for SystemTextJsonEmitter {
    fn converter(&self) -> Converter {
        Converter::SystemTextJson
    }

    fn emit(&self, context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) -> bool {
        let this_type = context.type_name();
        let mut adapter = bind_adapter(
            context,
            wrapper,
            "JsonConverter",
            &format!("{}.Serialization.JsonConverter<{}>", JSON, this_type),
            &format!("{}.Serialization.JsonConverter", JSON),
        );

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            &this_type,
            "Read",
            vec![
                Parameter {
                    passing: Some("ref"),
                    ..Parameter::new(&format!("{}.Utf8JsonReader", JSON), "reader")
                },
                Parameter::new("global::System.Type", "typeToConvert"),
                Parameter::new(&format!("{}.JsonSerializerOptions", JSON), "options"),
            ],
            Body::block([format!(
                "return {};",
                context.construct(&format!("reader.{}()", reader_method(context.kind())))
            )]),
        ));

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "void",
            "Write",
            vec![
                Parameter::new(&format!("{}.Utf8JsonWriter", JSON), "writer"),
                Parameter::new(&this_type, "value"),
                Parameter::new(&format!("{}.JsonSerializerOptions", JSON), "options"),
            ],
            Body::block([format!("writer.{}(value.Value);", writer_method(context.kind()))]),
        ));

        wrapper.add_nested_type(adapter);
        true
    }
}
