use crate::{
    codedom::{Body, Member, Modifier, Parameter, TypeDeclaration},
    converters::{bind_adapter, ConverterEmitter},
    kinds::IdKind,
    members::EmitContext,
    types::Converter,
};

const BSON: &str = "global::MongoDB.Bson";

/// `MongoDB.Bson.Serialization.Serializers.SerializerBase<T>`
pub struct MongoDbBsonEmitter;

/// Expression reading the underlying value from `context.Reader`, and
/// statement writing `value.Value` to `context.Writer`. `None` when the kind
/// has no lossless BSON representation.
fn primitives(kind: IdKind) -> Option<(String, String)> {
    let read = |method: &str| format!("context.Reader.{}()", method);
    let write = |method: &str, value: &str| format!("context.Writer.{}({});", method, value);

    let pair = match kind {
        IdKind::Boolean => (read("ReadBoolean"), write("WriteBoolean", "value.Value")),
        IdKind::Byte | IdKind::SByte | IdKind::Int16 | IdKind::UInt16 => (
            format!("({}){}", kind.type_syntax(), read("ReadInt32")),
            write("WriteInt32", "value.Value"),
        ),
        IdKind::Int32  => (read("ReadInt32"), write("WriteInt32", "value.Value")),
        IdKind::UInt32 => (format!("(uint){}", read("ReadInt64")), write("WriteInt64", "value.Value")),
        IdKind::Int64  => (read("ReadInt64"), write("WriteInt64", "value.Value")),
        IdKind::UInt64 => return None,
        IdKind::Single => (format!("(float){}", read("ReadDouble")), write("WriteDouble", "value.Value")),
        IdKind::Double => (read("ReadDouble"), write("WriteDouble", "value.Value")),
        IdKind::Decimal => (
            format!("(decimal){}", read("ReadDecimal128")),
            write("WriteDecimal128", &format!("new {}.Decimal128(value.Value)", BSON)),
        ),
        IdKind::String => (read("ReadString"), write("WriteString", "value.Value")),
        IdKind::DateTime => (
            format!("{}.BsonUtils.ToDateTimeFromMillisecondsSinceEpoch({})", BSON, read("ReadDateTime")),
            write("WriteDateTime", &format!("{}.BsonUtils.ToMillisecondsSinceEpoch(value.Value)", BSON)),
        ),
        IdKind::DateTimeOffset => (
            kind.parse_expression(&read("ReadString")),
            write("WriteString", &kind.format_expression("value.Value")),
        ),
        IdKind::Guid => (
            format!("{}.ToGuid()", read("ReadBinaryData")),
            write(
                "WriteBinaryData",
                &format!("new {0}.BsonBinaryData(value.Value, {0}.GuidRepresentation.Standard)", BSON),
            ),
        ),
    };
    Some(pair)
}

impl ConverterEmitter for MongoDbBsonEmitter {
    fn converter(&self) -> Converter {
        Converter::MongoDbBson
    }

    fn emit(&self, context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) -> bool {
        let kind = context.kind();
        let (read, write) = match primitives(kind) {
            Some(pair) => pair,
            None => return false,
        };

        let this_type = context.type_name();
        let mut adapter = bind_adapter(
            context,
            wrapper,
            "BsonSerializer",
            &format!("{}.Serialization.Serializers.SerializerBase<{}>", BSON, this_type),
            &format!("{}.Serialization.Attributes.BsonSerializer", BSON),
        );

        let is_null = format!("context.Reader.GetCurrentBsonType() == {}.BsonType.Null", BSON);
        let mut deserialize = Vec::new();
        if context.is_reference_type() {
            deserialize.extend([
                format!("if ({})", is_null),
                "{".to_string(),
                "    context.Reader.ReadNull();".to_string(),
                "    return null!;".to_string(),
                "}".to_string(),
                String::new(),
            ]);
        } else if kind.is_nullable() {
            deserialize.extend([
                format!("if ({})", is_null),
                "{".to_string(),
                "    context.Reader.ReadNull();".to_string(),
                format!("    return {};", context.construct("null")),
                "}".to_string(),
                String::new(),
            ]);
        }
        deserialize.push(format!("return {};", context.construct(&read)));

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            &this_type,
            "Deserialize",
            vec![
                Parameter::new(&format!("{}.Serialization.BsonDeserializationContext", BSON), "context"),
                Parameter::new(&format!("{}.Serialization.BsonDeserializationArgs", BSON), "args"),
            ],
            Body::block(deserialize),
        ));

        let mut serialize = Vec::new();
        if context.is_reference_type() {
            serialize.extend([
                "if (value is null)".to_string(),
                "{".to_string(),
                "    context.Writer.WriteNull();".to_string(),
                "    return;".to_string(),
                "}".to_string(),
                String::new(),
            ]);
        }
        if kind.is_nullable() {
            serialize.extend([
                "if (value.Value is null)".to_string(),
                "    context.Writer.WriteNull();".to_string(),
                "else".to_string(),
                format!("    {}", write),
            ]);
        } else {
            serialize.push(write);
        }

        adapter.add_member(Member::method(
            &[Modifier::Public, Modifier::Override],
            "void",
            "Serialize",
            vec![
                Parameter::new(&format!("{}.Serialization.BsonSerializationContext", BSON), "context"),
                Parameter::new(&format!("{}.Serialization.BsonSerializationArgs", BSON), "args"),
                Parameter::new(&this_type, "value"),
            ],
            Body::block(serialize),
        ));

        wrapper.add_nested_type(adapter);
        true
    }
}
