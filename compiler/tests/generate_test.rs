#![cfg(test)]

use std::collections::BTreeMap;

use typed_id_compiler::{
    ArtifactStore, CancellationToken, Diagnostic, DiagnosticBag, Generator, GeneratorOptions, TypedIdError,
};
use typed_id_schema::TypeGraph;

const GENERATED_CODE: &str = "[global::System.CodeDom.Compiler.GeneratedCode(\"typedid\", \"1.0.0\")]";

fn options(parallel: bool) -> GeneratorOptions {
    GeneratorOptions {
        parallel,
        tool_version: "1.0.0".into(),
        emit_attribute_definition: false,
        ..GeneratorOptions::default()
    }
}

fn run_with(
    generator: &Generator,
    json: &str,
    token: &CancellationToken,
) -> (Result<BTreeMap<String, String>, TypedIdError>, Vec<Diagnostic>) {
    let graph = TypeGraph::from_json(json).expect("invalid test graph");
    let diagnostics = DiagnosticBag::new();
    let store = ArtifactStore::new();
    let result = generator.execute(&graph, &diagnostics, &store, token);
    (result.map(|_| store.into_map()), diagnostics.into_vec())
}

fn run(json: &str) -> (BTreeMap<String, String>, Vec<Diagnostic>) {
    let (result, diagnostics) = run_with(&Generator::new(options(true)), json, &CancellationToken::new());
    (result.expect("generation failed"), diagnostics)
}

fn order_id(declaration: &str, arguments: &str, members: &str) -> String {
    format!(
        r#"{{ "symbols": [
            {{ "name": "Contoso", "kind": "namespace" }},
            {{ "name": "Orders", "kind": "namespace", "containing": 0 }},
            {{ "name": "OrderId", "kind": "type", "declaration": "{}", "containing": 1,
               "location": {{ "file": "OrderId.cs", "line": 3, "column": 5 }},
               "attributes": [ {{ "name": "StronglyTypedId", "arguments": {} }} ],
               "members": {} }}
        ] }}"#,
        declaration, arguments, members
    )
}

const ALL_ON: &str = r#"[ { "type": "int" }, true, true, true, true, true ]"#;

#[test]
fn test_order_id_gets_every_member_and_adapter() {
    let (artifacts, diagnostics) = run(&order_id("struct", ALL_ON, "[]"));
    assert!(diagnostics.is_empty());
    assert_eq!(artifacts.keys().collect::<Vec<_>>(), vec!["Contoso.Orders.OrderId.g.cs"]);

    let text = &artifacts["Contoso.Orders.OrderId.g.cs"];
    assert!(text.starts_with("// <auto-generated>\n//     This code was generated by typedid 1.0.0.\n"));
    assert!(text.contains("#nullable enable\n\nnamespace Contoso.Orders\n{\n"));
    assert!(text.contains("    partial struct OrderId : global::System.IEquatable<OrderId>\n    {\n"));

    for member in [
        "private readonly int _value;",
        "public OrderId(int value)",
        "public int Value => _value;",
        "public string ValueAsString => _value.ToString(global::System.Globalization.CultureInfo.InvariantCulture);",
        "public override string ToString() => ValueAsString;",
        "public override int GetHashCode() => _value.GetHashCode();",
        "public override bool Equals(object? obj) => obj is OrderId other && Equals(other);",
        "public bool Equals(OrderId other) => _value.Equals(other._value);",
        "public static bool operator ==(OrderId a, OrderId b) => a.Equals(b);",
        "public static bool operator !=(OrderId a, OrderId b) => !a.Equals(b);",
        "public static bool TryParse([global::System.Diagnostics.CodeAnalysis.NotNullWhen(true)] string? value, out OrderId result)",
        "public static OrderId Parse(string value) => new OrderId(int.Parse(",
    ] {
        assert!(text.contains(member), "missing `{}` in\n{}", member, text);
    }

    for adapter in [
        "public sealed class OrderIdTypeConverter : global::System.ComponentModel.TypeConverter",
        "public sealed class OrderIdJsonConverter : global::System.Text.Json.Serialization.JsonConverter<OrderId>",
        "public sealed class OrderIdNewtonsoftJsonConverter : global::Newtonsoft.Json.JsonConverter<OrderId>",
        "public sealed class OrderIdBsonSerializer : global::MongoDB.Bson.Serialization.Serializers.SerializerBase<OrderId>",
    ] {
        assert!(text.contains(adapter), "missing `{}`", adapter);
    }

    // 12 core members, 10 adapter members, 4 adapter types.
    assert_eq!(text.matches(GENERATED_CODE).count(), 26);
    let wrapper_line = text.lines().position(|l| l.contains("partial struct OrderId")).unwrap();
    let previous = text.lines().nth(wrapper_line - 1).unwrap();
    assert!(!previous.contains("GeneratedCode"), "{}", previous);
}

#[test]
fn test_hand_written_value_is_not_regenerated() {
    let members = r#"[ { "name": "Value", "kind": "property", "type": "int" } ]"#;
    let (artifacts, _) = run(&order_id("struct", ALL_ON, members));
    let text = &artifacts["Contoso.Orders.OrderId.g.cs"];
    assert!(!text.contains(" Value =>"));
    assert!(text.contains("public string ValueAsString =>"));
    assert!(text.contains("public OrderId(int value)"));
    assert_eq!(text.matches(GENERATED_CODE).count(), 25);
}

#[test]
fn test_unsupported_type_reports_one_diagnostic_and_no_artifact() {
    let (artifacts, diagnostics) = run(&order_id(
        "struct",
        r#"[ { "type": "object" }, true, true, true, true, true ]"#,
        "[]",
    ));
    assert!(artifacts.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].to_string(),
        "OrderId.cs(3,5): error TID0001: The type 'object' is not supported."
    );
}

#[test]
fn test_five_arguments_produce_nothing() {
    let (artifacts, diagnostics) = run(&order_id("struct", r#"[ { "type": "int" }, true, true, true, true ]"#, "[]"));
    assert!(artifacts.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_each_annotation_gets_its_own_artifact() {
    let json = r#"{ "symbols": [
        { "name": "Ids", "kind": "namespace" },
        { "name": "UserId", "kind": "type", "declaration": "struct", "containing": 0,
          "attributes": [
            { "name": "StronglyTypedIdAttribute", "arguments": [ { "type": "System.Guid" }, false, false, false, false, false ] },
            { "name": "global::StronglyTypedId", "arguments": [ { "type": "bool" }, false, false, false, false, false ] },
            { "name": "StronglyTypedId", "arguments": [ { "type": "decimal" }, false, false, false, false, false ] }
          ] }
    ] }"#;
    let (artifacts, diagnostics) = run(json);
    assert!(diagnostics.is_empty());
    assert_eq!(
        artifacts.keys().collect::<Vec<_>>(),
        vec!["Ids.UserId.2.g.cs", "Ids.UserId.3.g.cs", "Ids.UserId.g.cs"]
    );
    assert!(artifacts["Ids.UserId.g.cs"].contains("global::System.Guid _value;"));
    assert!(artifacts["Ids.UserId.2.g.cs"].contains("bool _value;"));
    assert!(!artifacts["Ids.UserId.g.cs"].contains("GeneratedCode"));
    assert!(!artifacts["Ids.UserId.g.cs"].contains("class UserIdJsonConverter"));
}

#[test]
fn test_nested_containers_are_rebuilt_as_partials() {
    let json = r#"{ "symbols": [
        { "name": "Contoso", "kind": "namespace" },
        { "name": "Outer", "kind": "type", "declaration": "class", "containing": 0 },
        { "name": "Inner", "kind": "type", "declaration": "record", "containing": 1 },
        { "name": "ItemId", "kind": "type", "declaration": "class", "sealed": true, "containing": 2,
          "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "string" }, true, false, false, false, true ] } ] }
    ] }"#;
    let (artifacts, _) = run(json);
    let text = &artifacts["Contoso.Outer.Inner.ItemId.g.cs"];
    assert!(text.contains("namespace Contoso\n{\n    partial class Outer\n    {\n        partial record Inner\n        {\n"));
    assert!(text.contains("            partial class ItemId : global::System.IEquatable<ItemId>\n"));
    assert!(text.contains("private readonly string? _value;"));
    assert!(text.contains("public static bool operator ==(ItemId? a, ItemId? b) => a is null ? b is null : a.Equals(b);"));
    let outer = text.lines().position(|l| l.contains("partial class Outer")).unwrap();
    assert!(!text.lines().nth(outer - 1).unwrap().contains("GeneratedCode"));
}

#[test]
fn test_record_keeps_synthesized_members() {
    let (artifacts, _) = run(&order_id("record", ALL_ON, "[]"));
    let text = &artifacts["Contoso.Orders.OrderId.g.cs"];
    assert!(text.contains("partial record OrderId"));
    assert!(text.contains("protected readonly int _value;"));
    assert!(!text.contains("override string ToString()"));
    assert!(!text.contains("operator =="));
    assert!(!text.contains("bool Equals("));
    assert!(text.contains("public static OrderId Parse(string value)"));
}

#[test]
fn test_global_namespace_candidate() {
    let json = r#"{ "symbols": [
        { "name": "TenantId", "kind": "type", "declaration": "struct",
          "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "long" }, true, true, true, true, true ] } ] }
    ] }"#;
    let (artifacts, _) = run(json);
    let text = &artifacts["TenantId.g.cs"];
    assert!(!text.contains("namespace"));
    assert!(text.contains("#nullable enable\n\n[global::System.ComponentModel.TypeConverter(typeof(TenantIdTypeConverter))]"));
}

#[test]
fn test_local_type_is_a_fatal_error() {
    let json = r#"{ "symbols": [
        { "name": "Host", "kind": "type", "declaration": "class" },
        { "name": "Run", "kind": "method", "containing": 0 },
        { "name": "LocalId", "kind": "type", "declaration": "struct", "containing": 1,
          "attributes": [ { "name": "StronglyTypedId", "arguments": [ { "type": "int" }, true, true, true, true, true ] } ] }
    ] }"#;
    let (result, _) = run_with(&Generator::new(options(false)), json, &CancellationToken::new());
    assert!(matches!(result, Err(TypedIdError::MalformedNesting { ref symbol, .. }) if symbol == "Run"));
}

#[test]
fn test_cancelled_pass_commits_nothing() {
    let token = CancellationToken::new();
    token.cancel();
    let graph = TypeGraph::from_json(&order_id("struct", ALL_ON, "[]")).unwrap();
    let store = ArtifactStore::new();
    let result = Generator::new(options(true)).execute(&graph, &DiagnosticBag::new(), &store, &token);
    assert!(matches!(result, Err(TypedIdError::Cancelled)));
    assert!(store.is_empty());
}

#[test]
fn test_invalid_graph_fails_before_generation() {
    let json = r#"{ "symbols": [ { "name": "Order Id", "kind": "type", "declaration": "struct" } ] }"#;
    let (result, _) = run_with(&Generator::new(options(true)), json, &CancellationToken::new());
    assert!(matches!(result, Err(TypedIdError::Schema(_))));
}

#[test]
fn test_parallel_and_sequential_passes_agree() {
    let mut symbols = vec![r#"{ "name": "Ids", "kind": "namespace" }"#.to_string()];
    let kinds = ["bool", "byte", "short", "int", "uint", "long", "ulong", "float", "double", "decimal", "string", "System.DateTime", "DateTimeOffset", "Guid"];
    for (i, kind) in kinds.iter().enumerate() {
        symbols.push(format!(
            r#"{{ "name": "Id{}", "kind": "type", "declaration": "{}", "containing": 0,
                 "attributes": [ {{ "name": "StronglyTypedId", "arguments": [ {{ "type": "{}" }}, true, true, true, true, true ] }} ] }}"#,
            i,
            if i % 2 == 0 { "struct" } else { "class" },
            kind
        ));
    }
    let json = format!(r#"{{ "symbols": [ {} ] }}"#, symbols.join(","));

    let token = CancellationToken::new();
    let (parallel, d1) = run_with(&Generator::new(options(true)), &json, &token);
    let (sequential, d2) = run_with(&Generator::new(options(false)), &json, &token);
    let parallel = parallel.unwrap();
    assert_eq!(parallel.len(), kinds.len());
    assert_eq!(parallel, sequential.unwrap());
    assert!(d1.is_empty() && d2.is_empty());
    assert!(!parallel["Ids.Id6.g.cs"].contains("BsonSerializer"));
}

#[test]
fn test_post_initialize_registers_attribute_definition() {
    let store = ArtifactStore::new();
    Generator::default().post_initialize(&store).unwrap();
    assert_eq!(store.names(), vec!["StronglyTypedIdAttribute.g.cs"]);
    assert!(store.get("StronglyTypedIdAttribute.g.cs").unwrap().contains("class StronglyTypedIdAttribute"));

    let store = ArtifactStore::new();
    Generator::new(options(true)).post_initialize(&store).unwrap();
    assert!(store.is_empty());
}
