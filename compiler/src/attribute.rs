use crate::{resolver::ATTRIBUTE_NAME, utils::quote};

/// Name of the post-initialization artifact.
pub const ATTRIBUTE_ARTIFACT_NAME: &str = "StronglyTypedIdAttribute.g.cs";

/// Compilation symbol the attribute is conditional on, so annotations are
/// stripped from compiled assemblies unless the symbol is defined.
pub const CONDITIONAL_SYMBOL: &str = "StronglyTypedId_Attributes";

/// Source of the annotation class that users put on their wrapper types.
pub fn attribute_source(tool_name: &str, tool_version: &str) -> String {
    let mut lines = vec![
        "// <auto-generated>".to_string(),
        format!("//     This code was generated by {} {}.", tool_name, tool_version),
        "//     Changes to this file may cause incorrect behavior and will be lost if the code is regenerated.".to_string(),
        "// </auto-generated>".to_string(),
        String::new(),
        format!("[global::System.Diagnostics.Conditional({})]", quote(CONDITIONAL_SYMBOL)),
        "[global::System.AttributeUsage(global::System.AttributeTargets.Struct | global::System.AttributeTargets.Class)]".to_string(),
        format!("internal sealed class {}Attribute : global::System.Attribute", ATTRIBUTE_NAME),
        "{".to_string(),
        "    /// <summary>Marks the type as a strongly-typed id.</summary>".to_string(),
        "    /// <param name=\"idType\">Type of the wrapped value.</param>".to_string(),
    ];

    let parameters = [
        ("generateSystemTextJsonConverter", "Generate a <see cref=\"System.Text.Json.Serialization.JsonConverter\"/>."),
        ("generateNewtonsoftJsonConverter", "Generate a <see cref=\"Newtonsoft.Json.JsonConverter\"/>."),
        ("generateSystemComponentModelTypeConverter", "Generate a <see cref=\"System.ComponentModel.TypeConverter\"/>."),
        ("generateMongoDBBsonSerialization", "Generate a <see cref=\"MongoDB.Bson.Serialization.Serializers.SerializerBase{T}\"/>."),
        ("addCodeGeneratedAttribute", "Tag the generated members with <see cref=\"System.CodeDom.Compiler.GeneratedCodeAttribute\"/>."),
    ];
    for (name, doc) in parameters {
        lines.push(format!("    /// <param name=\"{}\">{}</param>", name, doc));
    }

    lines.push(format!("    public {}Attribute(global::System.Type idType,", ATTRIBUTE_NAME));
    let padding = " ".repeat(format!("    public {}Attribute(", ATTRIBUTE_NAME).len());
    for (i, (name, _)) in parameters.iter().enumerate() {
        let end = if i + 1 == parameters.len() { ")" } else { "," };
        lines.push(format!("{}bool {} = true{}", padding, name, end));
    }
    lines.push("    {".to_string());
    lines.push("    }".to_string());
    lines.push("}".to_string());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_has_six_parameters_with_defaults() {
        let text = attribute_source("typedid", "1.2.3");
        assert!(text.contains("This code was generated by typedid 1.2.3."));
        assert!(text.contains("[global::System.Diagnostics.Conditional(\"StronglyTypedId_Attributes\")]"));
        assert!(text.contains("internal sealed class StronglyTypedIdAttribute : global::System.Attribute"));
        assert!(text.contains("AttributeTargets.Struct | global::System.AttributeTargets.Class"));
        assert_eq!(text.matches("bool ").count(), 5);
        assert_eq!(text.matches(" = true").count(), 5);
        assert!(text.contains("bool addCodeGeneratedAttribute = true)"));
    }
}
