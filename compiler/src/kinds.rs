//! The closed set of underlying kinds a strongly-typed id can wrap, and the
//! C# expressions each one uses for formatting, parsing and serialization.

use serde::Serialize;
use typed_id_schema::TypeIdentity;

const INVARIANT:       &str = "global::System.Globalization.CultureInfo.InvariantCulture";
const NUMBER_STYLES:   &str = "global::System.Globalization.NumberStyles";
const DATETIME_STYLES: &str = "global::System.Globalization.DateTimeStyles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IdKind {
    Boolean,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    DateTime,
    DateTimeOffset,
    Guid,
}

/// How a kind is parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseRule {
    /// `T.Parse(s)` / `T.TryParse(s, out v)`, already culture independent.
    Plain,
    /// `T.Parse(s, styles, invariant)`.
    Number(&'static str),
    /// `T.Parse(s, invariant, styles)`.
    Date(&'static str),
    /// The text is the value.
    Identity,
}

impl IdKind {
    pub const ALL: [IdKind; 16] = [
        IdKind::Boolean,
        IdKind::Byte,
        IdKind::SByte,
        IdKind::Int16,
        IdKind::UInt16,
        IdKind::Int32,
        IdKind::UInt32,
        IdKind::Int64,
        IdKind::UInt64,
        IdKind::Single,
        IdKind::Double,
        IdKind::Decimal,
        IdKind::String,
        IdKind::DateTime,
        IdKind::DateTimeOffset,
        IdKind::Guid,
    ];

    /// Exact identity lookup; anything outside the table is unsupported.
    pub fn from_identity(identity: &TypeIdentity) -> Option<IdKind> {
        IdKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.metadata_name() == identity.as_str())
    }

    pub fn metadata_name(self) -> &'static str {
        match self {
            IdKind::Boolean        => "System.Boolean",
            IdKind::Byte           => "System.Byte",
            IdKind::SByte          => "System.SByte",
            IdKind::Int16          => "System.Int16",
            IdKind::UInt16         => "System.UInt16",
            IdKind::Int32          => "System.Int32",
            IdKind::UInt32         => "System.UInt32",
            IdKind::Int64          => "System.Int64",
            IdKind::UInt64         => "System.UInt64",
            IdKind::Single         => "System.Single",
            IdKind::Double         => "System.Double",
            IdKind::Decimal        => "System.Decimal",
            IdKind::String         => "System.String",
            IdKind::DateTime       => "System.DateTime",
            IdKind::DateTimeOffset => "System.DateTimeOffset",
            IdKind::Guid           => "System.Guid",
        }
    }

    pub fn identity(self) -> TypeIdentity {
        TypeIdentity::from_metadata_name(self.metadata_name())
    }

    /// Type syntax used in generated code.
    pub fn type_syntax(self) -> &'static str {
        match self {
            IdKind::Boolean        => "bool",
            IdKind::Byte           => "byte",
            IdKind::SByte          => "sbyte",
            IdKind::Int16          => "short",
            IdKind::UInt16         => "ushort",
            IdKind::Int32          => "int",
            IdKind::UInt32         => "uint",
            IdKind::Int64          => "long",
            IdKind::UInt64         => "ulong",
            IdKind::Single         => "float",
            IdKind::Double         => "double",
            IdKind::Decimal        => "decimal",
            IdKind::String         => "string",
            IdKind::DateTime       => "global::System.DateTime",
            IdKind::DateTimeOffset => "global::System.DateTimeOffset",
            IdKind::Guid           => "global::System.Guid",
        }
    }

    /// Only `string` admits a null representation.
    pub fn is_nullable(self) -> bool {
        self == IdKind::String
    }

    /// Type syntax including the nullable annotation where it applies.
    pub fn value_type_syntax(self) -> String {
        if self.is_nullable() {
            format!("{}?", self.type_syntax())
        } else {
            self.type_syntax().to_string()
        }
    }

    fn parse_rule(self) -> ParseRule {
        match self {
            IdKind::Boolean | IdKind::Guid => ParseRule::Plain,
            IdKind::Byte
            | IdKind::SByte
            | IdKind::Int16
            | IdKind::UInt16
            | IdKind::Int32
            | IdKind::UInt32
            | IdKind::Int64
            | IdKind::UInt64 => ParseRule::Number("Integer"),
            IdKind::Single | IdKind::Double => ParseRule::Number("Float | AllowThousands"),
            IdKind::Decimal         => ParseRule::Number("Number"),
            IdKind::DateTime        => ParseRule::Date("RoundtripKind"),
            IdKind::DateTimeOffset  => ParseRule::Date("None"),
            IdKind::String          => ParseRule::Identity,
        }
    }

    fn styles(prefix: &str, styles: &str) -> String {
        styles
            .split(" | ")
            .map(|s| format!("{}.{}", prefix, s))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Round-trippable, culture-invariant text of `value`.
    pub fn format_expression(self, value: &str) -> String {
        match self {
            IdKind::String => value.to_string(),
            IdKind::Guid   => format!("{}.ToString(\"D\")", value),
            IdKind::Single | IdKind::Double => format!("{}.ToString(\"R\", {})", value, INVARIANT),
            IdKind::DateTime | IdKind::DateTimeOffset => format!("{}.ToString(\"o\", {})", value, INVARIANT),
            _ => format!("{}.ToString({})", value, INVARIANT),
        }
    }

    /// Expression parsing the text `input` into the primitive; throws as the
    /// primitive's own parser does.
    pub fn parse_expression(self, input: &str) -> String {
        let ty = self.type_syntax();
        match self.parse_rule() {
            ParseRule::Plain          => format!("{}.Parse({})", ty, input),
            ParseRule::Number(styles) => format!(
                "{}.Parse({}, {}, {})",
                ty,
                input,
                IdKind::styles(NUMBER_STYLES, styles),
                INVARIANT
            ),
            ParseRule::Date(styles)   => format!(
                "{}.Parse({}, {}, {})",
                ty,
                input,
                INVARIANT,
                IdKind::styles(DATETIME_STYLES, styles)
            ),
            ParseRule::Identity       => input.to_string(),
        }
    }

    /// Boolean expression trying to parse `input` into the fresh variable
    /// `output`. `None` for `string`, which needs no parsing.
    pub fn try_parse_expression(self, input: &str, output: &str) -> Option<String> {
        let ty = self.type_syntax();
        match self.parse_rule() {
            ParseRule::Plain          => Some(format!("{}.TryParse({}, out var {})", ty, input, output)),
            ParseRule::Number(styles) => Some(format!(
                "{}.TryParse({}, {}, {}, out var {})",
                ty,
                input,
                IdKind::styles(NUMBER_STYLES, styles),
                INVARIANT,
                output
            )),
            ParseRule::Date(styles)   => Some(format!(
                "{}.TryParse({}, {}, {}, out var {})",
                ty,
                input,
                INVARIANT,
                IdKind::styles(DATETIME_STYLES, styles),
                output
            )),
            ParseRule::Identity       => None,
        }
    }

    /// Equality of two stored primitives.
    pub fn equals_expression(self, left: &str, right: &str) -> String {
        match self {
            IdKind::String => format!(
                "string.Equals({}, {}, global::System.StringComparison.Ordinal)",
                left, right
            ),
            _ => format!("{}.Equals({})", left, right),
        }
    }

    /// Hash code of a stored primitive, consistent with `equals_expression`.
    pub fn hash_expression(self, value: &str) -> String {
        match self {
            IdKind::String => format!(
                "{} == null ? 0 : global::System.StringComparer.Ordinal.GetHashCode({})",
                value, value
            ),
            _ => format!("{}.GetHashCode()", value),
        }
    }
}
