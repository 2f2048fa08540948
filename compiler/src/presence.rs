use typed_id_schema::{MemberDecl, MemberKind, SymbolId, TypeGraph, TypeIdentity, TypeKind, TypeRef};

use crate::{
    kinds::IdKind,
    types::{Candidate, ExistingMembers, GeneratableMember},
};

pub const FIELD_NAME: &str = "_value";
pub const VALUE_PROPERTY_NAME: &str = "Value";
pub const VALUE_AS_STRING_PROPERTY_NAME: &str = "ValueAsString";

const STRING: &str = "System.String";
const INT32: &str = "System.Int32";
const BOOLEAN: &str = "System.Boolean";
const OBJECT: &str = "System.Object";

/// Binds member signatures of one candidate.
struct SignatureMatcher<'a> {
    graph:  &'a TypeGraph,
    scope:  SymbolId,
    itself: TypeIdentity,
}

impl<'a> SignatureMatcher<'a> {
    fn identity(&self, type_ref: &TypeRef) -> TypeIdentity {
        self.graph.identity_of(type_ref, Some(self.scope))
    }

    fn is(&self, type_ref: Option<&TypeRef>, expected: &TypeIdentity) -> bool {
        type_ref.map(|t| &self.identity(t) == expected).unwrap_or(false)
    }

    fn returns(&self, member: &MemberDecl, metadata_name: &str) -> bool {
        self.is(member.return_type.as_ref(), &TypeIdentity::from_metadata_name(metadata_name))
    }

    fn parameters_are(&self, member: &MemberDecl, expected: &[&TypeIdentity]) -> bool {
        member.parameters.len() == expected.len()
            && member
                .parameters
                .iter()
                .zip(expected)
                .all(|(p, e)| &self.identity(p) == *e)
    }

    fn instance_method<'m>(&self, members: &'m [MemberDecl], name: &'m str) -> impl Iterator<Item = &'m MemberDecl> {
        members
            .iter()
            .filter(move |m| m.kind == MemberKind::Method && m.name == name && !m.is_static())
    }
}

/// Determines which generatable members `candidate` already declares.
///
/// Methods and operators match on full signature, so an unrelated overload
/// does not suppress the canonical member. `TryParse` and `Parse` only match
/// on name and staticness since their overload shapes vary by kind. Fields
/// and properties match on name alone, as nothing else may share it.
pub fn analyze_members(graph: &TypeGraph, candidate: &Candidate<'_>, kind: IdKind) -> ExistingMembers {
    let matcher = SignatureMatcher {
        graph,
        scope:  candidate.id,
        itself: graph.identity_of_symbol(candidate.id),
    };
    let members    = candidate.members;
    let underlying = kind.identity();
    let object     = TypeIdentity::from_metadata_name(OBJECT);
    let mut existing = ExistingMembers::default();

    let named = |name: &str| members.iter().any(|m| m.name == name && m.kind != MemberKind::Constructor);

    if members.iter().any(|m| {
        m.kind == MemberKind::Constructor && !m.is_static() && matcher.parameters_are(m, &[&underlying])
    }) {
        existing.insert(GeneratableMember::Constructor);
    }
    if named(FIELD_NAME) {
        existing.insert(GeneratableMember::Field);
    }
    if named(VALUE_PROPERTY_NAME) {
        existing.insert(GeneratableMember::Value);
    }
    if named(VALUE_AS_STRING_PROPERTY_NAME) {
        existing.insert(GeneratableMember::ValueAsString);
    }
    if matcher
        .instance_method(members, "ToString")
        .any(|m| m.parameters.is_empty() && matcher.returns(m, STRING))
    {
        existing.insert(GeneratableMember::ToString);
    }
    if matcher
        .instance_method(members, "GetHashCode")
        .any(|m| m.parameters.is_empty() && matcher.returns(m, INT32))
    {
        existing.insert(GeneratableMember::GetHashCode);
    }
    if matcher
        .instance_method(members, "Equals")
        .any(|m| matcher.parameters_are(m, &[&object]) && matcher.returns(m, BOOLEAN))
    {
        existing.insert(GeneratableMember::EqualsObject);
    }
    if matcher
        .instance_method(members, "Equals")
        .any(|m| matcher.parameters_are(m, &[&matcher.itself]) && matcher.returns(m, BOOLEAN))
    {
        existing.insert(GeneratableMember::EqualsTyped);
    }

    let operator = |token: &str| {
        members.iter().any(|m| {
            m.kind == MemberKind::Operator
                && m.name == token
                && matcher.parameters_are(m, &[&matcher.itself, &matcher.itself])
                && matcher.returns(m, BOOLEAN)
        })
    };
    if operator("==") {
        existing.insert(GeneratableMember::EqualityOperator);
    }
    if operator("!=") {
        existing.insert(GeneratableMember::InequalityOperator);
    }

    let static_method = |name: &str| {
        members
            .iter()
            .any(|m| m.kind == MemberKind::Method && m.name == name && m.is_static())
    };
    if static_method("TryParse") {
        existing.insert(GeneratableMember::TryParse);
    }
    if static_method("Parse") {
        existing.insert(GeneratableMember::Parse);
    }

    for member in synthesized_members(candidate.kind) {
        existing.insert(*member);
    }

    existing
}

/// Members the compiler declares implicitly for a declaration kind.
pub fn synthesized_members(kind: TypeKind) -> &'static [GeneratableMember] {
    match kind {
        TypeKind::Record => &[
            GeneratableMember::ToString,
            GeneratableMember::GetHashCode,
            GeneratableMember::EqualsObject,
            GeneratableMember::EqualsTyped,
            GeneratableMember::EqualityOperator,
            GeneratableMember::InequalityOperator,
        ],
        _ => &[],
    }
}
