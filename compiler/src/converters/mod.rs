//! Serialization adapters. Each emitter is gated by one converter toggle of
//! the descriptor and adds a nested adapter type plus the attribute binding it
//! to the wrapper. Emitters are independent of each other.

mod mongodb_bson;
mod newtonsoft_json;
mod system_text_json;
mod type_converter;

pub use mongodb_bson::MongoDbBsonEmitter;
pub use newtonsoft_json::NewtonsoftJsonEmitter;
pub use system_text_json::SystemTextJsonEmitter;
pub use type_converter::TypeConverterEmitter;

use log::debug;

use crate::{
    codedom::{Modifier, TypeDeclaration},
    members::EmitContext,
    types::Converter,
};
use typed_id_schema::TypeKind;

pub trait ConverterEmitter: Send + Sync {
    fn converter(&self) -> Converter;

    /// Adds the adapter to `wrapper`. Returns `false` when the underlying
    /// kind has no representation in the target framework.
    fn emit(&self, context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) -> bool;
}

/// Every built-in emitter, in the order their adapters are emitted.
pub fn default_emitters() -> Vec<Box<dyn ConverterEmitter>> {
    vec![
        Box::new(TypeConverterEmitter),
        Box::new(SystemTextJsonEmitter),
        Box::new(NewtonsoftJsonEmitter),
        Box::new(MongoDbBsonEmitter),
    ]
}

/// Runs each emitter whose converter the descriptor requests.
pub fn emit_converters(emitters: &[Box<dyn ConverterEmitter>], context: &EmitContext<'_>, wrapper: &mut TypeDeclaration) {
    for emitter in emitters {
        let converter = emitter.converter();
        if !context.descriptor.converters.contains(converter) {
            continue;
        }
        if emitter.emit(context, wrapper) {
            debug!("{}: emitted {:?} adapter", context.candidate.qualified_name, converter);
        } else {
            debug!(
                "{}: {:?} adapter skipped for {:?}",
                context.candidate.qualified_name,
                converter,
                context.kind()
            );
        }
    }
}

/// Declares the nested adapter class and binds it to the wrapper with
/// `[binding(typeof(Adapter))]`.
pub(crate) fn bind_adapter(
    context: &EmitContext<'_>,
    wrapper: &mut TypeDeclaration,
    suffix: &str,
    base_type: &str,
    binding: &str,
) -> TypeDeclaration {
    let name = context.nested_type_name(suffix);
    wrapper.add_attribute(&format!("{}(typeof({}))", binding, name));
    let mut adapter = TypeDeclaration::new(TypeKind::Class, &name, &[Modifier::Public, Modifier::Sealed]);
    adapter.add_base_type(base_type);
    adapter
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        codedom::{Body, Member, TypeDeclaration},
        kinds::IdKind,
        types::{Candidate, Converters, Descriptor},
    };
    use typed_id_schema::{SymbolId, TypeKind, TypeRef};

    pub fn candidate(kind: TypeKind) -> Candidate<'static> {
        Candidate {
            id:             SymbolId(0),
            name:           "OrderId".into(),
            qualified_name: "Contoso.OrderId".into(),
            kind,
            is_sealed:      false,
            attributes:     &[],
            members:        &[],
            location:       None,
        }
    }

    pub fn descriptor(kind: IdKind) -> Descriptor {
        Descriptor {
            kind,
            id_type:        TypeRef::from(kind.type_syntax()),
            converters:     Converters::all(),
            mark_generated: false,
            location:       None,
        }
    }

    /// Concatenated block statements and expression of the adapter member.
    pub fn body_of(adapter: &TypeDeclaration, name: &str) -> String {
        let member: &Member = adapter
            .member(name)
            .unwrap_or_else(|| panic!("no member {} in {}", name, adapter.name));
        match &member.body {
            Some(Body::Block(lines)) => lines.join("\n"),
            Some(Body::Expression(e)) => e.clone(),
            None => String::new(),
        }
    }
}
