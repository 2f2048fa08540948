//! Type graph consumed by the typed-id generator.
//!
//! The graph stands in for the host compiler's symbol table: a flat list of
//! symbols (namespaces, type declarations, methods) linked to their containing
//! symbol, each type declaration carrying its bound attributes and its
//! hand-written members.
//!
//! ```
//! use typed_id_schema::*;
//!
//! let graph = TypeGraph::from_json(r#"{
//!   "symbols": [
//!     { "name": "Contoso.Orders", "kind": "namespace" },
//!     { "name": "OrderId", "kind": "type", "declaration": "struct", "containing": 0,
//!       "attributes": [ { "name": "StronglyTypedId",
//!                         "arguments": [ { "type": "int" }, true, true, true, true, true ] } ] }
//!   ]
//! }"#).unwrap();
//!
//! let id = SymbolId(1);
//! assert_eq!(graph.qualified_name(id), "Contoso.Orders.OrderId");
//! assert_eq!(graph.identity_of(&TypeRef::from("int"), Some(id)).as_str(), "System.Int32");
//! assert_eq!(graph.identity_of(&TypeRef::from("OrderId"), Some(id)).as_str(), "Contoso.Orders.OrderId");
//! ```

pub mod attribute;
pub mod error;
pub mod graph;
pub mod member;
pub mod type_ref;
pub mod verifier;

pub use attribute::*;
pub use error::SchemaError;
pub use graph::*;
pub use member::*;
pub use type_ref::*;
pub use verifier::verify_graph;
