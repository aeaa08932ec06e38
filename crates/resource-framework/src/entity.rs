//! # RemoteEntity Trait
//!
//! The `RemoteEntity` trait is the contract every remote resource (member, group,
//! mailing, ...) implements so the generic [`LazyCollection`](crate::LazyCollection)
//! can build, index and cache it. An entity is a thin wrapper around the raw
//! attribute mapping the service returns, plus enough metadata to find its
//! identity.
//!
//! # Identity
//! Each entity names the attribute that carries its numeric id (`ID_FIELD`).
//! An entity built from caller-supplied attributes usually has no id yet; it
//! gains one once the service has persisted it. Operations that need the id
//! must check [`RemoteEntity::raw_id`] before going to the network.
//!
//! # Natural keys
//! Collections index entities by a *natural key*, which is not always the id
//! (groups are looked up by name, mailings by id). `natural_key` returns `None`
//! when the attributes don't carry it.
//!
//! # Provided Methods
//! [`RemoteEntity::attribute`] and [`RemoteEntity::set_attribute`] read and write
//! the top-level mapping. Entities that redirect some names elsewhere (custom
//! member fields) override both.

use serde_json::{Map, Value};
use std::fmt::Debug;
use std::hash::Hash;

/// Raw attribute mapping backing every entity.
pub type Attributes = Map<String, Value>;

/// Trait that any remote resource must implement to be cached by a collection.
pub trait RemoteEntity: Debug + Send + Sync + Sized {
    /// The key the entity is indexed by inside a collection.
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Whatever the entity needs at construction (e.g. a handle to its
    /// account). Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// Label used in logs and error messages.
    const KIND: &'static str;

    /// Attribute holding the numeric id.
    const ID_FIELD: &'static str;

    /// Path segment of the resource (`groups` in `/members/1/groups`).
    const RESOURCE: &'static str;

    /// Builds the entity from a decoded response row.
    fn from_response(ctx: &Self::Context, attributes: Attributes) -> Self;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Key used to index this entity, if its attributes carry one.
    fn natural_key(&self) -> Option<Self::Key>;

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes().get(name)
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        self.attributes_mut().insert(name.to_owned(), value);
    }

    /// The numeric id, if the entity has been persisted.
    fn raw_id(&self) -> Option<i64> {
        self.attributes().get(Self::ID_FIELD).and_then(Value::as_i64)
    }

    fn is_persisted(&self) -> bool {
        self.raw_id().is_some()
    }
}

/// Shared `Value::Null` returned by `Index` impls for absent attributes.
pub static NULL: Value = Value::Null;
