use crate::account::AccountClient;
use crate::member::MemberRelation;
use resource_framework::{Attributes, RemoteEntity, NULL};
use serde_json::Value;
use std::ops::Index;

/// A member group (list) in the account.
///
/// Groups are read-only here: they come back from `/groups` or
/// `/members/{id}/groups` and are indexed by their name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    attributes: Attributes,
}

impl Group {
    /// Wraps caller-supplied attributes. The group is not persisted until the
    /// service assigns it a `group_id`.
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("group_name").and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<i64> {
        self.raw_id()
    }
}

impl RemoteEntity for Group {
    type Key = String;
    type Context = AccountClient;
    const KIND: &'static str = "group";
    const ID_FIELD: &'static str = "group_id";
    const RESOURCE: &'static str = "groups";

    fn from_response(_account: &AccountClient, attributes: Attributes) -> Self {
        Self::new(attributes)
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn natural_key(&self) -> Option<String> {
        self.name().map(str::to_owned)
    }
}

impl MemberRelation for Group {}

impl Index<&str> for Group {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.attribute(name).unwrap_or(&NULL)
    }
}
