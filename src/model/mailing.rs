use crate::account::AccountClient;
use crate::member::MemberRelation;
use crate::model::MailingId;
use resource_framework::{Attributes, RemoteEntity, NULL};
use serde_json::Value;
use std::ops::Index;

/// A mailing sent from the account, indexed by its numeric id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mailing {
    attributes: Attributes,
}

impl Mailing {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn id(&self) -> Option<MailingId> {
        self.raw_id().map(MailingId)
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.attributes.get("subject").and_then(Value::as_str)
    }
}

impl RemoteEntity for Mailing {
    type Key = MailingId;
    type Context = AccountClient;
    const KIND: &'static str = "mailing";
    const ID_FIELD: &'static str = "mailing_id";
    const RESOURCE: &'static str = "mailings";

    fn from_response(_account: &AccountClient, attributes: Attributes) -> Self {
        Self::new(attributes)
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn natural_key(&self) -> Option<MailingId> {
        self.id()
    }
}

impl MemberRelation for Mailing {}

impl Index<&str> for Mailing {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.attribute(name).unwrap_or(&NULL)
    }
}
