use crate::account::AccountClient;
use crate::member::{MemberCollection, MemberGroupCollection, MemberMailingCollection};
use crate::model::{Group, Mailing, MemberId};
use resource_framework::{Attributes, LazyCollection, RemoteEntity, NULL};
use serde_json::Value;
use std::ops::Index;

/// Attribute holding the nested custom-field mapping.
pub const FIELDS: &str = "fields";

/// Attribute names that live at the top level of a member record. Anything
/// else is a custom field.
pub const MEMBER_ATTRIBUTES: &[&str] = &[
    "member_id",
    "account_id",
    "email",
    "status",
    "status_code",
    "added",
    "member_since",
    "last_modified_at",
    "deleted_at",
    "plaintext_preferred",
    "confirmed_opt_in",
    "member_status_id",
    "error",
    FIELDS,
];

/// How a name passed to [`Member::attribute`] / [`Member::set_attribute`] is
/// routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKey<'a> {
    /// A custom field known to the account's field catalog; lives under `fields`.
    Shortcut(&'a str),
    /// Anything else; lives at the top level.
    Raw(&'a str),
}

/// A subscriber in the account.
///
/// # Lifecycle
/// A member built with [`Member::new`] or [`Member::with_attributes`] is local
/// only; it gains a `member_id` when [`Member::save`] succeeds. A member built
/// from a response (e.g. by a collection) is already persisted. Dropping a
/// member never deletes anything remotely.
///
/// # Related collections
/// [`Member::groups`] and [`Member::mailings`] hand out views over caches that
/// are created on first access and kept on the member for its lifetime, so a
/// relation is fetched at most once per member.
#[derive(Debug)]
pub struct Member {
    pub(crate) account: AccountClient,
    pub(crate) attributes: Attributes,
    groups: Option<LazyCollection<Group>>,
    mailings: Option<LazyCollection<Mailing>>,
}

impl Member {
    /// An empty, unsaved member.
    pub fn new(account: &AccountClient) -> Self {
        Self::with_attributes(account, Attributes::new())
    }

    /// A member wrapping the given attributes.
    pub fn with_attributes(account: &AccountClient, attributes: Attributes) -> Self {
        Self {
            account: account.clone(),
            attributes,
            groups: None,
            mailings: None,
        }
    }

    pub fn account(&self) -> &AccountClient {
        &self.account
    }

    pub fn id(&self) -> Option<MemberId> {
        self.raw_id().map(MemberId)
    }

    pub fn email(&self) -> Option<&str> {
        self.attributes.get("email").and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.attributes.get("status").and_then(Value::as_str)
    }

    /// The nested custom-field mapping, if any.
    pub fn custom_fields(&self) -> Option<&Attributes> {
        self.attributes.get(FIELDS).and_then(Value::as_object)
    }

    /// Two-tier routing: catalog shortcuts first, raw names otherwise.
    ///
    /// Only an already-loaded catalog is consulted; use
    /// [`Member::set_field`] to force a catalog load.
    pub fn key_for<'a>(&self, name: &'a str) -> AttributeKey<'a> {
        if self.account.fields().is_shortcut(name) {
            AttributeKey::Shortcut(name)
        } else {
            AttributeKey::Raw(name)
        }
    }

    /// Stores a custom field under `fields`, dropping any stale top-level
    /// entry of the same name.
    pub(crate) fn insert_custom_field(&mut self, name: &str, value: Value) {
        if name != FIELDS && !MEMBER_ATTRIBUTES.contains(&name) {
            self.attributes.remove(name);
        }
        let mut fields = match self.attributes.remove(FIELDS) {
            Some(Value::Object(fields)) => fields,
            _ => Attributes::new(),
        };
        fields.insert(name.to_owned(), value);
        self.attributes.insert(FIELDS.to_owned(), Value::Object(fields));
    }

    /// The groups this member belongs to.
    pub fn groups(&mut self) -> MemberGroupCollection<'_> {
        let member_id = self.id();
        let Self { account, groups, .. } = self;
        MemberCollection::new(account, member_id, groups.get_or_insert_with(LazyCollection::new))
    }

    /// The mailings this member has been sent.
    pub fn mailings(&mut self) -> MemberMailingCollection<'_> {
        let member_id = self.id();
        let Self {
            account, mailings, ..
        } = self;
        MemberCollection::new(account, member_id, mailings.get_or_insert_with(LazyCollection::new))
    }
}

impl RemoteEntity for Member {
    type Key = MemberId;
    type Context = AccountClient;
    const KIND: &'static str = "member";
    const ID_FIELD: &'static str = "member_id";
    const RESOURCE: &'static str = "members";

    fn from_response(account: &AccountClient, attributes: Attributes) -> Self {
        Self::with_attributes(account, attributes)
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn natural_key(&self) -> Option<MemberId> {
        self.id()
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        let nested = move || self.custom_fields().and_then(|fields| fields.get(name));
        match self.key_for(name) {
            AttributeKey::Shortcut(name) => nested().or_else(|| self.attributes.get(name)),
            AttributeKey::Raw(name) => self.attributes.get(name).or_else(nested),
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) {
        match self.key_for(name) {
            AttributeKey::Shortcut(name) => self.insert_custom_field(name, value),
            AttributeKey::Raw(name) => {
                self.attributes.insert(name.to_owned(), value);
            }
        }
    }
}

impl Index<&str> for Member {
    type Output = Value;

    /// Absent attributes read as `Value::Null`.
    fn index(&self, name: &str) -> &Value {
        self.attribute(name).unwrap_or(&NULL)
    }
}
