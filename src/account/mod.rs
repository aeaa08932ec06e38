//! # Account
//!
//! The root of the model. An [`Account`] owns the one [`Adapter`] every remote
//! call of the account goes through, its field catalog, and the account-wide
//! collections.
//!
//! ## Ownership
//!
//! ```text
//! Account ── client: AccountClient ──▶ Arc<{ credentials, adapter, fields }>
//!    │                                        ▲
//!    ├── members / groups / mailings          │ clone (refcount only)
//!    │                                        │
//!    └── new_member() ──▶ Member ── account ──┘
//! ```
//!
//! Entities hold an [`AccountClient`], a cheap handle to the shared state.
//! The adapter is boxed once at construction and never replaced, so every
//! entity and collection derived from an account uses the same adapter.
//!
//! ## Usage
//!
//! ```rust
//! use myemma::{Account, AccountError, Credentials};
//! use resource_framework::mock::MockAdapter;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AccountError> {
//!     let mock = MockAdapter::new();
//!     mock.respond_with(json!([{"group_id": 7, "group_name": "Newsletter"}]));
//!
//!     let mut account = Account::new(Credentials::new("100", "public", "private"), mock.clone());
//!     assert_eq!(account.groups().len(), 0);
//!
//!     account.groups().fetch_all().await?;
//!     assert_eq!(account.groups()["Newsletter"].id(), Some(7));
//!     Ok(())
//! }
//! ```

pub mod collections;
pub mod error;

pub use collections::*;
pub use error::*;

use crate::config::EmmaConfig;
use crate::fields::{Field, FieldCatalog, FieldMap};
use crate::http::HttpAdapter;
use crate::model::{Group, Mailing, Member};
use resource_framework::{Adapter, Attributes, LazyCollection};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Account id plus the API key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: String,
    pub public_key: String,
    private_key: String,
}

impl Credentials {
    pub fn new(
        account_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

struct AccountShared {
    credentials: Credentials,
    adapter: Box<dyn Adapter>,
    fields: FieldCatalog,
}

/// Shared handle to an account's credentials, adapter and field catalog.
#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<AccountShared>,
}

impl AccountClient {
    fn new(credentials: Credentials, adapter: Box<dyn Adapter>) -> Self {
        Self {
            inner: Arc::new(AccountShared {
                credentials,
                adapter,
                fields: FieldCatalog::new(),
            }),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.inner.credentials.account_id
    }

    pub fn credentials(&self) -> &Credentials {
        &self.inner.credentials
    }

    /// The account's adapter. Every remote call goes through it.
    pub fn adapter(&self) -> &dyn Adapter {
        self.inner.adapter.as_ref()
    }

    /// The field catalog as currently cached; never fetches.
    pub fn fields(&self) -> &FieldCatalog {
        &self.inner.fields
    }

    /// The field catalog, loading it on first use.
    pub async fn field_catalog(&self) -> Result<&FieldMap, AccountError> {
        self.inner.fields.load(self.adapter()).await
    }

    /// Looks a custom field up by shortcut, loading the catalog on first use.
    pub async fn find_field(&self, shortcut: &str) -> Result<Option<&Field>, AccountError> {
        self.inner.fields.find_by_shortcut(self.adapter(), shortcut).await
    }

    /// Whether two handles belong to the same account instance.
    pub fn same_account(&self, other: &AccountClient) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AccountClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountClient")
            .field("account_id", &self.account_id())
            .field("fields_loaded", &self.inner.fields.is_loaded())
            .finish_non_exhaustive()
    }
}

/// A remote account and its account-wide collections.
#[derive(Debug)]
pub struct Account {
    client: AccountClient,
    members: Option<LazyCollection<Member>>,
    groups: Option<LazyCollection<Group>>,
    mailings: Option<LazyCollection<Mailing>>,
}

impl Account {
    /// An account bound to `adapter` for its whole lifetime.
    pub fn new(credentials: Credentials, adapter: impl Adapter + 'static) -> Self {
        Self::with_boxed_adapter(credentials, Box::new(adapter))
    }

    pub fn with_boxed_adapter(credentials: Credentials, adapter: Box<dyn Adapter>) -> Self {
        info!(account_id = %credentials.account_id, "Account created");
        Self {
            client: AccountClient::new(credentials, adapter),
            members: None,
            groups: None,
            mailings: None,
        }
    }

    /// An account talking HTTP to the endpoint described by `config`.
    ///
    /// # Errors
    /// Invalid configuration, or a client that cannot be built.
    pub fn connect(config: &EmmaConfig) -> Result<Self, AccountError> {
        config.validate()?;
        let adapter = HttpAdapter::new(config.credentials(), &config.base_url, config.timeout())?;
        Ok(Self::new(config.credentials(), adapter))
    }

    pub fn client(&self) -> &AccountClient {
        &self.client
    }

    pub fn account_id(&self) -> &str {
        self.client.account_id()
    }

    pub fn fields(&self) -> &FieldCatalog {
        self.client.fields()
    }

    /// A new, unsaved member of this account.
    pub fn new_member(&self, attributes: Attributes) -> Member {
        Member::with_attributes(&self.client, attributes)
    }

    pub fn members(&mut self) -> AccountMemberCollection<'_> {
        let Self {
            client, members, ..
        } = self;
        AccountCollection::new(client, members.get_or_insert_with(LazyCollection::new))
    }

    pub fn groups(&mut self) -> AccountGroupCollection<'_> {
        let Self { client, groups, .. } = self;
        AccountCollection::new(client, groups.get_or_insert_with(LazyCollection::new))
    }

    pub fn mailings(&mut self) -> AccountMailingCollection<'_> {
        let Self {
            client, mailings, ..
        } = self;
        AccountCollection::new(client, mailings.get_or_insert_with(LazyCollection::new))
    }
}
