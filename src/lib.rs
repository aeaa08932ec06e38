//! # myemma
//!
//! > **A local object model for the Emma email-marketing API.**
//!
//! Remote resources (accounts, members, groups, mailings) are represented as
//! local objects. Related collections are fetched lazily, at most once, and
//! cached by a natural key. Operations that need an identifying attribute
//! check for it before any request is made.
//!
//! ## 🏗️ Layers
//!
//! ### 1. The Engine ([`resource_framework`])
//! Service-agnostic: the [`Adapter`](resource_framework::Adapter) seam, the
//! [`RemoteEntity`](resource_framework::RemoteEntity) trait and the fetch-once
//! [`LazyCollection`](resource_framework::LazyCollection).
//!
//! ### 2. The Root ([`account`])
//! [`Account`] owns the adapter, the [field catalog](fields) and the
//! account-wide collections. Entities hold an [`AccountClient`] handle to it.
//!
//! ### 3. The Resources ([`model`], [`member`])
//! [`Member`], [`Group`] and [`Mailing`] wrap raw attribute maps. A member
//! exposes [`groups`](Member::groups) and [`mailings`](Member::mailings) views
//! and the remote operations (`save`, `opt_out`, `get_opt_out_detail`,
//! `delete`).
//!
//! ### 4. The Edges ([`http`], [`config`])
//! [`HttpAdapter`] is the production transport; [`EmmaConfig`] loads
//! credentials from `emma.yaml` and `EMMA_*` environment variables.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use myemma::{Account, Credentials, MemberError, SaveOptions};
//! use resource_framework::mock::MockAdapter;
//! use resource_framework::RemoteEntity;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MemberError> {
//!     let mock = MockAdapter::new();
//!     mock.respond_with(json!({"member_id": 1024, "status": "a", "added": true}));
//!
//!     let account = Account::new(Credentials::new("100", "public", "private"), mock.clone());
//!     let mut member = account.new_member(Default::default());
//!     member.set_attribute("email", json!("test@example.com"));
//!
//!     member.save(SaveOptions::new()).await?;
//!     assert_eq!(member["member_id"], 1024);
//!     assert_eq!(member["status_code"], "a");
//!     Ok(())
//! }
//! ```
//!
//! ## 🧪 Testing
//!
//! Everything above the transport is tested against
//! [`MockAdapter`](resource_framework::mock::MockAdapter); [`HttpAdapter`] is
//! tested against a local stub server.

pub mod account;
pub mod config;
pub mod fields;
pub mod http;
pub mod member;
pub mod model;

pub use account::{Account, AccountClient, AccountCollection, AccountError, Credentials};
pub use config::{ConfigError, EmmaConfig};
pub use fields::{Field, FieldCatalog, FieldMap};
pub use http::{HttpAdapter, DEFAULT_BASE_URL};
pub use member::{
    MemberCollection, MemberError, MemberGroupCollection, MemberMailingCollection, SaveOptions,
    OPT_OUT,
};
pub use model::{FieldId, Group, Mailing, MailingId, Member, MemberId};
