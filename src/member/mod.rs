//! # Member
//!
//! Behaviour of the [`Member`](crate::model::Member) resource: saving, opt-out
//! handling, custom fields and the member-scoped group/mailing collections.
//!
//! ## Structure
//!
//! - [`operations`] - remote operations (`save`, `opt_out`, `get_opt_out_detail`, `delete`)
//! - [`collections`] - [`MemberGroupCollection`] and [`MemberMailingCollection`]
//! - [`options`] - [`SaveOptions`] for `save`
//! - [`error`] - [`MemberError`] for type-safe error handling
//!
//! ## Usage
//!
//! ```rust
//! use myemma::{Account, Credentials, MemberError};
//! use resource_framework::mock::MockAdapter;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), MemberError> {
//!     let mock = MockAdapter::new();
//!     mock.respond_with(json!([{"group_name": "Newsletter"}]));
//!
//!     let account = Account::new(Credentials::new("100", "public", "private"), mock.clone());
//!     let mut member = account.new_member(
//!         json!({"member_id": 1000, "email": "test@example.com"})
//!             .as_object()
//!             .cloned()
//!             .unwrap_or_default(),
//!     );
//!
//!     let mut groups = member.groups();
//!     assert_eq!(groups.len(), 0);
//!     groups.fetch_all().await?;
//!     assert!(groups.contains_key("Newsletter"));
//!
//!     // cached: no second request
//!     groups.fetch_all().await?;
//!     assert_eq!(mock.call_count(), 1);
//!     Ok(())
//! }
//! ```

pub mod collections;
pub mod error;
pub mod operations;
pub mod options;

pub use collections::*;
pub use error::*;
pub use operations::OPT_OUT;
pub use options::*;
