//! Remote operations on a [`Member`].
//!
//! Every operation checks its local precondition first and returns a
//! `NoMember*` error without touching the adapter when it fails. Local state
//! only changes after the service has answered successfully.

use super::{MemberError, SaveOptions};
use crate::model::{Member, FIELDS, MEMBER_ATTRIBUTES};
use resource_framework::{is_truthy, Params};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Status value of a member who has opted out.
pub const OPT_OUT: &str = "opt-out";

/// Bookkeeping merged in from a `/members/add` reply; never sent back.
const REPLY_ATTRIBUTES: &[&str] = &["member_id", "status_code", "added"];

/// Email as a single path segment. `@` is a valid path character and is kept.
fn email_segment(email: &str) -> String {
    urlencoding::encode(email).replace("%40", "@")
}

impl Member {
    /// Stores a custom field by its shortcut name.
    ///
    /// Loads the account's field catalog on first use.
    ///
    /// # Errors
    /// [`MemberError::UnknownField`] if the catalog has no such shortcut, or the
    /// catalog load error.
    #[instrument(skip(self, value))]
    pub async fn set_field(&mut self, shortcut: &str, value: Value) -> Result<(), MemberError> {
        let known = self.account.find_field(shortcut).await?.is_some();
        if !known {
            return Err(MemberError::UnknownField(shortcut.to_owned()));
        }
        self.insert_custom_field(shortcut, value);
        Ok(())
    }

    /// Request body for `/members/add`: recognised attributes verbatim, every
    /// other attribute nested under `fields`, options merged on top.
    ///
    /// Values already nested under `fields` win over top-level ones of the
    /// same name. Attributes only ever set from a save reply are left out.
    pub fn save_body(&self, options: SaveOptions) -> Params {
        let mut body = Params::new();
        let mut custom = Params::new();

        for (name, value) in &self.attributes {
            if name == FIELDS || REPLY_ATTRIBUTES.contains(&name.as_str()) {
                continue;
            }
            if MEMBER_ATTRIBUTES.contains(&name.as_str()) {
                body.insert(name.clone(), value.clone());
            } else {
                custom.insert(name.clone(), value.clone());
            }
        }
        if let Some(nested) = self.custom_fields() {
            custom.extend(nested.iter().map(|(name, value)| (name.clone(), value.clone())));
        }

        if !custom.is_empty() {
            body.insert(FIELDS.to_owned(), Value::Object(custom));
        }
        options.merge_into(&mut body);
        body
    }

    /// Adds (or updates) the member remotely via POST `/members/add`.
    ///
    /// On success the reply's `member_id`, `status` (stored as `status_code`)
    /// and `added` are merged into the member.
    ///
    /// # Errors
    /// [`MemberError::NoMemberEmail`] without an email; adapter errors; a
    /// non-object reply.
    #[instrument(skip(self, options), fields(email = ?self.email()))]
    pub async fn save(&mut self, options: SaveOptions) -> Result<(), MemberError> {
        if self.email().is_none() {
            return Err(MemberError::NoMemberEmail);
        }

        let path = "/members/add";
        let body = self.save_body(options);
        debug!(?body, "Saving member");
        let reply = self.account.adapter().post(path, &body).await?;

        let Value::Object(reply) = reply else {
            return Err(MemberError::UnexpectedResponse {
                path: path.to_owned(),
                expected: "object",
            });
        };
        for (from, to) in [("member_id", "member_id"), ("status", "status_code"), ("added", "added")] {
            if let Some(value) = reply.get(from) {
                self.attributes.insert(to.to_owned(), value.clone());
            }
        }
        info!(member_id = ?self.id(), "Member saved");
        Ok(())
    }

    /// Opt-out history of the member, GET `/members/{id}/optout`.
    ///
    /// # Errors
    /// [`MemberError::NoMemberId`] for an unsaved member; adapter errors; a
    /// non-list reply.
    #[instrument(skip(self), fields(member_id = ?self.id()))]
    pub async fn get_opt_out_detail(&self) -> Result<Vec<Value>, MemberError> {
        let member_id = self.id().ok_or(MemberError::NoMemberId)?;
        let path = format!("/members/{member_id}/optout");
        match self.account.adapter().get(&path, &Params::new()).await? {
            Value::Array(detail) => Ok(detail),
            _ => Err(MemberError::UnexpectedResponse {
                path,
                expected: "array",
            }),
        }
    }

    /// Whether the local status is `opt-out`. Never touches the network.
    ///
    /// # Errors
    /// [`MemberError::NoMemberStatus`] if there is no status attribute.
    pub fn has_opted_out(&self) -> Result<bool, MemberError> {
        let status = self.attributes.get("status").ok_or(MemberError::NoMemberStatus)?;
        Ok(*status == OPT_OUT)
    }

    /// Opts the member out by email, PUT `/members/email/optout/{email}`.
    ///
    /// A truthy reply sets the local status to `opt-out`.
    ///
    /// # Errors
    /// [`MemberError::NoMemberEmail`] without an email; adapter errors.
    #[instrument(skip(self), fields(email = ?self.email()))]
    pub async fn opt_out(&mut self) -> Result<(), MemberError> {
        let email = self.email().ok_or(MemberError::NoMemberEmail)?;
        let path = format!("/members/email/optout/{}", email_segment(email));
        let reply = self.account.adapter().put(&path, &Params::new()).await?;
        if is_truthy(&reply) {
            self.attributes.insert("status".to_owned(), Value::from(OPT_OUT));
            info!("Member opted out");
        } else {
            debug!(?reply, "Opt-out not acknowledged");
        }
        Ok(())
    }

    /// Deletes the member remotely, DELETE `/members/{id}`.
    ///
    /// Returns whether the service acknowledged the delete. The local object is
    /// left untouched.
    ///
    /// # Errors
    /// [`MemberError::NoMemberId`] for an unsaved member; adapter errors.
    #[instrument(skip(self), fields(member_id = ?self.id()))]
    pub async fn delete(&self) -> Result<bool, MemberError> {
        let member_id = self.id().ok_or(MemberError::NoMemberId)?;
        let reply = self
            .account
            .adapter()
            .delete(&format!("/members/{member_id}"), &Params::new())
            .await?;
        Ok(is_truthy(&reply))
    }
}
