//! # Member-scoped collections
//!
//! A [`MemberCollection`] is a short-lived view over a cache owned by a
//! [`Member`](crate::model::Member): it pairs the member's cache with the
//! account handle and the member's id *at the time of the call*, so a member
//! saved after creation can fetch its relations without rebuilding anything.
//!
//! Reads go straight to the cache and never fetch. Only
//! [`MemberCollection::fetch_all`] goes to the network, and only once.

use super::MemberError;
use crate::account::AccountClient;
use crate::model::{Group, Mailing, MemberId};
use resource_framework::{LazyCollection, RemoteEntity};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Resources that can be listed under `/members/{id}/`.
pub trait MemberRelation: RemoteEntity<Context = AccountClient> {}

/// A member's related entities, keyed by their natural key.
#[derive(Debug)]
pub struct MemberCollection<'a, T: MemberRelation> {
    account: &'a AccountClient,
    member_id: Option<MemberId>,
    cache: &'a mut LazyCollection<T>,
}

/// A member's groups, keyed by group name.
pub type MemberGroupCollection<'a> = MemberCollection<'a, Group>;

/// A member's mailings, keyed by [`MailingId`](crate::model::MailingId).
pub type MemberMailingCollection<'a> = MemberCollection<'a, Mailing>;

impl<'a, T: MemberRelation> MemberCollection<'a, T> {
    pub(crate) fn new(
        account: &'a AccountClient,
        member_id: Option<MemberId>,
        cache: &'a mut LazyCollection<T>,
    ) -> Self {
        Self {
            account,
            member_id,
            cache,
        }
    }

    /// Id of the member this view belongs to.
    pub fn member_id(&self) -> Option<MemberId> {
        self.member_id
    }

    /// The resource path, once the member has an id.
    pub fn path(&self) -> Option<String> {
        self.member_id
            .map(|id| format!("/members/{id}/{}", T::RESOURCE))
    }

    /// Fetches the relation unless it is already cached.
    ///
    /// # Errors
    /// [`MemberError::NoMemberId`] (no request is made) when the member is
    /// unsaved; otherwise the collection's fetch error.
    pub async fn fetch_all(&mut self) -> Result<&HashMap<T::Key, T>, MemberError> {
        let path = self.path().ok_or(MemberError::NoMemberId)?;
        Ok(self
            .cache
            .fetch_all(self.account.adapter(), &path, self.account)
            .await?)
    }
}

impl<T: MemberRelation> Deref for MemberCollection<'_, T> {
    type Target = LazyCollection<T>;

    fn deref(&self) -> &Self::Target {
        self.cache
    }
}

impl<T: MemberRelation> DerefMut for MemberCollection<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cache
    }
}
