use super::{AccountClient, AccountError};
use crate::model::{Group, Mailing, Member};
use resource_framework::{LazyCollection, RemoteEntity};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// An account-wide collection (`/members`, `/groups`, `/mailings`).
///
/// Same discipline as the member-scoped views: reads never fetch, and
/// [`AccountCollection::fetch_all`] hits the network at most once per
/// account.
#[derive(Debug)]
pub struct AccountCollection<'a, T: RemoteEntity<Context = AccountClient>> {
    account: &'a AccountClient,
    cache: &'a mut LazyCollection<T>,
}

pub type AccountMemberCollection<'a> = AccountCollection<'a, Member>;
pub type AccountGroupCollection<'a> = AccountCollection<'a, Group>;
pub type AccountMailingCollection<'a> = AccountCollection<'a, Mailing>;

impl<'a, T: RemoteEntity<Context = AccountClient>> AccountCollection<'a, T> {
    pub(crate) fn new(account: &'a AccountClient, cache: &'a mut LazyCollection<T>) -> Self {
        Self { account, cache }
    }

    pub fn path(&self) -> String {
        format!("/{}", T::RESOURCE)
    }

    /// Fetches the collection unless it is already cached.
    ///
    /// # Errors
    /// Adapter failures and malformed replies, as [`AccountError::Collection`].
    pub async fn fetch_all(&mut self) -> Result<&HashMap<T::Key, T>, AccountError> {
        let path = self.path();
        Ok(self
            .cache
            .fetch_all(self.account.adapter(), &path, self.account)
            .await?)
    }
}

impl<T: RemoteEntity<Context = AccountClient>> Deref for AccountCollection<'_, T> {
    type Target = LazyCollection<T>;

    fn deref(&self) -> &Self::Target {
        self.cache
    }
}

impl<T: RemoteEntity<Context = AccountClient>> DerefMut for AccountCollection<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cache
    }
}
