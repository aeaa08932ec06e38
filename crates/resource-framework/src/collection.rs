//! # Lazy Collection
//!
//! `LazyCollection<T>` is the cache behind every related-resource collection:
//! it is filled by exactly one remote fetch and then only ever read.
//!
//! ## Lifecycle
//!
//! 1. **Empty**: created alongside its owner; `len()` is 0 no matter how many
//!    entities exist remotely. Reads never trigger a fetch.
//! 2. **Fetched**: the first successful [`LazyCollection::fetch_all`] issues one
//!    GET, builds every row into an entity, indexes it by its natural key and
//!    flips the `fetched` flag.
//! 3. Later `fetch_all` calls return the cached map without touching the
//!    adapter. There is no invalidation.
//!
//! A failed fetch commits nothing: rows are staged and only merged once every
//! one of them has been built and keyed, so the flag stays `false` and the map
//! keeps whatever it held before.

use crate::adapter::{Adapter, Params};
use crate::entity::{Attributes, RemoteEntity};
use crate::error::{json_kind, CollectionError};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::hash_map::{Iter, Keys, Values};
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;
use tracing::{debug, info, warn};

/// A fetch-once, keyed cache of remote entities.
#[derive(Debug)]
pub struct LazyCollection<T: RemoteEntity> {
    items: HashMap<T::Key, T>,
    fetched: bool,
}

impl<T: RemoteEntity> Default for LazyCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RemoteEntity> LazyCollection<T> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            fetched: false,
        }
    }

    /// Whether a fetch has completed successfully.
    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(key)
    }

    /// Mutable access to a cached entity; edits stay in the cache.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains_key(key)
    }

    pub fn keys(&self) -> Keys<'_, T::Key, T> {
        self.items.keys()
    }

    pub fn values(&self) -> Values<'_, T::Key, T> {
        self.items.values()
    }

    pub fn iter(&self) -> Iter<'_, T::Key, T> {
        self.items.iter()
    }

    /// The backing map itself.
    pub fn as_map(&self) -> &HashMap<T::Key, T> {
        &self.items
    }

    /// Populates the cache from `path` unless it already has been.
    ///
    /// Returns the backing map. The second and later calls are no-ops that
    /// return the cached state unchanged.
    ///
    /// # Errors
    /// - [`CollectionError::Adapter`] if the adapter fails.
    /// - [`CollectionError::UnexpectedBody`] if the reply is not a list of objects.
    /// - [`CollectionError::MissingKey`] if a row has no natural key.
    pub async fn fetch_all(
        &mut self,
        adapter: &dyn Adapter,
        path: &str,
        ctx: &T::Context,
    ) -> Result<&HashMap<T::Key, T>, CollectionError> {
        if self.fetched {
            debug!(kind = T::KIND, path, size = self.items.len(), "Cache hit");
            return Ok(&self.items);
        }

        debug!(kind = T::KIND, path, "Fetching");
        let body = adapter.get(path, &Params::new()).await?;
        let staged = Self::build(body, path, ctx)?;

        self.items.extend(staged);
        self.fetched = true;
        info!(kind = T::KIND, path, size = self.items.len(), "Fetched");
        Ok(&self.items)
    }

    fn build(body: Value, path: &str, ctx: &T::Context) -> Result<Vec<(T::Key, T)>, CollectionError> {
        let rows = match body {
            Value::Array(rows) => rows,
            other => {
                warn!(kind = T::KIND, path, found = json_kind(&other), "Unexpected body");
                return Err(CollectionError::UnexpectedBody {
                    path: path.to_owned(),
                    expected: "array",
                    found: json_kind(&other),
                });
            }
        };

        rows.into_iter()
            .map(|row| {
                let attributes: Attributes = match row {
                    Value::Object(map) => map,
                    other => {
                        warn!(kind = T::KIND, path, found = json_kind(&other), "Unexpected row");
                        return Err(CollectionError::UnexpectedBody {
                            path: path.to_owned(),
                            expected: "object",
                            found: json_kind(&other),
                        });
                    }
                };
                let entity = T::from_response(ctx, attributes);
                let key = entity.natural_key().ok_or_else(|| {
                    warn!(kind = T::KIND, path, ?entity, "Row without natural key");
                    CollectionError::MissingKey {
                        kind: T::KIND,
                        path: path.to_owned(),
                    }
                })?;
                Ok((key, entity))
            })
            .collect()
    }
}

impl<T, Q> Index<&Q> for LazyCollection<T>
where
    T: RemoteEntity,
    T::Key: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = T;

    /// # Panics
    /// Panics if the key is not cached, like `HashMap`'s `Index`.
    fn index(&self, key: &Q) -> &T {
        &self.items[key]
    }
}

impl<'a, T: RemoteEntity> IntoIterator for &'a LazyCollection<T> {
    type Item = (&'a T::Key, &'a T);
    type IntoIter = Iter<'a, T::Key, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
