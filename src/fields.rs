//! # Field Catalog
//!
//! Custom member fields are addressed by a human-readable *shortcut name*
//! (`first_name`) locally and by a numeric [`FieldId`] remotely. The catalog
//! holds that mapping for one account.
//!
//! The catalog is fetched from GET `/fields` at most once per account and
//! then shared by every entity of the account. Synchronous lookups
//! ([`FieldCatalog::is_shortcut`]) only consult what is already cached; the
//! async lookups load it on first use.

use crate::account::AccountError;
use crate::model::FieldId;
use resource_framework::{Adapter, Params};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// One custom field definition as returned by `/fields`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub field_id: FieldId,
    pub shortcut_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub field_type: Option<String>,
}

impl Field {
    pub fn new(field_id: FieldId, shortcut_name: impl Into<String>) -> Self {
        Self {
            field_id,
            shortcut_name: shortcut_name.into(),
            display_name: None,
            field_type: None,
        }
    }
}

pub type FieldMap = HashMap<FieldId, Field>;

/// Write-once cache of an account's field definitions.
#[derive(Debug, Default)]
pub struct FieldCatalog {
    fields: OnceCell<FieldMap>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog, if it has been loaded or seeded.
    pub fn cached(&self) -> Option<&FieldMap> {
        self.fields.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.fields.initialized()
    }

    /// Pre-populates the catalog without a request.
    ///
    /// Returns `false` (and changes nothing) if it was already populated.
    pub fn seed(&self, fields: impl IntoIterator<Item = Field>) -> bool {
        let map = fields
            .into_iter()
            .map(|field| (field.field_id, field))
            .collect();
        self.fields.set(map).is_ok()
    }

    /// Whether `name` is a known shortcut. Never fetches.
    pub fn is_shortcut(&self, name: &str) -> bool {
        self.cached()
            .is_some_and(|fields| fields.values().any(|field| field.shortcut_name == name))
    }

    /// Loads the catalog from `/fields` unless it is already cached.
    ///
    /// # Errors
    /// Adapter failures, or [`AccountError::MalformedFields`] if the reply does
    /// not decode. A failed load leaves the catalog empty, so the next call
    /// retries.
    pub async fn load(&self, adapter: &dyn Adapter) -> Result<&FieldMap, AccountError> {
        if let Some(fields) = self.cached() {
            debug!(size = fields.len(), "Field catalog cache hit");
            return Ok(fields);
        }

        self.fields
            .get_or_try_init(|| async {
                debug!(path = "/fields", "Fetching field catalog");
                let body = adapter.get("/fields", &Params::new()).await?;
                let rows: Vec<Field> = serde_json::from_value(body).map_err(|err| {
                    warn!(error = %err, "Malformed field catalog");
                    err
                })?;
                let fields: FieldMap = rows
                    .into_iter()
                    .map(|field| (field.field_id, field))
                    .collect();
                info!(size = fields.len(), "Field catalog loaded");
                Ok::<_, AccountError>(fields)
            })
            .await
    }

    /// The field with the given shortcut name, loading the catalog if needed.
    pub async fn find_by_shortcut(
        &self,
        adapter: &dyn Adapter,
        name: &str,
    ) -> Result<Option<&Field>, AccountError> {
        let fields = self.load(adapter).await?;
        Ok(fields.values().find(|field| field.shortcut_name == name))
    }

    /// The shortcut name of a field id, loading the catalog if needed.
    pub async fn shortcut_for(
        &self,
        adapter: &dyn Adapter,
        id: FieldId,
    ) -> Result<Option<&str>, AccountError> {
        let fields = self.load(adapter).await?;
        Ok(fields.get(&id).map(|field| field.shortcut_name.as_str()))
    }
}
