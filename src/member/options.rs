use resource_framework::Params;
use serde_json::Value;

/// Extra top-level parameters for [`Member::save`](crate::model::Member::save).
///
/// Everything here is merged into the POST body next to `email` and `fields`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveOptions {
    /// Signup form the member came through.
    pub signup_form_id: Option<String>,
    /// Groups to add the member to as part of the save.
    pub group_ids: Vec<i64>,
    /// Whether the service should fire field-change triggers.
    pub field_triggers: Option<bool>,
    /// Any other parameter, passed through verbatim.
    pub extra: Params,
}

impl SaveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signup_form_id(mut self, id: impl Into<String>) -> Self {
        self.signup_form_id = Some(id.into());
        self
    }

    pub fn group_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.group_ids.extend(ids);
        self
    }

    pub fn field_triggers(mut self, enabled: bool) -> Self {
        self.field_triggers = Some(enabled);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Writes every set option into `body`, overriding same-named keys.
    pub(crate) fn merge_into(self, body: &mut Params) {
        if let Some(id) = self.signup_form_id {
            body.insert("signup_form_id".into(), Value::String(id));
        }
        if !self.group_ids.is_empty() {
            body.insert("group_ids".into(), Value::from(self.group_ids));
        }
        if let Some(enabled) = self.field_triggers {
            body.insert("field_triggers".into(), Value::Bool(enabled));
        }
        body.extend(self.extra);
    }
}
