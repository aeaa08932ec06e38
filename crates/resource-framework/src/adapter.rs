//! # Adapter Trait
//!
//! The `Adapter` is the single seam between the resource model and the network.
//! Entities and collections never talk HTTP themselves: they build a relative
//! resource path plus a parameter object and hand both to whichever adapter the
//! owning account was constructed with.
//!
//! Implementations decide everything about transport (base URL, credentials,
//! timeouts). The framework only sees decoded JSON bodies or an [`AdapterError`].

use crate::error::AdapterError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// Query parameters or request body: always a JSON object.
pub type Params = Map<String, Value>;

/// The four verbs the resource model issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Transport capability consumed by entities and collections.
///
/// Every path is relative (`/members/1000/groups`). Replies are decoded JSON:
/// usually a list or an object, sometimes a bare boolean or number.
///
/// # Example
///
/// ```rust
/// use resource_framework::{Adapter, AdapterError, Params};
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
///
/// struct Canned;
///
/// #[async_trait]
/// impl Adapter for Canned {
///     async fn get(&self, _path: &str, _params: &Params) -> Result<Value, AdapterError> {
///         Ok(json!([]))
///     }
///     async fn post(&self, _path: &str, _data: &Params) -> Result<Value, AdapterError> {
///         Ok(json!({}))
///     }
///     async fn put(&self, _path: &str, _params: &Params) -> Result<Value, AdapterError> {
///         Ok(json!(true))
///     }
///     async fn delete(&self, _path: &str, _params: &Params) -> Result<Value, AdapterError> {
///         Ok(json!(true))
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let adapter: Box<dyn Adapter> = Box::new(Canned);
///     let body = adapter.get("/groups", &Params::new()).await.unwrap();
///     assert_eq!(body, json!([]));
/// }
/// ```
#[async_trait]
pub trait Adapter: Send + Sync {
    async fn get(&self, path: &str, params: &Params) -> Result<Value, AdapterError>;

    async fn post(&self, path: &str, data: &Params) -> Result<Value, AdapterError>;

    async fn put(&self, path: &str, params: &Params) -> Result<Value, AdapterError>;

    async fn delete(&self, path: &str, params: &Params) -> Result<Value, AdapterError>;

    /// Dispatches on a [`Method`] value.
    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
    ) -> Result<Value, AdapterError> {
        match method {
            Method::Get => self.get(path, params).await,
            Method::Post => self.post(path, params).await,
            Method::Put => self.put(path, params).await,
            Method::Delete => self.delete(path, params).await,
        }
    }
}

/// Truthiness of a decoded reply, as the service uses it for acknowledgements:
/// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_displays_as_http_verb() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn truthiness_follows_service_acknowledgements() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({"ok": 1})));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!("")));
    }
}
