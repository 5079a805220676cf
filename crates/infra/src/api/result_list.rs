//! Typed collection returned by list operations

use mojio_domain::{MojioError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

const DATA_KEYS: [&str; 2] = ["Data", "data"];
const TOTAL_KEYS: [&str; 2] = ["TotalCount", "totalCount"];

/// Ordered list of decoded entities plus the server-side total.
///
/// Element order is the order the server returned them in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultList<T> {
    items: Vec<T>,
    total_count: u64,
}

impl<T: DeserializeOwned> ResultList<T> {
    /// Decode a list response body.
    ///
    /// Accepts either a bare JSON array or an envelope object carrying the
    /// page under `Data` and the overall count under `TotalCount`.
    ///
    /// # Errors
    /// Returns [`MojioError::Decode`] if the body is some other shape or an
    /// element does not decode as `T`.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| MojioError::Decode(format!("list body is not JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let (elements, total) = match value {
            Value::Array(elements) => (elements, None),
            Value::Object(mut envelope) => {
                let elements = DATA_KEYS
                    .iter()
                    .find_map(|key| envelope.remove(*key))
                    .ok_or_else(|| MojioError::Decode("list envelope has no Data".to_string()))?;
                let Value::Array(elements) = elements else {
                    return Err(MojioError::Decode("list envelope Data is not an array".to_string()));
                };
                let total = TOTAL_KEYS.iter().find_map(|key| envelope.get(*key)).and_then(Value::as_u64);
                (elements, total)
            }
            other => {
                return Err(MojioError::Decode(format!(
                    "expected a JSON array or list envelope, got {}",
                    kind_of(&other)
                )))
            }
        };

        let items = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value(element)
                    .map_err(|e| MojioError::Decode(format!("list element {index}: {e}")))
            })
            .collect::<Result<Vec<T>>>()?;

        let total_count = total.unwrap_or(items.len() as u64);
        Ok(Self { items, total_count })
    }
}

impl<T> ResultList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of matching entities on the server, across all pages.
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for ResultList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
