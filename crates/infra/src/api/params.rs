//! Command parameters and list-query normalization
//!
//! Parameters are an insertion-ordered map so filter criteria keep the
//! order the caller gave them in.

use indexmap::IndexMap;
use mojio_domain::constants::{
    DEFAULT_PAGE_SIZE, FILTER_ENTRY_SEPARATOR, FILTER_VALUE_SEPARATOR,
};
use mojio_domain::{MojioError, Result};
use serde_json::{Map, Value};

/// Parameter mapping of a single command.
pub type Params = IndexMap<String, Value>;

pub const FILTER: &str = "filter";
pub const PAGE: &str = "page";
pub const PAGE_SIZE: &str = "pageSize";
pub const TOP: &str = "top";
pub const SKIP: &str = "skip";
pub const SELECT: &str = "select";
pub const SORT_BY: &str = "sortBy";
pub const DESC: &str = "desc";

/// Render a parameter value as it goes on the wire.
///
/// Arrays become comma-separated lists of their scalar elements.
pub fn render_value(value: &Value) -> Result<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .collect::<Result<Vec<_>>>()
            .map(|parts| parts.join(FILTER_VALUE_SEPARATOR)),
        other => render_scalar(other),
    }
}

fn render_scalar(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(MojioError::Validation(format!("nested value cannot be rendered: {value}")))
        }
    }
}

/// Serialize filter criteria into `field=value;field=v1,v2`.
///
/// Entry order follows the mapping's iteration order; nothing is reordered
/// or deduplicated.
pub fn serialize_criteria(criteria: &Map<String, Value>) -> Result<String> {
    criteria
        .iter()
        .map(|(field, value)| render_value(value).map(|rendered| format!("{field}={rendered}")))
        .collect::<Result<Vec<_>>>()
        .map(|entries| entries.join(FILTER_ENTRY_SEPARATOR))
}

/// Replace a mapping-form `filter` with its string form.
///
/// A string filter passes through unchanged; an empty mapping is dropped.
///
/// # Errors
/// Returns [`MojioError::Validation`] for any other filter shape.
pub fn normalize_criteria(params: &mut Params) -> Result<()> {
    let serialized = match params.get(FILTER) {
        None | Some(Value::Null | Value::String(_)) => return Ok(()),
        Some(Value::Object(criteria)) if criteria.is_empty() => None,
        Some(Value::Object(criteria)) => Some(serialize_criteria(criteria)?),
        Some(other) => {
            return Err(MojioError::Validation(format!(
                "filter must be a string or a mapping, got {other}"
            )))
        }
    };

    match serialized {
        Some(filter) => {
            params.insert(FILTER.to_string(), Value::String(filter));
        }
        None => {
            params.shift_remove(FILTER);
        }
    }
    Ok(())
}

/// Translate 1-based `page`/`pageSize` into `top`/`skip`.
///
/// `page` and `pageSize` are consumed either way. With a positive page,
/// `top = pageSize` (default 10 when absent or zero) and
/// `skip = (page - 1) * top`. Otherwise nothing is injected and any raw
/// `top`/`skip` the caller supplied stay as they are.
///
/// # Errors
/// Returns [`MojioError::Validation`] if either value is not an integer,
/// or, with a positive page, if `pageSize` is negative or the offset
/// overflows.
pub fn normalize_page(params: &mut Params) -> Result<()> {
    let page = take_integer(params, PAGE)?;
    let page_size = take_integer(params, PAGE_SIZE)?;

    let Some(page) = page.filter(|p| *p > 0) else {
        return Ok(());
    };

    if page_size.is_some_and(|size| size < 0) {
        return Err(MojioError::Validation("pageSize must not be negative".to_string()));
    }

    let limit = page_size
        .filter(|size| *size > 0)
        .and_then(|size| u64::try_from(size).ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let page = u64::try_from(page).map_err(|_| invalid_integer(PAGE))?;
    let offset = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| MojioError::Validation("page offset overflows".to_string()))?;

    params.insert(TOP.to_string(), Value::from(limit));
    params.insert(SKIP.to_string(), Value::from(offset));
    Ok(())
}

fn take_integer(params: &mut Params, key: &str) -> Result<Option<i64>> {
    match params.shift_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Some(i)),
            #[allow(clippy::cast_possible_truncation)]
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Some(f as i64)),
            _ => Err(invalid_integer(key)),
        },
        Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| invalid_integer(key)),
        Some(_) => Err(invalid_integer(key)),
    }
}

fn invalid_integer(key: &str) -> MojioError {
    MojioError::Validation(format!("{key} must be an integer"))
}

/// Filter criteria: either a preformatted string or ordered field/value pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Raw(String),
    Criteria(Map<String, Value>),
}

/// Builder for list-operation parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    filter: Option<Filter>,
    page: Option<i64>,
    page_size: Option<i64>,
    top: Option<u64>,
    skip: Option<u64>,
    select: Option<String>,
    sort_by: Option<(String, bool)>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preformatted filter string, replacing any criteria.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(Filter::Raw(filter.into()));
        self
    }

    /// Append a `field=value` criterion. A JSON array value means "one of".
    #[must_use]
    pub fn criterion(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut criteria = match self.filter.take() {
            Some(Filter::Criteria(criteria)) => criteria,
            _ => Map::new(),
        };
        criteria.insert(field.into(), value.into());
        self.filter = Some(Filter::Criteria(criteria));
        self
    }

    #[must_use]
    pub const fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub const fn top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn select(mut self, fields: impl Into<String>) -> Self {
        self.select = Some(fields.into());
        self
    }

    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.sort_by = Some((field.into(), descending));
        self
    }

    /// Lower into raw command parameters (not yet normalized).
    #[must_use]
    pub fn into_params(self) -> Params {
        let mut params = Params::new();

        if let Some(filter) = self.filter {
            let value = match filter {
                Filter::Raw(s) => Value::String(s),
                Filter::Criteria(criteria) => Value::Object(criteria),
            };
            params.insert(FILTER.to_string(), value);
        }
        if let Some(page) = self.page {
            params.insert(PAGE.to_string(), Value::from(page));
        }
        if let Some(page_size) = self.page_size {
            params.insert(PAGE_SIZE.to_string(), Value::from(page_size));
        }
        if let Some(top) = self.top {
            params.insert(TOP.to_string(), Value::from(top));
        }
        if let Some(skip) = self.skip {
            params.insert(SKIP.to_string(), Value::from(skip));
        }
        if let Some(select) = self.select {
            params.insert(SELECT.to_string(), Value::String(select));
        }
        if let Some((field, descending)) = self.sort_by {
            params.insert(SORT_BY.to_string(), Value::String(field));
            params.insert(DESC.to_string(), Value::Bool(descending));
        }

        params
    }
}
