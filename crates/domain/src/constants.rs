//! SDK constants
//!
//! Defaults applied by [`crate::ClientConfig`] and the list-query
//! normalization.

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_HOST: &str = "api.moj.io";
pub const DEFAULT_VERSION: &str = "v2";
pub const DEFAULT_BASE_URL: &str = "https://{host}/{version}";
pub const DEFAULT_OAUTH_BASE_URL: &str = "https://accounts.moj.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Pagination
pub const DEFAULT_PAGE_SIZE: u64 = 10;

// Filter serialization
pub const FILTER_ENTRY_SEPARATOR: &str = ";";
pub const FILTER_VALUE_SEPARATOR: &str = ",";
