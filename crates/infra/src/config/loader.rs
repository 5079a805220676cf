//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, if the application credentials are set there
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//!
//! ## Environment Variables
//! - `MOJIO_APP_ID`: Application id (required)
//! - `MOJIO_SECRET_KEY`: Application secret (required)
//! - `MOJIO_SCHEME`, `MOJIO_HOST`, `MOJIO_VERSION`: Template inputs
//! - `MOJIO_BASE_URL`: API root template
//! - `MOJIO_OAUTH_BASE_URL`: OAuth provider root template
//! - `MOJIO_TOKEN`: Pre-seeded access token
//! - `MOJIO_TIMEOUT_SECS`: Request timeout in seconds
//! - `MOJIO_USER_AGENT`: User-Agent header override
//!
//! ## File Locations
//! `mojio.{json,toml}` then `config.{json,toml}`, looked up in the current
//! directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};

use mojio_domain::{ClientConfig, MojioError, Result};

const FILE_NAMES: [&str; 4] = ["mojio.json", "mojio.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `MojioError::Config` if neither source yields a configuration
/// or the chosen source is malformed.
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Options not present in the environment keep their defaults.
///
/// # Errors
/// Returns `MojioError::Config` if `MOJIO_APP_ID` or `MOJIO_SECRET_KEY`
/// is missing, or `MOJIO_TIMEOUT_SECS` is not a number.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::new(env_var("MOJIO_APP_ID")?, env_var("MOJIO_SECRET_KEY")?);

    if let Some(scheme) = env_opt("MOJIO_SCHEME") {
        config.scheme = scheme;
    }
    if let Some(host) = env_opt("MOJIO_HOST") {
        config.host = host;
    }
    if let Some(version) = env_opt("MOJIO_VERSION") {
        config.version = version;
    }
    if let Some(base_url) = env_opt("MOJIO_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(oauth_base_url) = env_opt("MOJIO_OAUTH_BASE_URL") {
        config.oauth_base_url = oauth_base_url;
    }
    config.token = env_opt("MOJIO_TOKEN");
    config.user_agent = env_opt("MOJIO_USER_AGENT");
    if let Some(timeout) = env_opt("MOJIO_TIMEOUT_SECS") {
        config.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| MojioError::Config(format!("Invalid timeout: {e}")))?;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// # Arguments
/// * `path` - Config file; when `None`, uses [`probe_config_paths`].
///
/// # Errors
/// Returns `MojioError::Config` if the file is missing, unreadable or not
/// valid JSON/TOML.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MojioError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MojioError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MojioError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MojioError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MojioError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MojioError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a config file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    env_opt(key)
        .ok_or_else(|| MojioError::Config(format!("Missing required environment variable: {key}")))
}

/// Read an environment variable, treating blank values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
