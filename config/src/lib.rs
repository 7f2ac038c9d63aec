//! Configuration for tenant-fetch.
//!
//! Read from `~/.tenant-fetch/config.toml`, or from the path in
//! `TENANT_FETCH_CONFIG`. Header values may reference environment variables
//! as `${NAME}` so tokens stay out of the file:
//!
//! ```toml
//! [api]
//! root_url = "https://tenant.example/api"
//! timeout_secs = 30
//!
//! [api.headers]
//! Authorization = "Bearer ${TENANT_TOKEN}"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "TENANT_FETCH_CONFIG";
/// Overrides `[api] root_url`.
pub const ROOT_URL_ENV: &str = "TENANT_FETCH_API_ROOT";

#[derive(Debug, Default, Deserialize)]
pub struct TenantFetchConfig {
    pub api: Option<ApiConfig>,
}

#[derive(Default, Deserialize)]
pub struct ApiConfig {
    pub root_url: Option<String>,
    pub user_agent: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout. Unset means none.
    pub timeout_secs: Option<u64>,
    /// Sent with every request. Values support `${ENV_VAR}` expansion.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

// Manual Debug impl to prevent leaking tenant tokens in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        f.debug_struct("ApiConfig")
            .field("root_url", &self.root_url)
            .field("user_agent", &self.user_agent)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("timeout_secs", &self.timeout_secs)
            .field("headers", &header_names)
            .finish()
    }
}

impl ApiConfig {
    /// Headers with `${ENV_VAR}` references expanded, in name order.
    #[must_use]
    pub fn resolved_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.clone(), expand_env_vars(value)))
            .collect()
    }

    /// `TENANT_FETCH_API_ROOT` if set and not blank, else `root_url`.
    #[must_use]
    pub fn resolved_root_url(&self) -> Option<String> {
        env::var(ROOT_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.root_url.clone())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Replace `${NAME}` with the value of `NAME`; unset variables become empty.
/// Unclosed `${` and empty `${}` are kept as written.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(0) => {
                out.push_str("${}");
                rest = &after[1..];
            }
            Some(end) => {
                let name = &after[..end];
                if !name.contains(['=', '\0']) {
                    out.push_str(&env::var(name).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl TenantFetchConfig {
    /// Load from the default location. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".tenant-fetch").join("config.toml"))
}
