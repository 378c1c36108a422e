//! Configuration loader and path helpers.
//!
//! Figment merges built-in defaults, `config.toml`, `config.<env>.toml`
//! (picked by `RUST_ENV`) and `SVGVAULT_*` environment variables, in that
//! order. Nested keys use a double underscore in the environment, e.g.
//! `SVGVAULT_VAULT__TOP_COLORS=12`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{ASSET_EXTENSIONS, SIDECAR_FILE_NAME, TOP_COLORS};

pub const ENV_PREFIX: &str = "SVGVAULT_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vault: VaultSettings,
    pub search: SearchSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultSettings {
    pub sidecar_name: String,
    pub extensions: Vec<String>,
    pub top_colors: usize,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            sidecar_name: SIDECAR_FILE_NAME.to_string(),
            extensions: ASSET_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            top_colors: TOP_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// How many result rows a front end prints. Never narrows `count`.
    pub display_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { display_limit: 50 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub json: bool,
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::from_figment(Self::figment_for_env(&env_name))
    }

    pub fn figment_for_env(env_name: &str) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("failed to get '{}': {}", key, e)))
    }

    /// Typed view of the merged configuration.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        validate(&settings)?;
        Ok(settings)
    }
}

fn validate(settings: &Settings) -> Result<()> {
    let sidecar = &settings.vault.sidecar_name;
    if sidecar.is_empty() || sidecar.contains('/') || sidecar.contains('\\') {
        return Err(Error::InvalidConfig(format!("vault.sidecar_name must be a bare file name, got '{}'", sidecar)));
    }
    if settings.vault.extensions.iter().all(|e| e.trim().is_empty()) {
        return Err(Error::InvalidConfig("vault.extensions must name at least one extension".into()));
    }
    Ok(())
}

/// Expand `~` and `$VAR`/`${VAR}` in a user-supplied path. Unknown variables
/// are left as written; nothing is canonicalized.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(Cow::Borrowed(s));
    PathBuf::from(shellexpand::tilde(&with_env).as_ref())
}

/// Expand `p` and resolve it against `base` unless it is already absolute.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
