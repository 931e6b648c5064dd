//! Console configuration, read from the environment.

use std::path::PathBuf;

use adminconsole_api::SimulatorConfig;
use adminconsole_auth::UserContext;

use crate::i18n::Catalog;

const ENV_CATALOG: &str = "ADMINCONSOLE_CATALOG";
const ENV_USER: &str = "ADMINCONSOLE_USER";
const ENV_RANK3: &str = "ADMINCONSOLE_RANK3";

/// Principal of a headless session when none is configured.
pub const DEFAULT_PRINCIPAL: &str = "operator";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub simulator: SimulatorConfig,
    /// JSON message catalog layered over the built-in English messages.
    pub catalog: Option<PathBuf>,
    pub user: UserContext,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            simulator: SimulatorConfig::default(),
            catalog: None,
            user: UserContext::new(DEFAULT_PRINCIPAL, false),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            simulator: SimulatorConfig::from_lookup(&lookup),
            ..Self::default()
        };

        config.catalog = lookup(ENV_CATALOG)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        if let Some(principal) = lookup(ENV_USER).map(|raw| raw.trim().to_string()) {
            if principal.is_empty() {
                tracing::warn!("{ENV_USER} is blank; using {DEFAULT_PRINCIPAL:?}");
            } else {
                config.user.principal = principal;
            }
        }

        if let Some(raw) = lookup(ENV_RANK3) {
            match parse_flag(&raw) {
                Some(flag) => config.user.has_rank3_scope = flag,
                None => tracing::warn!("{ENV_RANK3}={raw:?} is not a boolean; using false"),
            }
        }

        config
    }

    /// Built-in messages, overlaid with the configured catalog file.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let english = Catalog::english();
        match &self.catalog {
            Some(path) => Ok(english.merged(Catalog::load(path)?)),
            None => Ok(english),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
