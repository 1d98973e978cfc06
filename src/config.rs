use std::env;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_DATABASE_URL: &str = "sqlite:cthulhu.db";
const DEFAULT_IP_ROLE: &str = "Cultist";
const DEFAULT_IP_LOOKUP_URL: &str = "https://api.ipify.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Read `config.json`, answer to `,`
    Dev,
    /// Read the environment, answer to `.`
    Prod,
}

impl Mode {
    pub fn default_prefix(self) -> &'static str {
        match self {
            Mode::Dev => ",",
            Mode::Prod => ".",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub database_url: String,
    pub prefix: String,
    pub ip_role: String,
    pub ip_lookup_url: String,
}

// Keys as they appear in config.json
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigFile {
    token: String,
    database_url: Option<String>,
    prefix: Option<String>,
    ip_role: Option<String>,
    ip_lookup_url: Option<String>,
}

impl Config {
    pub fn load(mode: Mode, path: &Path) -> Result<Self, ConfigError> {
        match mode {
            Mode::Dev => Self::from_file(path),
            Mode::Prod => {
                dotenvy::dotenv().ok();
                Self::from_lookup(mode, |key| env::var(key).ok())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(Mode::Dev, &contents)
    }

    pub fn from_json(mode: Mode, contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(contents)?;

        Self {
            token: file.token,
            database_url: file
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            prefix: file.prefix.unwrap_or_else(|| mode.default_prefix().into()),
            ip_role: file.ip_role.unwrap_or_else(|| DEFAULT_IP_ROLE.into()),
            ip_lookup_url: file
                .ip_lookup_url
                .unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.into()),
        }
        .validated()
    }

    pub fn from_lookup(
        mode: Mode,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = lookup("TOKEN").ok_or(ConfigError::MissingVar("TOKEN"))?;

        Self {
            token,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            prefix: lookup("PREFIX").unwrap_or_else(|| mode.default_prefix().into()),
            ip_role: lookup("IP_ROLE").unwrap_or_else(|| DEFAULT_IP_ROLE.into()),
            ip_lookup_url: lookup("IP_LOOKUP_URL").unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.into()),
        }
        .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::Invalid("token is empty".into()));
        }
        if self.prefix.is_empty() || self.prefix.contains(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "prefix {:?} must be non-empty and contain no whitespace",
                self.prefix
            )));
        }
        if self.database_url.is_empty() {
            return Err(ConfigError::Invalid("database url is empty".into()));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn json_only_needs_a_token() {
        let config = Config::from_json(Mode::Dev, r#"{ "Token": "abc" }"#).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.prefix, ",");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.ip_role, DEFAULT_IP_ROLE);
        assert_eq!(config.ip_lookup_url, DEFAULT_IP_LOOKUP_URL);
    }

    #[test]
    fn json_overrides_defaults() {
        let config = Config::from_json(
            Mode::Dev,
            r#"{
                "Token": "abc",
                "DatabaseUrl": "sqlite::memory:",
                "Prefix": "!",
                "IpRole": "Admin",
                "IpLookupUrl": "http://localhost/ip"
            }"#,
        )
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.prefix, "!");
        assert_eq!(config.ip_role, "Admin");
        assert_eq!(config.ip_lookup_url, "http://localhost/ip");
    }

    #[test]
    fn json_without_token_is_rejected() {
        let err = Config::from_json(Mode::Dev, r#"{ "Prefix": "!" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn environment_uses_prod_prefix() {
        let config = Config::from_lookup(
            Mode::Prod,
            lookup_from(&[("TOKEN", "abc"), ("DATABASE_URL", "sqlite:prod.db")]),
        )
        .unwrap();

        assert_eq!(config.prefix, ".");
        assert_eq!(config.database_url, "sqlite:prod.db");
    }

    #[test]
    fn environment_without_token_is_fatal() {
        let err = Config::from_lookup(Mode::Prod, lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("TOKEN")));
    }

    #[test]
    fn blank_values_are_rejected() {
        let err = Config::from_lookup(Mode::Prod, lookup_from(&[("TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_lookup(Mode::Prod, lookup_from(&[("TOKEN", "abc"), ("PREFIX", "a b")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file(Path::new("/definitely/not/here/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
