//! Application settings loaded via OrthoConfig.
//!
//! Values come from `PROJECTS_*` environment variables, an optional config
//! file and command-line flags, in that order of increasing precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROJECTS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Projects are kept in memory when unset.
    pub database_url: Option<String>,
    /// Insert the fixture accounts and their projects at startup.
    pub seed_fixtures: Option<bool>,
}

/// Reasons the settings cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid database URL: {0}")]
    DatabaseUrl(#[from] url::ParseError),
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Whether fixture accounts are seeded; enabled unless switched off.
    pub fn seed_fixtures(&self) -> bool {
        self.seed_fixtures.unwrap_or(true)
    }

    /// The database URL with any password masked, safe to log.
    pub fn redacted_database_url(&self) -> Result<Option<String>, SettingsError> {
        self.database_url
            .as_deref()
            .map(|raw| {
                let mut url = Url::parse(raw)?;
                // Only fails for URLs that cannot carry credentials.
                if url.password().is_some() && url.set_password(Some("****")).is_err() {
                    return Ok(format!("{}://<redacted>", url.scheme()));
                }
                Ok(url.to_string())
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "PROJECTS_BIND_ADDR",
        "PROJECTS_DATABASE_URL",
        "PROJECTS_SEED_FIXTURES",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("project-registry")])
            .expect("settings should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert!(settings.database_url.is_none());
        assert!(settings.seed_fixtures());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PROJECTS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "PROJECTS_DATABASE_URL",
                Some("postgres://registry:secret@db:5432/projects".to_owned()),
            ),
            ("PROJECTS_SEED_FIXTURES", Some("false".to_owned())),
        ]);

        let settings = load();
        assert!(!settings.seed_fixtures());
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9090
        );
        assert_eq!(
            settings.redacted_database_url().expect("valid url").as_deref(),
            Some("postgres://registry:****@db:5432/projects")
        );
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = AppSettings {
            bind_addr: Some("not an address".to_owned()),
            database_url: None,
            seed_fixtures: None,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn fixture_seeding_defaults_to_enabled(#[case] flag: Option<bool>, #[case] expected: bool) {
        let settings = AppSettings {
            bind_addr: None,
            database_url: None,
            seed_fixtures: flag,
        };
        assert_eq!(settings.seed_fixtures(), expected);
    }

    #[rstest]
    fn urls_without_passwords_are_unchanged() {
        let settings = AppSettings {
            bind_addr: None,
            database_url: Some("postgres://registry@db:5432/projects".to_owned()),
            seed_fixtures: None,
        };
        assert_eq!(
            settings.redacted_database_url().expect("valid url").as_deref(),
            Some("postgres://registry@db:5432/projects")
        );
    }
}
