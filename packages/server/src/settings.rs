use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Connection settings for the roster database (`DB_*`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Database {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5432,
            name: "dinocamp".into(),
            user: "postgres".into(),
            password: String::new(),
        }
    }
}

/// Error payload policy (`ERRORS_*`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Errors {
    /// Include the store's message and detail in list failures.
    pub detail: bool,
}

impl Default for Errors {
    fn default() -> Self {
        Self { detail: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub db: Database,
    /// Listening port (`PORT`).
    pub port: u16,
    pub errors: Errors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db: Database::default(),
            port: 3001,
            errors: Errors::default(),
        }
    }
}

impl Settings {
    /// Load from defaults, `config.toml`, a `.env` file, then the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_environment(Environment::default())
    }

    pub(crate) fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("db.host", defaults.db.host)?
            .set_default("db.port", i64::from(defaults.db.port))?
            .set_default("db.name", defaults.db.name)?
            .set_default("db.user", defaults.db.user)?
            .set_default("db.password", defaults.db.password)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("errors.detail", defaults.errors.detail)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment.separator("_"))
            .build()?;

        config.try_deserialize()
    }

    pub fn listen_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::default().source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_environment(environment(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.db.host, "localhost");
        assert_eq!(settings.db.port, 5432);
        assert_eq!(settings.db.name, "dinocamp");
        assert_eq!(settings.db.user, "postgres");
        assert_eq!(settings.db.password, "");
        assert_eq!(settings.port, 3001);
        assert!(settings.errors.detail);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = Settings::from_environment(environment(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "camp"),
            ("DB_USER", "counselor"),
            ("DB_PASSWORD", "s3cret"),
            ("PORT", "8080"),
            ("ERRORS_DETAIL", "false"),
        ]))
        .unwrap();

        assert_eq!(settings.db.host, "db.internal");
        assert_eq!(settings.db.port, 6543);
        assert_eq!(settings.db.name, "camp");
        assert_eq!(settings.db.user, "counselor");
        assert_eq!(settings.db.password, "s3cret");
        assert_eq!(settings.port, 8080);
        assert!(!settings.errors.detail);
        assert_eq!(settings.listen_addr().port(), 8080);
    }

    #[test]
    fn test_numeric_password_stays_a_string() {
        for password in ["12345", "007", "1.50", "true"] {
            let settings =
                Settings::from_environment(environment(&[("DB_PASSWORD", password)])).unwrap();
            assert_eq!(settings.db.password, password);
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Settings::from_environment(environment(&[("PORT", "not-a-port")])).is_err());
    }
}
