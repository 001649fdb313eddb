//! Process configuration.
//!
//! All credentials and connection strings are read once at startup into an
//! explicit [`Config`] value that gets passed into the router state. Nothing
//! reads the environment after startup.

use std::env;
use thiserror::Error;

/// Default port, matching the original deployment.
const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: String, value: String },
}

/// Cloudinary upload credentials.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Server configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub mongo_collection: String,
    pub cloudinary: CloudinaryConfig,
    pub port: u16,
}

impl Config {
    /// Build the configuration from process environment variables.
    ///
    /// Call `dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT".to_string(),
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            mongo_uri: require("MONGO_URI")?,
            mongo_database: lookup("MONGO_DATABASE").unwrap_or_else(|| "mydatabase".to_string()),
            mongo_collection: lookup("MONGO_COLLECTION")
                .unwrap_or_else(|| "mycollection".to_string()),
            cloudinary: CloudinaryConfig {
                cloud_name: require("CLOUDINARY_CLOUD_NAME")?,
                api_key: require("CLOUDINARY_API_KEY")?,
                api_secret: require("CLOUDINARY_API_SECRET")?,
            },
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_vars() -> HashMap<String, String> {
        vars(&[
            ("MONGO_URI", "mongodb://localhost:27017"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "key"),
            ("CLOUDINARY_API_SECRET", "secret"),
        ])
    }

    #[test]
    fn test_defaults() {
        let env = full_vars();
        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();

        assert_eq!(config.mongo_database, "mydatabase");
        assert_eq!(config.mongo_collection, "mycollection");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.cloudinary.cloud_name, "demo");
    }

    #[test]
    fn test_missing_required_var() {
        let mut env = full_vars();
        env.remove("MONGO_URI");

        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref name) if name == "MONGO_URI"));
    }

    #[test]
    fn test_empty_var_counts_as_missing() {
        let mut env = full_vars();
        env.insert("CLOUDINARY_API_SECRET".to_string(), String::new());

        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_port_override() {
        let mut env = full_vars();
        env.insert("PORT".to_string(), "8080".to_string());

        let config = Config::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port() {
        let mut env = full_vars();
        env.insert("PORT".to_string(), "not-a-port".to_string());

        let err = Config::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { .. }));
    }
}
