use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub auth: FileAuthConfig,
    #[serde(default)]
    pub catalog: FileCatalogConfig,
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_path: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCatalogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_viewport_width: Option<f64>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub cors_allowed_methods: Option<Vec<String>>,
    pub cors_allowed_headers: Option<Vec<String>>,
    pub cors_allow_credentials: Option<bool>,
    pub login_path: Option<String>,
    pub default_viewport_width: Option<f64>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; `gather` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut env_config = Self::default();

        env_config.config_path = lookup("GOMPA_CONFIG").map(PathBuf::from);

        env_config.server_host = lookup("SERVER_HOST");
        env_config.server_port =
            lookup("SERVER_PORT").and_then(|s| s.parse().ok());

        env_config.database_url = lookup("DATABASE_URL");

        env_config.cors_allowed_origins =
            parse_csv(lookup("CORS_ALLOWED_ORIGINS"));
        env_config.cors_allowed_methods =
            parse_csv(lookup("CORS_ALLOWED_METHODS"));
        env_config.cors_allowed_headers =
            parse_csv(lookup("CORS_ALLOWED_HEADERS"));
        env_config.cors_allow_credentials =
            parse_bool(lookup("CORS_ALLOW_CREDENTIALS"));

        env_config.login_path = lookup("AUTH_LOGIN_PATH");
        env_config.default_viewport_width =
            lookup("MAP_VIEWPORT_WIDTH").and_then(|s| s.parse().ok());

        env_config.dev_mode = parse_bool(lookup("DEV_MODE"));

        env_config
    }
}

fn parse_csv(raw: Option<String>) -> Option<Vec<String>> {
    raw.map(|raw| {
        raw.split(',')
            .filter_map(|part| {
                let trimmed = part.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect()
    })
}

fn parse_bool(raw: Option<String>) -> Option<bool> {
    raw.and_then(|raw| match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn csv_lists_drop_blank_entries() {
        let env = env_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://gompa.example, ,http://localhost:5173,",
        )]);
        assert_eq!(
            env.cors_allowed_origins,
            Some(vec![
                "https://gompa.example".to_string(),
                "http://localhost:5173".to_string()
            ])
        );
    }

    #[test]
    fn booleans_accept_common_spellings() {
        assert_eq!(env_from(&[("DEV_MODE", "Yes")]).dev_mode, Some(true));
        assert_eq!(env_from(&[("DEV_MODE", "off")]).dev_mode, Some(false));
        assert_eq!(env_from(&[("DEV_MODE", "maybe")]).dev_mode, None);
    }

    #[test]
    fn unparsable_numbers_are_ignored() {
        let env = env_from(&[
            ("SERVER_PORT", "eighty"),
            ("MAP_VIEWPORT_WIDTH", "960"),
        ]);
        assert_eq!(env.server_port, None);
        assert_eq!(env.default_viewport_width, Some(960.0));
    }

    #[test]
    fn file_sections_default_when_absent() {
        let file: FileConfig = toml::from_str(
            r#"
            dev_mode = true

            [server]
            port = 8080
            "#,
        )
        .expect("parse");

        assert_eq!(file.server.port, Some(8080));
        assert_eq!(file.server.host, None);
        assert!(file.database.url.is_none());
        assert_eq!(file.dev_mode, Some(true));
    }
}
