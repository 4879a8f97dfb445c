use axum::http::{Method, header::HeaderName};
use thiserror::Error;

use super::models::{CatalogConfig, Config, CorsConfig};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
    #[error("login path `{path}` must be an absolute path or an http(s) URL")]
    InvalidLoginPath { path: String },
    #[error("map viewport width {value} must be a positive number")]
    InvalidViewportWidth { value: f64 },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }

    validate_cors(&config.cors)?;
    validate_login_path(&config.auth.login_path)?;
    validate_catalog(&config.catalog)?;

    if config.database.primary_url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; the server can only start in demo mode",
            "Set DATABASE_URL (or [database] url in gompa.toml) or pass --demo",
        );
    }

    Ok(warnings)
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allow_credentials
        && (cors.allowed_origins.is_empty() || cors.is_wildcard_included())
    {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason: "CORS_ALLOW_CREDENTIALS requires an explicit origin list"
                .into(),
        });
    }

    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{}` in CORS_ALLOWED_METHODS",
                    method
                ),
            }
        })?;
    }

    if cors.allowed_headers.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_HEADERS must include at least one header name"
                    .into(),
        });
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{}` in CORS_ALLOWED_HEADERS",
                    header
                ),
            }
        })?;
    }

    Ok(())
}

fn validate_login_path(path: &str) -> Result<(), ConfigGuardRailError> {
    let trimmed = path.trim();
    let is_path = trimmed.starts_with('/') && !trimmed.starts_with("//");
    let is_url = url::Url::parse(trimmed)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);

    if is_path || is_url {
        Ok(())
    } else {
        Err(ConfigGuardRailError::InvalidLoginPath {
            path: path.to_string(),
        })
    }
}

fn validate_catalog(catalog: &CatalogConfig) -> Result<(), ConfigGuardRailError> {
    let width = catalog.default_viewport_width;
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ConfigGuardRailError::InvalidViewportWidth { value: width })
    }
}
