//! Builds [`Config`] from `.env`, an optional `gompa.toml` and the process
//! environment. A value present in the environment beats the same value in
//! the file; anything set in neither takes its default.

use std::{fs, path::PathBuf};

use thiserror::Error;
use url::Url;

use super::{
    models::{
        AuthConfig, CatalogConfig, Config, ConfigMetadata, CorsConfig,
        DEFAULT_HOST, DEFAULT_LOGIN_PATH, DEFAULT_PORT, DEFAULT_VIEWPORT_WIDTH,
        DatabaseConfig, ServerConfig, default_cors_headers,
        default_cors_methods, default_cors_origins,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

/// Looked up relative to the working directory when no path is given.
const SEARCHED_CONFIG_FILES: &[&str] = &["gompa.toml", "config/gompa.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file not found: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid database URL")]
    InvalidDatabaseUrl {
        #[source]
        source: url::ParseError,
    },
    #[error("database URL scheme `{scheme}` is not PostgreSQL")]
    UnsupportedDatabaseScheme { scheme: String },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = self.read_env_file()?;
        self.load_with_env(EnvConfig::gather(), env_file_loaded)
    }

    /// [`ConfigLoader::load`] minus the `.env` step, for an already gathered
    /// environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();

        let config_path = self.locate_config_file(&env)?;
        let file = match &config_path {
            Some(path) => read_config_file(path)?,
            None => {
                warnings.push_with_hint(
                    "No gompa.toml found; using environment variables and defaults",
                    "Create gompa.toml, pass --config or set GOMPA_CONFIG",
                );
                FileConfig::default()
            }
        };

        let config = merge(
            env,
            file,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        )?;
        warnings.extend(validation::apply_guard_rails(&config)?);

        Ok(ConfigLoad { config, warnings })
    }

    /// A missing `.env` is not an error; a malformed one is.
    fn read_env_file(&self) -> Result<bool, ConfigLoadError> {
        let outcome = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match outcome {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// `--config` beats `GOMPA_CONFIG`, and a requested file must exist.
    /// Without either, the first searched location that exists is used.
    fn locate_config_file(
        &self,
        env: &EnvConfig,
    ) -> Result<Option<PathBuf>, ConfigLoadError> {
        let requested = self
            .options
            .config_path
            .as_ref()
            .or(env.config_path.as_ref());

        match requested {
            Some(path) if path.is_file() => Ok(Some(path.clone())),
            Some(path) => Err(ConfigLoadError::MissingConfig { path: path.clone() }),
            None => Ok(SEARCHED_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.is_file())),
        }
    }
}

fn read_config_file(path: &PathBuf) -> Result<FileConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.clone(),
        source,
    })
}

fn merge(
    env: EnvConfig,
    file: FileConfig,
    metadata: ConfigMetadata,
) -> Result<Config, ConfigLoadError> {
    let primary_url = non_blank(env.database_url)
        .or_else(|| non_blank(file.database.url))
        .map(check_database_url)
        .transpose()?;

    Ok(Config {
        server: ServerConfig {
            host: env
                .server_host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file.server.port).unwrap_or(DEFAULT_PORT),
        },
        database: DatabaseConfig { primary_url },
        cors: CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file.cors.allowed_origins)
                .unwrap_or_else(default_cors_origins),
            allowed_methods: env
                .cors_allowed_methods
                .or(file.cors.allowed_methods)
                .unwrap_or_else(default_cors_methods),
            allowed_headers: env
                .cors_allowed_headers
                .or(file.cors.allowed_headers)
                .unwrap_or_else(default_cors_headers),
            allow_credentials: env
                .cors_allow_credentials
                .or(file.cors.allow_credentials)
                .unwrap_or(false),
        },
        auth: AuthConfig {
            login_path: env
                .login_path
                .or(file.auth.login_path)
                .unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
        },
        catalog: CatalogConfig {
            default_viewport_width: env
                .default_viewport_width
                .or(file.catalog.default_viewport_width)
                .unwrap_or(DEFAULT_VIEWPORT_WIDTH),
        },
        dev_mode: env.dev_mode.or(file.dev_mode).unwrap_or(false),
        metadata,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// The URL is handed to sqlx untouched; only its shape is checked here.
fn check_database_url(raw: String) -> Result<String, ConfigLoadError> {
    let parsed = Url::parse(&raw)
        .map_err(|source| ConfigLoadError::InvalidDatabaseUrl { source })?;
    match parsed.scheme() {
        "postgres" | "postgresql" => Ok(raw),
        other => Err(ConfigLoadError::UnsupportedDatabaseScheme {
            scheme: other.to_string(),
        }),
    }
}
