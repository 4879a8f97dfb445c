use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use gompa_core::database::{PostgresDatabase, postgres::PoolSettings};
use gompa_server::{
    AppState, create_app,
    infra::config::{Config, ConfigLoad, ConfigLoader, ConfigLoaderOptions},
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "gompa-server")]
#[command(about = "Heritage-site catalog server for the monasteries of Sikkim")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Path to a gompa.toml configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// Serve the seeded in-memory catalog instead of PostgreSQL
    #[cfg(feature = "demo")]
    #[arg(long, env = "GOMPA_DEMO_MODE", default_value_t = false)]
    demo: bool,

    /// Bearer token that is accepted as an allow-listed admin in demo mode
    #[cfg(feature = "demo")]
    #[arg(long, env = "GOMPA_DEMO_ADMIN_TOKEN", requires = "demo")]
    demo_admin_token: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Command::Db(DbCommand::Migrate) => {
                run_db_migrate(&cli.serve).await?;
                return Ok(());
            }
        }
    }

    run_server(cli.serve).await
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let config = load_runtime_config(args)?;
    let db = connect_database(&config).await?;
    db.initialize_schema()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: args.config.clone(),
        env_file: args.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    init_tracing();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = &config.metadata.config_path {
        info!(path = %path.display(), "loaded configuration file");
    }
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }

    Ok(config)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn connect_database(config: &Config) -> anyhow::Result<PostgresDatabase> {
    let url = config.database.primary_url.as_deref().context(
        "DATABASE_URL is not configured; set it, or start with --demo for the in-memory catalog",
    )?;
    PostgresDatabase::connect(url, PoolSettings::default())
        .await
        .context("failed to connect to PostgreSQL")
}

async fn build_state(args: &ServeArgs, config: Arc<Config>) -> anyhow::Result<AppState> {
    #[cfg(feature = "demo")]
    if args.demo {
        return Ok(build_demo_state(args, config));
    }
    #[cfg(not(feature = "demo"))]
    let _ = args;

    let db = connect_database(&config).await?;
    db.initialize_schema()
        .await
        .context("database migration failed")?;
    Ok(AppState::from_postgres(config, &db))
}

#[cfg(feature = "demo")]
fn build_demo_state(args: &ServeArgs, config: Arc<Config>) -> AppState {
    use gompa_core::{
        database::{InMemoryAllowList, InMemoryIdentityProvider},
        demo::demo_repository,
        model::SessionUser,
    };

    let repo = Arc::new(demo_repository());
    let identity = Arc::new(InMemoryIdentityProvider::default());
    let allow_list = Arc::new(InMemoryAllowList::default());

    if let Some(token) = &args.demo_admin_token {
        let admin = SessionUser {
            id: uuid::Uuid::now_v7(),
            email: Some("demo-admin@gompa.local".to_string()),
        };
        identity.insert_session(token, admin.clone());
        allow_list.allow(admin.id);
        info!(admin_id = %admin.id, "demo admin session registered");
    }

    info!(sites = repo.len(), "serving in-memory demo catalog");
    AppState::in_memory(config, repo, identity, allow_list)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = Arc::new(load_runtime_config(&args)?);
    let state = build_state(&args, config.clone()).await?;
    let app = create_app(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "gompa-server listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_for_shutdown(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            info!("HTTP server received shutdown signal");
        })
        .await
        .context("server error")?;

    Ok(())
}

async fn watch_for_shutdown(token: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        return;
    }
    token.cancel();
}
