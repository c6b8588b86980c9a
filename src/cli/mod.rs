mod commands;
pub mod error;
mod utils;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Backend, DatabaseConfig};
use crate::db::{Database, PgDatabase, QueryHook, SqliteDatabase, TracingQueryHook};
use error::CliResult;

#[derive(Parser)]
#[command(name = "accounts")]
#[command(author, version, about = "Query the accounts table", long_about = None)]
pub struct Cli {
    /// Database URL (default: ACCOUNTS_DATABASE_URL or DATABASE_URL env)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, global = true, default_value = "5")]
    pub max_connections: u32,

    /// Abort each query after this many seconds (0 disables)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log every generated SQL statement and its parameters
    #[arg(long, global = true)]
    pub log_queries: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a single account
    Get {
        /// Account ID
        id: u64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List all accounts ordered by ID
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List accounts matching every given filter
    Filter {
        /// Match any of these names (comma-separated)
        #[arg(long)]
        names: Option<String>,
        /// Match the active flag (true or false)
        #[arg(long)]
        active: Option<bool>,
        /// Match any of these favorite colors (comma-separated)
        #[arg(long)]
        colors: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

/// Initialize tracing subscriber with env filter, writing to stderr
fn init_tracing(log_queries: bool) {
    let default_filter = if log_queries {
        "accounts=debug"
    } else {
        "accounts=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_queries);

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["accounts", "--help"]);
        return Ok(());
    };

    let config = DatabaseConfig::from_env(cli.database_url)?
        .with_max_connections(cli.max_connections)?
        .with_query_timeout(cli.timeout_secs.map(Duration::from_secs))
        .with_log_queries(cli.log_queries);

    let hook: Option<Arc<dyn QueryHook>> = if config.log_queries {
        Some(Arc::new(TracingQueryHook))
    } else {
        None
    };

    let output = match config.backend {
        Backend::Sqlite => {
            let mut db = SqliteDatabase::connect(&config.url, config.max_connections).await?;
            if let Some(hook) = hook {
                db = db.with_query_hook(hook);
            }
            execute(&db, &config, command).await?
        }
        Backend::Postgres => {
            let mut db = PgDatabase::connect(&config.url, config.max_connections).await?;
            if let Some(hook) = hook {
                db = db.with_query_hook(hook);
            }
            execute(&db, &config, command).await?
        }
    };

    println!("{}", output);
    Ok(())
}

async fn execute<D: Database>(
    db: &D,
    config: &DatabaseConfig,
    command: Commands,
) -> CliResult<String> {
    let accounts = db.accounts();
    let ctx = config.query_context();

    // Ctrl-C cancels the in-flight query instead of killing the process mid-stream
    let token = ctx.cancellation_token().clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling query");
            token.cancel();
        }
    });

    let result = match command {
        Commands::Get { id, format } => {
            commands::account::get_account(&accounts, &ctx, id, &format).await
        }
        Commands::List { format } => {
            commands::account::list_accounts(&accounts, &ctx, &format).await
        }
        Commands::Filter {
            names,
            active,
            colors,
            format,
        } => {
            commands::account::filter_accounts(
                &accounts,
                &ctx,
                names.as_deref(),
                active,
                colors.as_deref(),
                &format,
            )
            .await
        }
    };

    interrupt.abort();
    result
}
