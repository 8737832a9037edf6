//! `cwcrm` - command-line front end for the CRM entity modules.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cwcrm_client::{ClientConfig, QueryParams};
use cwcrm_core::{DbId, EntityKind};
use cwcrm_views::AppContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Operation;
use output::Format;

#[derive(Parser)]
#[command(name = "cwcrm")]
#[command(about = "List, inspect and edit CRM records")]
struct Cli {
    /// CRM server URL (overrides CRM_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known entity names
    Entities,

    /// List records, optionally filtered by a search term
    List {
        entity: EntityKind,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Zero-based page index
        #[arg(long, requires = "size")]
        page: Option<u32>,

        /// Page size
        #[arg(long, requires = "page")]
        size: Option<u32>,

        /// Sort clause, e.g. `name,asc`. Repeatable.
        #[arg(long)]
        sort: Vec<String>,
    },

    /// Show one record
    Show { entity: EntityKind, id: DbId },

    /// Create a record from a JSON object
    Create {
        entity: EntityKind,

        /// Field values, e.g. '{"name": "Elderly"}'
        #[arg(long)]
        json: String,
    },

    /// Update a record; the JSON object is merged over its current fields
    Update {
        entity: EntityKind,
        id: DbId,

        #[arg(long)]
        json: String,
    },

    /// Delete a record
    Delete {
        entity: EntityKind,
        id: DbId,

        /// Confirm without prompting. Without it the delete is cancelled.
        #[arg(short, long)]
        yes: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cwcrm=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let (kind, operation) = match cli.command {
        Commands::Entities => {
            output::print_kinds(cli.format)?;
            return Ok(());
        }
        Commands::List {
            entity,
            search,
            page,
            size,
            sort,
        } => {
            let mut params = QueryParams {
                sort,
                ..Default::default()
            };
            if let (Some(page), Some(size)) = (page, size) {
                params = params.page(page, size);
            }
            (entity, Operation::List { search, params })
        }
        Commands::Show { entity, id } => (entity, Operation::Show { id }),
        Commands::Create { entity, json } => (entity, Operation::Create { json }),
        Commands::Update { entity, id, json } => (entity, Operation::Update { id, json }),
        Commands::Delete { entity, id, yes } => (
            entity,
            Operation::Delete {
                id,
                confirmed: yes,
            },
        ),
    };

    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    let ctx = AppContext::from_config(&config).context("Failed to build HTTP client")?;

    let result = commands::execute(&ctx, kind, operation, cli.format).await;
    output::print_alerts(&ctx.alerts().drain(), cli.format)?;
    result
}
