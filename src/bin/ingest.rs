//! Loads activity events or persons from a JSON Lines file.
//!
//! ```text
//! ingest events  data/activityevents.jsonl --batch-size 500
//! ingest persons data/persons.jsonl --ignore-errors
//! ```

use {
    clap::{Parser, Subcommand},
    sqlx::PgPool,
    std::path::PathBuf,
    timeline_api::{
        config::Config,
        domain::{
            error::{IngestError, TimelineError},
            event::NewActivityEvent,
            person::Person,
        },
        infra::postgres::{self, event_repo, person_repo},
        services::ingest::{DEFAULT_BATCH_SIZE, ImportOptions, import_records, open_jsonl},
    },
    tracing_subscriber::EnvFilter,
};

#[derive(Debug, Parser)]
#[command(name = "ingest", about = "Import timeline data from JSON Lines files")]
struct Cli {
    #[command(subcommand)]
    entity: Entity,
}

#[derive(Debug, Subcommand)]
enum Entity {
    /// Import ActivityEvent records
    Events(ImportArgs),
    /// Import Person records
    Persons(ImportArgs),
}

#[derive(Debug, clap::Args)]
struct ImportArgs {
    /// Path to the .jsonl file
    jsonl_path: PathBuf,

    /// Number of rows to insert per transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, value_parser = parse_batch_size)]
    batch_size: usize,

    /// Skip lines that cannot be parsed instead of aborting the import
    #[arg(long)]
    ignore_errors: bool,
}

impl ImportArgs {
    fn options(&self) -> ImportOptions {
        ImportOptions {
            batch_size: self.batch_size,
            ignore_errors: self.ignore_errors,
        }
    }
}

fn parse_batch_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("batch size must be a positive integer, got: {raw}")),
    }
}

async fn import_events(pool: &PgPool, args: &ImportArgs) -> Result<u64, IngestError> {
    let reader = open_jsonl(&args.jsonl_path).await?;
    tracing::info!(
        "Starting import from {} (batch size {})",
        args.jsonl_path.display(),
        args.batch_size
    );

    import_records(reader, args.options(), |batch: Vec<NewActivityEvent>| async move {
        let mut tx = pool.begin().await?;
        let n = event_repo::insert_events(&mut tx, &batch).await?;
        tx.commit().await?;
        Ok::<_, TimelineError>(n)
    })
    .await
}

async fn import_persons(pool: &PgPool, args: &ImportArgs) -> Result<u64, IngestError> {
    let reader = open_jsonl(&args.jsonl_path).await?;
    tracing::info!(
        "Starting import from {} (batch size {})",
        args.jsonl_path.display(),
        args.batch_size
    );

    import_records(reader, args.options(), |batch: Vec<Person>| async move {
        let mut tx = pool.begin().await?;
        let n = person_repo::insert_persons(&mut tx, &batch).await?;
        tx.commit().await?;
        Ok::<_, TimelineError>(n)
    })
    .await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let pool = postgres::connect(&config).await?;
    postgres::migrate(&pool).await?;

    match &cli.entity {
        Entity::Events(args) => import_events(&pool, args).await?,
        Entity::Persons(args) => import_persons(&pool, args).await?,
    };

    pool.close().await;
    Ok(())
}
