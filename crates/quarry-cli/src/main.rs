//! quarry CLI
//!
//! Runs a constrained SELECT over a cataloged delimited file and prints the
//! result grid.

mod parse;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use quarry_engine::Engine;
use quarry_storage::Catalog;

use crate::parse::QueryArgs;

/// Analytical SELECT queries over delimited files.
#[derive(Parser)]
#[command(name = "quarry")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Table to query; the path's stem names the catalog entry.
    #[arg(short, long, visible_alias = "file", value_name = "PATH")]
    table: PathBuf,

    /// Filter condition of the form `COL OP LITERAL`, e.g. `price>=20`.
    #[arg(short, long, value_name = "COND")]
    r#where: Option<String>,

    /// Aggregate spec `column=FUNC` (or `*=COUNT`); repeatable.
    #[arg(short, long, value_name = "SPEC")]
    aggregate: Vec<String>,

    /// Column to group by; repeatable.
    #[arg(short, long, value_name = "COL")]
    group_by: Vec<String>,

    /// Column to sort by, ascending; repeatable.
    #[arg(short, long, visible_alias = "order-by", value_name = "COL")]
    sort: Vec<String>,

    /// Rows to skip from the start of the result.
    #[arg(long, value_name = "N")]
    offset: Option<usize>,

    /// Maximum number of rows to return.
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Catalog config file declaring the queryable tables.
    #[arg(short, long, default_value = "catalog.json", value_name = "PATH")]
    catalog: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = Catalog::from_config_file(&cli.catalog)
        .with_context(|| format!("loading catalog from {}", cli.catalog.display()))?;

    let table_name = cli
        .table
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .context("--table value has no file stem")?;
    let table = catalog.resolve(&table_name)?;
    debug!(table = %table_name, "resolved table");

    let args = QueryArgs {
        r#where: cli.r#where,
        aggregates: cli.aggregate,
        group_bys: cli.group_by,
        sort: cli.sort,
        offset: cli.offset,
        limit: cli.limit,
    };
    let statement = parse::resolve_statement(&table_name, table.schema(), &args)?;

    let rows = Engine::new(&catalog).execute(&statement)?;
    println!("{}", render::render(&rows));

    Ok(())
}
