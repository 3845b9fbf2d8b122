use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{CachePolicy, GridBuilderClient, GridSession, GridView};
use shared::domain::Alignment;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Grid endpoint; defaults to GRID_API_URL or http://localhost:3001.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch products and print the resulting rows.
    Layout {
        #[arg(long)]
        query: String,
    },
    /// Lay products out, apply row alignments and save the grid.
    Save {
        #[arg(long)]
        query: String,
        #[arg(long)]
        name: String,
        /// `ROW=ALIGNMENT` with a 1-based row number, e.g. `2=center`.
        #[arg(long = "align", value_parser = parse_row_alignment)]
        alignments: Vec<(usize, Alignment)>,
    },
    Templates,
    Grids,
}

fn parse_row_alignment(raw: &str) -> Result<(usize, Alignment), String> {
    let (row, alignment) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ROW=ALIGNMENT, got '{raw}'"))?;
    let row = row
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|row| *row > 0)
        .ok_or_else(|| format!("invalid row number '{row}'"))?;
    let alignment = alignment.parse::<Alignment>().map_err(|e| e.to_string())?;
    Ok((row, alignment))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = build_client(cli.api_url.as_deref())?;
    let endpoint = client.base_url().to_string();

    match cli.command {
        Command::Layout { query } => {
            let session = load_session(&client, &query)
                .await
                .with_context(|| format!("failed to load products from {endpoint}"))?;
            print_session(&session);
        }
        Command::Save {
            query,
            name,
            alignments,
        } => {
            let mut session = load_session(&client, &query)
                .await
                .with_context(|| format!("failed to load products from {endpoint}"))?;
            for (row, alignment) in alignments {
                let row_id = session
                    .rows()
                    .get(row - 1)
                    .map(|r| r.id.clone())
                    .ok_or_else(|| anyhow!("row {row} does not exist"))?;
                session.set_alignment(&row_id, alignment);
            }
            print_session(&session);
            let grid = client.save(&session, &name).await?;
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
        Command::Templates => {
            let templates = client
                .templates()
                .await
                .with_context(|| format!("failed to list templates from {endpoint}"))?;
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        Command::Grids => {
            let grids = client
                .grids()
                .await
                .with_context(|| format!("failed to list grids from {endpoint}"))?;
            println!("{}", serde_json::to_string_pretty(&grids)?);
        }
    }

    Ok(())
}

/// Uses `--api-url` when given, else `GRID_API_URL` or the localhost default.
fn build_client(api_url: Option<&str>) -> Result<GridBuilderClient> {
    let policy = CachePolicy::default();
    match api_url {
        Some(url) => GridBuilderClient::new(url, policy)
            .with_context(|| format!("invalid API url {url}")),
        None => GridBuilderClient::from_env(policy).context("invalid GRID_API_URL"),
    }
}

async fn load_session(client: &GridBuilderClient, query: &str) -> Result<GridSession> {
    match client.load(query).await? {
        GridView::Ready(session) => Ok(session),
        GridView::Empty => bail!("No products found for the given IDs"),
    }
}

fn print_session(session: &GridSession) {
    let stats = session.stats();
    println!(
        "{} of {} products displayed in {} rows",
        stats.displayed_products, stats.total_products, stats.row_count
    );
    if let Some(requested) = stats.requested_rows {
        println!("Using specified row count: {requested}");
    }
    if stats.has_limited_products {
        println!(
            "Some products are not displayed due to row constraints (max 3 products per row)."
        );
    }
    for (index, row) in session.rows().iter().enumerate() {
        let names: Vec<&str> = row.products.iter().map(|p| p.name.as_str()).collect();
        let alignment = row.alignment.unwrap_or_default();
        println!("row {} [{alignment}] {}", index + 1, names.join(" | "));
    }
}
