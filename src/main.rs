use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod dashboard;
mod ingest;
mod insights;
mod metrics;
mod models;
mod report;
mod roles;
mod sample;
mod table;

use dashboard::{Dashboard, DashboardContext};
use models::Role;

#[derive(Parser)]
#[command(name = "placement-insights")]
#[command(about = "Placement dashboard for student CSV exports", long_about = None)]
struct Cli {
    /// Cosmetic delay before insights are shown
    #[arg(
        long,
        global = true,
        env = "PLACEMENT_INSIGHTS_DELAY_MS",
        default_value_t = 1500
    )]
    delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which column was picked for each role
    Roles {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the metric cards
    Summary {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the insight cards
    Insights {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Count occurrences of each value in a column
    Chart {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        column: String,
        #[arg(long)]
        json: bool,
    },
    /// Search, sort and page through the records
    Table {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, env = "PLACEMENT_INSIGHTS_PAGE_SIZE", default_value_t = 10)]
        page_size: usize,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write the sample CSV template
    Sample {
        #[arg(long, default_value = sample::SAMPLE_FILE_NAME)]
        out: PathBuf,
    },
}

async fn read_upload(path: &Path) -> anyhow::Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

async fn load(dashboard: &mut Dashboard, path: &Path) -> anyhow::Result<Arc<DashboardContext>> {
    let text = read_upload(path).await?;
    let context = dashboard.load(&text);
    if context.dataset.is_empty() {
        warn!(file = %path.display(), "no placement records found");
    }
    Ok(context)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut dashboard = Dashboard::new(Duration::from_millis(cli.delay_ms));

    match cli.command {
        Commands::Roles { csv, json } => {
            let context = load(&mut dashboard, &csv).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&context.roles)?);
            } else {
                for role in Role::ALL {
                    println!("{:<16} {}", role, context.roles.get(role).unwrap_or("N/A"));
                }
            }
        }
        Commands::Summary { csv, json } => {
            let context = load(&mut dashboard, &csv).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&context.metrics)?);
            } else if context.dataset.is_empty() {
                println!("No placement data available.");
            } else {
                for (label, value) in report::metric_cards(&context.metrics) {
                    println!("{label:<16} {value}");
                }
            }
        }
        Commands::Insights { csv, json } => {
            load(&mut dashboard, &csv).await?;
            if dashboard.is_loading() {
                info!("analysing placement data");
            }
            let insights = dashboard.insights().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&insights)?);
            } else if insights.is_empty() {
                println!("No insights for the columns in this file.");
            } else {
                for insight in &insights {
                    println!("- {}", report::insight_line(insight));
                }
            }
        }
        Commands::Chart { csv, column, json } => {
            let context = load(&mut dashboard, &csv).await?;
            if !context.dataset.has_header(&column) {
                warn!(column = %column, "column not present in upload");
            }
            let groups = metrics::group_counts(&context.dataset, &column);

            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else if groups.is_empty() {
                println!("No values recorded for {column}.");
            } else {
                for group in &groups {
                    println!("{:<24} {}", group.name, group.count);
                }
            }
        }
        Commands::Table {
            csv,
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            let context = load(&mut dashboard, &csv).await?;
            let mut records = table::search(&context.dataset, &search);
            if let Some(header) = sort.as_deref() {
                table::sort_by_column(&mut records, header, desc);
            }
            let page = table::paginate(records, page, page_size);

            if page.total_matches == 0 {
                println!("No matching records.");
                return Ok(());
            }

            let headers = &context.dataset.headers;
            println!("{}", headers.join(" | "));
            for record in &page.records {
                let cells: Vec<&str> = headers
                    .iter()
                    .map(|header| record.get(header).map(String::as_str).unwrap_or_default())
                    .collect();
                println!("{}", cells.join(" | "));
            }
            println!(
                "Page {} of {} ({} matching records)",
                page.page, page.total_pages, page.total_matches
            );
        }
        Commands::Report { csv, out } => {
            let context = load(&mut dashboard, &csv).await?;
            let insights = dashboard.insights().await?;
            let source = csv.display().to_string();
            let report = report::build_report(&source, chrono::Utc::now(), &context, &insights);
            tokio::fs::write(&out, report)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Sample { out } => {
            tokio::fs::write(&out, sample::SAMPLE_CSV)
                .await
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Sample written to {}.", out.display());
        }
    }

    Ok(())
}
