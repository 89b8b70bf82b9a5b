use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use query_detail::models::TabContent;
use query_detail::{HttpRecordSource, MemoryClipboard, QueryDetailView, Result, Tab, ViewSettings};

/// Poll one query's analytics record and print the rendered view as JSON
#[derive(Parser)]
#[command(name = "query-detail", version)]
struct Args {
    /// Normalized query hash to analyze
    query_hash: String,

    /// Base URL of the HouseWatch API
    #[arg(long, env = "HOUSEWATCH_API_URL")]
    api_url: Option<String>,

    /// Poll interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tab to render: query, metrics, explain or examples
    #[arg(long, default_value = "query")]
    tab: Tab,

    /// Exit after the first loaded record
    #[arg(long)]
    once: bool,

    /// Write the metrics table as CSV to this path on every update
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<ViewSettings> {
    let mut settings = match &args.settings {
        Some(path) => ViewSettings::load(path)?,
        None => ViewSettings::default(),
    };
    if let Some(url) = &args.api_url {
        settings.api_base_url = url.clone();
    }
    if let Some(interval_ms) = args.interval_ms {
        settings.poll.interval_ms = interval_ms;
    }
    settings.validate()?;
    Ok(settings)
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    let source = Arc::new(HttpRecordSource::new(&settings)?);

    let mut view = QueryDetailView::new(
        args.query_hash.clone(),
        settings,
        source,
        Arc::new(MemoryClipboard::new()),
    );
    view.select_tab(args.tab);

    let mut updates = view.subscribe();
    view.mount();

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let rendered = view.render();
                if rendered.content == TabContent::Loading {
                    continue;
                }

                println!("{}", serde_json::to_string_pretty(&rendered)?);

                if let Some(path) = &args.export_csv {
                    if let Some(csv) = view.export_metrics_csv() {
                        std::fs::write(path, csv?)?;
                        log::info!("Wrote metrics to {}", path.display());
                    }
                }

                if args.once {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted");
                break;
            }
        }
    }

    view.unmount();
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
