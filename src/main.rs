use clap::Parser;
use tracing_subscriber::EnvFilter;

use yt_views::commands;
use yt_views::config::{load_env, DEFAULT_MAX_RESULTS};
use yt_views::error::Error;

#[derive(Parser)]
#[command(name = "yt-views")]
#[command(about = "Search YouTube and list matching videos ranked by view count")]
#[command(version)]
struct Cli {
    /// Search query (read from stdin when omitted)
    query: Option<String>,

    /// Search query, used when no positional query is given
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Total number of results to return (default: 10, max: 50)
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    // Load environment variables
    load_env();
    init_tracing();

    let cli = Cli::parse();

    let result = commands::search::run(cli.query, cli.search, cli.max_results).await;

    match result {
        Ok(()) => {}
        Err(Error::ApiKeyMissing) => {
            // Missing configuration is reported, not treated as a failure
            println!("{}", Error::ApiKeyMissing);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
