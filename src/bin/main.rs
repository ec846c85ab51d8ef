use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "moviefinder-server")]
#[command(about = "Movie search and recommendation server", long_about = None)]
struct Args {
    /// YAML config file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

// One thread: handlers interleave on I/O waits and never run in parallel.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "moviefinder=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if args.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = moviefinder::run(args.config.as_deref()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
