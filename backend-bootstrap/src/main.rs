use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "palisade-backend")]
#[command(about = "Palisade game-server log ingestion backend", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("PALISADE_CONFIG", config);
    }

    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // PALISADE_LOG_DIR switches to a daily-rolling file; stdout otherwise
    let _file_guard = if let Ok(log_dir) = std::env::var("PALISADE_LOG_DIR") {
        let appender = tracing_appender::rolling::daily(log_dir, "palisade-backend.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(filter()).init();
        None
    };

    backend_bootstrap::run_standalone().await
}
