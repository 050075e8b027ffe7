use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use concordance_index::Concordance;
use concordance_service::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_SOURCE: &str = "kjv12.txt";
// A prime keeps the quadratic probe sequences long; power-of-two sizes
// send a large share of keys to the degenerate zero-stride slot.
const DEFAULT_TABLE_SIZE: usize = 49_999;
const MAX_RESULTS: usize = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!("using scripture source at {}", config.source.display());
    info!("table capacity {}", config.table_size);

    let start = Instant::now();
    let concordance = Concordance::build_from_file(&config.source, config.table_size)?;
    info!("concordance built in {} ms", start.elapsed().as_millis());

    let state = AppState {
        concordance: Arc::new(concordance),
        max_results: MAX_RESULTS,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("invalid listen address");
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    source: PathBuf,
    table_size: usize,
}

fn load_config() -> Config {
    let mut cli_source: Option<PathBuf> = None;
    let mut cli_table_size: Option<usize> = None;
    let mut args = env::args().skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--source" => {
                if let Some(path) = args.next() {
                    cli_source = Some(PathBuf::from(path));
                }
            }
            "--table-size" => {
                if let Some(size) = args.next() {
                    cli_table_size = size.parse().ok();
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--source=") {
                    cli_source = Some(PathBuf::from(path));
                } else if let Some(size) = arg.strip_prefix("--table-size=") {
                    cli_table_size = size.parse().ok();
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let source = cli_source
        .or_else(|| env::var("SCRIPTURE_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    let table_size = cli_table_size
        .or_else(|| env::var("TABLE_SIZE").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(DEFAULT_TABLE_SIZE);

    Config {
        host,
        port,
        source,
        table_size,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
