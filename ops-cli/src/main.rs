use clap::Parser;
use error_common::{log_error, Result};
use ops_cli::{init_tracing, run, Args};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose, args.json);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting tenant schema startup guard");

    if let Err(e) = run(&args).await {
        log_error("tenant-check", &e);
        return Err(e);
    }
    Ok(())
}
