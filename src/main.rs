//! Binary entrypoint.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    kosaraju_scc::interface::cli::run().await
}
