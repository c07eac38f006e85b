//! Shoal server binary: runs the TCP endpoint on the fixed broker port.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("shoal=info".parse()?))
        .init();

    shoal::run_server("0.0.0.0:9092").await?;
    Ok(())
}
