use anyhow::Result;
use openaq::{Client, LatestQuery};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG=openaq=debug shows each request.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let city = std::env::args().nth(1).unwrap_or_else(|| "Delhi".to_string());
    let client = Client::from_env()?;

    let query = LatestQuery::new().city(city).parameter("pm25").has_geo(true);
    let latest = client.latest(&query)?;

    println!("{}", serde_json::to_string_pretty(&latest)?);
    Ok(())
}
