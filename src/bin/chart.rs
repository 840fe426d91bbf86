use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use melon_chart::{ChartClient, HttpTransport, PeriodKind, ServerConfig, SystemClock};

const USAGE: &str = "Usage: chart <daily|weekly|monthly> [YYYY-MM-DD]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melon_chart=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(period) = args.next() else {
        anyhow::bail!(USAGE);
    };
    let kind: PeriodKind = period.parse()?;
    let date = args
        .next()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    // Chart overrides (CHART_URL, CHART_CUT_LINE) come from the environment
    let config = ServerConfig::from_env();
    let client = ChartClient::with_parts(
        &date,
        Arc::new(config.provider_config()),
        Arc::new(HttpTransport::new(config.http_timeout)?),
        Arc::new(SystemClock),
    )?;

    let result = client.fetch_chart(kind).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
