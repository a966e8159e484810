use std::time::Duration;

use tracing_subscriber::EnvFilter;

use os_survey::{survey, SurveyConfig};

const TARGET_COUNT: usize = 100;
const TIMEOUT: Duration = Duration::from_secs(15);
const TIME_BETWEEN_REQUESTS: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> os_survey::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SurveyConfig::builder()
        .target_count(TARGET_COUNT)
        .wait_timeout(TIMEOUT)
        .pause(TIME_BETWEEN_REQUESTS)
        .build();

    let report_path = config.report_path.clone();
    let entries = survey::run(config).await?;

    println!("OS distribution ({} distinct values):", entries.len());
    for (value, count) in &entries {
        println!("  {value} — {count}");
    }
    println!("Report written to {report_path}");

    Ok(())
}
