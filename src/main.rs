use tokio::fs::File;
use tokio::io::{BufReader, BufWriter};
use tracing::info;

use seatq::config::Config;
use seatq::session::Session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env(std::env::args(), |k| std::env::var(k).ok())?;
    seatq::observability::init(config.metrics_port);

    info!("seatq reading {}", config.input.display());
    info!("  output: {}", config.output.display());
    info!("  format: {:?}", config.format);

    let input = BufReader::new(File::open(&config.input).await?);
    let mut output = BufWriter::new(File::create(&config.output).await?);

    let mut session = Session::new(config.format);
    let summary = session.run(input, &mut output).await?;

    info!(
        replies = summary.replies,
        terminated = summary.terminated,
        "seatq finished"
    );
    Ok(())
}
