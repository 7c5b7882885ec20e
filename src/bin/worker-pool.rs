use std::path::PathBuf;

use clap::Parser;

use fanout::config::{load_config, validate_config, AppConfig, ConfigError};
use fanout::observability::init_logging;
use fanout::pool::{Task, WorkerPool};

#[derive(Parser)]
#[command(name = "worker-pool")]
#[command(about = "Run a batch of simulated tasks through a bounded worker pool", long_about = None)]
struct Cli {
    /// Path to a TOML config file ([pool] section is used).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of workers.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Number of tasks to submit.
    #[arg(short, long)]
    tasks: Option<u64>,

    /// Simulated work per task in milliseconds.
    #[arg(long)]
    work_delay_ms: Option<u64>,

    /// Pause between submissions in milliseconds.
    #[arg(long)]
    submit_interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let pool = &mut config.pool;
    if let Some(workers) = cli.workers {
        pool.workers = workers;
    }
    if let Some(tasks) = cli.tasks {
        pool.tasks = tasks;
    }
    if let Some(ms) = cli.work_delay_ms {
        pool.work_delay_ms = ms;
    }
    if let Some(ms) = cli.submit_interval_ms {
        pool.submit_interval_ms = ms;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    let pool = WorkerPool::start(&config.pool)?;
    let results = pool.run((1..=config.pool.tasks).map(Task::new)).await?;

    println!(
        "{} tasks processed by {} workers",
        results.len(),
        config.pool.workers
    );
    Ok(())
}
