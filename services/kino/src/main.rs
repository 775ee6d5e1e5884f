use clap::Parser;
use std::process::ExitCode;
use tracing::{info, Instrument};
use uuid::Uuid;

use kino::logging::{init_logging, log_failure};
use kino::{Calculator, Cli, Config, OpapClient, WorkerPool};
use shared::errors::ServiceError;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit here with clap's status 2, before any logging or I/O
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.debug) {
        eprintln!("Error: {}", e);
        return ExitCode::from(e.exit_code() as u8);
    }

    match execute(cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_failure(&e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn execute(cli: Cli) -> Result<String, ServiceError> {
    // "Today" is fixed once, at startup
    let today = chrono::Local::now().date_naive();
    let request = cli.into_request(today)?;

    let config = Config::load().map_err(ServiceError::invalid_config)?;
    let table = config.payout_table()?;
    let client = OpapClient::from_config(&config.api)?;
    let pool = WorkerPool::new(config.evaluation.worker_count);

    let span = tracing::info_span!(
        "run",
        run_id = %Uuid::new_v4(),
        date = %request.date,
        mode = %request.mode,
    );

    async {
        info!(
            version = env!("CARGO_PKG_VERSION"),
            base_url = %config.api.base_url,
            game_id = config.api.game_id,
            worker_count = pool.worker_count(),
            cache = ?request.cache_dir,
            "Starting KINO payout calculation"
        );

        let calculator = Calculator::new(&client, &table, pool);
        let report = calculator.run(&request).await?;

        serde_json::to_string(&report).map_err(ServiceError::serialization_error)
    }
    .instrument(span)
    .await
}
