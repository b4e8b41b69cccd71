mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use proof_your_health::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
