mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use divorce_prep::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
