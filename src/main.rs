use std::process::ExitCode;

use card_classifier::{cli, infra};

#[tokio::main]
async fn main() -> ExitCode {
    infra::config::load_dotenv();
    infra::logging::init();
    cli::run().await
}
