use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "card-classifier")]
#[command(about = "Book/author card classifier - server and admin CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve,
    /// Health check a running service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Classify one text against the configured provider and print the result
    Classify {
        /// Text to classify
        #[arg(short, long)]
        text: String,
    },
    /// Print the tool specifications sent to the provider
    Tools,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match serve().await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "server exited");
                eprintln!("❌ Server failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate } => match show_config(validate) {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Classify { text } => match classify_once(&text).await {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Classification failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Tools => match print_tools() {
            Ok(out) => {
                println!("{}", out);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Could not render tools: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn serve() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;
    crate::infra::boot::run_server(cfg).await
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

/// Loads the config; with `validate` also requires it to be servable.
fn show_config(validate: bool) -> anyhow::Result<()> {
    let cfg = Config::from_env()?;

    println!("📋 Configuration:");
    println!("  Port: {}", cfg.port);
    println!("  Provider: {}", cfg.llm.base_url);
    println!("  Model: {}", cfg.llm.model);
    println!(
        "  API key: {}",
        if cfg.llm.api_key.is_some() { "set" } else { "not set" }
    );
    println!(
        "  Timeouts: connect {}ms, request {}ms",
        cfg.llm.connect_timeout_ms, cfg.llm.timeout_ms
    );

    if validate {
        cfg.validate()?;
    }
    Ok(())
}

async fn classify_once(text: &str) -> anyhow::Result<String> {
    let cfg = Config::from_env()?;
    cfg.validate()?;
    let classifier = crate::infra::boot::build_classifier(&cfg)?;
    let outcome = classifier.classify(text).await?;
    Ok(serde_json::to_string_pretty(&outcome)?)
}

fn print_tools() -> anyhow::Result<String> {
    let tools = crate::tools::registry::ToolRegistry::default().openai_tools();
    Ok(serde_json::to_string_pretty(&tools)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const KEYS: &[&str] = &[
        "CLASSIFIER_CONFIG",
        "PORT",
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "CLASSIFIER_MODEL",
        "LLM_CONNECT_TIMEOUT_MS",
        "LLM_TIMEOUT_MS",
    ];

    fn clear_env() {
        for k in KEYS {
            env::remove_var(k);
        }
    }

    #[tokio::test]
    async fn health_check_fails_without_service() {
        let result = health_check("http://localhost:9").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn health_check_ok_and_error_paths() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        assert!(health_check(&server.base_url()).await.is_ok());

        let bad = MockServer::start();
        bad.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500); });
        assert!(health_check(&bad.base_url()).await.is_err());
    }

    #[test]
    #[serial]
    fn show_config_valid_with_api_key() {
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-test");
        assert!(show_config(true).is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn show_config_without_key_loads_but_does_not_validate() {
        clear_env();
        assert!(show_config(false).is_ok());
        let err = show_config(true).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn print_tools_renders_both_functions() {
        let out = print_tools().unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
        assert!(out.contains("make_book_card"));
        assert!(out.contains("make_author_card"));
    }

    #[tokio::test]
    #[serial]
    async fn classify_once_against_mock_provider() {
        use httpmock::prelude::*;
        use serde_json::json;
        clear_env();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(json!({"choices": [{
                "finish_reason": "tool_calls",
                "message": {"role": "assistant", "tool_calls": [{
                    "id": "call_1", "type": "function",
                    "function": {
                        "name": "make_author_card",
                        "arguments": "{\"name\":\"Jane Austen\",\"birth_year\":1775,\"nationality\":\"British\",\"notable_works\":[\"Emma\"]}"
                    }
                }]}
            }]}));
        });
        env::set_var("OPENAI_API_KEY", "sk-test");
        env::set_var("OPENAI_BASE_URL", server.base_url());

        let out = classify_once("Jane Austen was an English novelist").await.unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["name"], "Jane Austen");
        assert_eq!(v["notable_works"], json!(["Emma"]));
        clear_env();
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_config_failure_without_key() {
        clear_env();
        let code = run_commands(Commands::Config { validate: true }).await;
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_classify_fails_without_key() {
        clear_env();
        let code = run_commands(Commands::Classify { text: "abc".into() }).await;
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[tokio::test]
    async fn run_commands_health_success() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        let code = run_commands(Commands::Health { url: server.base_url() }).await;
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[tokio::test]
    async fn run_commands_tools_succeeds() {
        assert_eq!(run_commands(Commands::Tools).await, ExitCode::SUCCESS);
    }

    #[test]
    fn cli_defaults_to_serve() {
        let cli = Cli::parse_from(["card-classifier"]);
        assert!(cli.command.is_none());
        let cli = Cli::parse_from(["card-classifier", "classify", "--text", "Emma"]);
        assert!(matches!(cli.command, Some(Commands::Classify { ref text }) if text == "Emma"));
    }
}
