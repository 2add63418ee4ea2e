use std::net::SocketAddr;
use std::sync::Arc;

use crate::clients::openai::OpenAiClient;
use crate::domain::classifier::Classifier;
use crate::infra::config::Config;
use crate::tools::registry::ToolRegistry;

/// Wires the provider client, the tool registry and the classifier from a validated config.
pub fn build_classifier(cfg: &Config) -> anyhow::Result<Classifier> {
    let client = OpenAiClient::from_config(&cfg.llm)?;
    Ok(Classifier::new(
        Arc::new(client),
        ToolRegistry::default(),
        cfg.llm.model.clone(),
    ))
}

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;
    tracing::info!(
        port = cfg.port,
        model = %cfg.llm.model,
        base_url = %cfg.llm.base_url,
        "BOOT card-classifier"
    );

    let classifier = Arc::new(build_classifier(&cfg)?);
    let app = crate::infra::http_app::build_app(classifier);

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::LlmConfig;

    #[tokio::test]
    async fn refuses_to_start_without_api_key() {
        let cfg = Config { port: 8080, llm: LlmConfig::default() };
        let err = run_server(cfg).await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn classifier_uses_configured_model() {
        let cfg = Config {
            port: 8080,
            llm: LlmConfig { api_key: Some("sk".into()), model: "gpt-4o".into(), ..LlmConfig::default() },
        };
        let c = build_classifier(&cfg).unwrap();
        assert_eq!(c.build_request("x").model, "gpt-4o");
    }
}
