//! Book/author classification over a single tool-calling completion.
//!
//! The model decides whether the text is about a book or an author and fills in
//! the fields; this module only honours the tool-call contract:
//!
//! - the first call naming a known tool decides the card, later calls are ignored
//! - calls naming an unknown tool are skipped
//! - no usable call at all is a soft [`Classification::Miss`]
//! - a `tool_calls` finish without any calls attached is an upstream fault
//! - undecodable or ill-typed arguments are hard errors, never a miss

use std::sync::Arc;

use serde_json::Value;

use crate::core::completion::{ChatCompletions, ChatMessage, ChatRequest, Choice};
use crate::core::error::ClassifyError;
use crate::core::tool::CardTool;
use crate::domain::Classification;
use crate::infra::logging::log_metric;
use crate::tools::registry::ToolRegistry;

pub const SYSTEM_PROMPT: &str =
    "You are an assistant that extracts structured data about books or authors from a text.";

/// The model chooses whether and which tool to call.
pub const TOOL_CHOICE: &str = "auto";

#[derive(Clone)]
pub struct Classifier {
    backend: Arc<dyn ChatCompletions>,
    registry: ToolRegistry,
    model: String,
}

impl Classifier {
    pub fn new(backend: Arc<dyn ChatCompletions>, registry: ToolRegistry, model: impl Into<String>) -> Self {
        Self {
            backend,
            registry,
            model: model.into(),
        }
    }

    /// The user text is passed through verbatim.
    pub fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(text)],
            tools: self.registry.openai_tools(),
            tool_choice: TOOL_CHOICE.to_string(),
        }
    }

    pub async fn classify(&self, text: &str) -> Result<Classification, ClassifyError> {
        let request = self.build_request(text);
        let completion = self.backend.complete(&request).await?;
        let choice = completion
            .choices
            .first()
            .ok_or(ClassifyError::EmptyCompletion)?;
        let outcome = self.interpret(choice)?;
        match &outcome {
            Classification::Card(card) => {
                tracing::info!(kind = card.kind(), completion_id = ?completion.id, "text classified");
                log_metric("classify", "card_total", 1.0);
            }
            Classification::Miss => {
                tracing::info!(
                    finish_reason = ?choice.finish_reason,
                    completion_id = ?completion.id,
                    "no usable tool call"
                );
                log_metric("classify", "miss_total", 1.0);
            }
        }
        Ok(outcome)
    }

    /// Turns the top choice of a completion into a classification.
    pub fn interpret(&self, choice: &Choice) -> Result<Classification, ClassifyError> {
        if !choice.called_tools() {
            return Ok(Classification::Miss);
        }
        let calls = choice.message.tool_calls.as_deref().ok_or_else(|| {
            ClassifyError::UpstreamBody("finish_reason is tool_calls but no tool calls were returned".into())
        })?;
        for call in calls {
            let name = call.function.name.as_str();
            let args: Value = serde_json::from_str(&call.function.arguments).map_err(|source| {
                ClassifyError::ArgumentDecode {
                    tool: name.to_string(),
                    source,
                }
            })?;
            match self.registry.get(name) {
                Some(tool) => return Ok(Classification::Card(tool.construct(args)?)),
                None => tracing::debug!(tool = name, "skipping call to unknown tool"),
            }
        }
        Ok(Classification::Miss)
    }
}
