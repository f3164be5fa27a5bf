//! External (LLM) breakdown over an OpenAI-compatible chat-completions API.
//!
//! The model is asked for 3-7 subtasks as a JSON array of
//! `{"subtask_name", "estimated_days"}` objects. The resource profile is
//! stated in the prompt, so results are not speed-adjusted afterwards.

use std::time::Duration;

use serde::Deserialize;

use super::{BreakdownRequest, BreakdownStrategy};
use crate::config::ExternalBreakdownConfig;
use crate::error::{EngineError, Result};
use crate::models::Subtask;

/// Breakdown strategy backed by a remote language model.
#[derive(Debug, Clone)]
pub struct ExternalBreakdown {
    config: ExternalBreakdownConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl ExternalBreakdown {
    /// Creates the strategy.
    pub fn new(config: ExternalBreakdownConfig) -> Self {
        Self { config }
    }

    fn system_prompt(request: &BreakdownRequest) -> String {
        format!(
            "You are a project management expert. Break down tasks into 3-7 actionable subtasks. \
             Return JSON array with 'subtask_name' and 'estimated_days' fields. \
             Consider Resource Speed (1-10, current={}) and Quality (1-10, current={}). \
             Higher speed means faster execution.",
            request.resource_speed, request.resource_quality
        )
    }

    fn user_prompt(request: &BreakdownRequest) -> String {
        format!("Break down this {} task: {}", request.task_type, request.task_name)
    }

    fn request_body(&self, request: &BreakdownRequest) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": Self::system_prompt(request) },
                { "role": "user", "content": Self::user_prompt(request) },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        })
    }
}

/// Extracts the subtask array from a model reply, tolerating prose or a
/// fenced code block around it.
fn parse_plan(content: &str) -> Result<Vec<Subtask>> {
    let start = content.find('[');
    let end = content.rfind(']');
    let json = match (start, end) {
        (Some(s), Some(e)) if e > s => &content[s..=e],
        _ => {
            return Err(EngineError::Breakdown(
                "model reply contains no JSON array".into(),
            ))
        }
    };

    let plan: Vec<Subtask> = serde_json::from_str(json)
        .map_err(|e| EngineError::Breakdown(format!("unreadable subtask list: {e}")))?;

    if plan.iter().any(|s| !s.estimated_days.is_finite() || s.estimated_days < 0.0) {
        return Err(EngineError::Breakdown("negative or non-finite estimate".into()));
    }
    Ok(plan)
}

impl BreakdownStrategy for ExternalBreakdown {
    fn name(&self) -> &'static str {
        "external"
    }

    fn breakdown(&self, request: &BreakdownRequest) -> Result<Vec<Subtask>> {
        let api_key = std::env::var(&self.config.api_key_env).map_err(|_| {
            EngineError::Breakdown(format!("API key not set in ${}", self.config.api_key_env))
        })?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build();

        let body = serde_json::to_string(&self.request_body(request))
            .map_err(|e| EngineError::Breakdown(format!("JSON serialize error: {e}")))?;

        let resp = agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {api_key}"))
            .send_string(&body)
            .map_err(|e: ureq::Error| EngineError::Breakdown(e.to_string()))?;

        let reply: ChatResponse = resp
            .into_json()
            .map_err(|e| EngineError::Breakdown(format!("unreadable response: {e}")))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| EngineError::Breakdown("response has no choices".into()))?;

        let plan = parse_plan(&content)?;
        tracing::debug!(
            model = %self.config.model,
            task = %request.task_name,
            steps = plan.len(),
            "external breakdown"
        );
        Ok(plan)
    }
}
