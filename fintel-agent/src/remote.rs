//! Optional remote completion path (OpenAI-compatible chat endpoint).
//!
//! This module only transports: it returns a typed `Result` and never
//! substitutes a local reply itself. The caller decides what to do with
//! a failure (in practice: log it and use the local template).

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::config::AgentConfig;
use crate::context::AnalysisContext;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

// Defensive: the source had no timeout on this call at all.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct Msg {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct Req {
    model: String,
    messages: Vec<Msg>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: Option<String>,
}

/// Forward a question plus the financial-context summary to the
/// completion endpoint and return the reply text.
pub async fn complete(cfg: &AgentConfig, question: &str, ctx: &AnalysisContext) -> Result<String> {
    let key = cfg
        .openai
        .api_key
        .as_deref()
        .filter(|k| !k.trim().is_empty())
        .context("no api_key configured; remote completions are disabled")?;

    let body = Req {
        model: cfg.openai.model.clone(),
        messages: build_messages(cfg, question, ctx),
        temperature: cfg.openai.temperature,
        max_tokens: cfg.openai.max_tokens,
    };

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")?;

    let resp = client
        .post(COMPLETIONS_URL)
        .header(AUTHORIZATION, format!("Bearer {key}"))
        .json(&body)
        .send()
        .await
        .context("completion request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("completion error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse completion response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    let content = content.trim();
    if content.is_empty() {
        bail!("completion response contained no text");
    }
    Ok(content.to_string())
}

/// Blocking wrapper for synchronous UI loops.
///
/// The CLI runs under #[tokio::main], so we're often already inside a
/// runtime; a nested `block_on` would panic. Use block_in_place under a
/// running runtime, else spin one up.
pub fn complete_blocking(cfg: &AgentConfig, question: &str, ctx: &AnalysisContext) -> Result<String> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        tokio::task::block_in_place(|| handle.block_on(complete(cfg, question, ctx)))
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        rt.block_on(complete(cfg, question, ctx))
    }
}

fn build_messages(cfg: &AgentConfig, question: &str, ctx: &AnalysisContext) -> Vec<Msg> {
    vec![
        Msg {
            role: "system".to_string(),
            content: format!(
                "{}\nAlways keep advice practical and concise.",
                cfg.system_prompt()
            ),
        },
        Msg {
            role: "user".to_string(),
            content: format!("Question: {question}\n\n{}", ctx.context_block()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintel_core::{KeywordTable, Totals};

    fn ctx() -> AnalysisContext {
        AnalysisContext::build(&KeywordTable::default_table(), &[], Totals::default())
    }

    #[tokio::test]
    async fn test_missing_key_is_an_error_not_a_request() {
        let cfg = AgentConfig::default();
        let err = complete(&cfg, "hi", &ctx()).await.unwrap_err();
        assert!(err.to_string().contains("no api_key"));
    }

    #[test]
    fn test_messages_embed_question_and_context() {
        let mut cfg = AgentConfig::default();
        cfg.openai.system_prompt = Some("Be brief.".to_string());
        let msgs = build_messages(&cfg, "How am I doing?", &ctx());
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].role, "system");
        assert!(msgs[0].content.starts_with("Be brief."));
        assert!(msgs[1].content.contains("Question: How am I doing?"));
        assert!(msgs[1].content.contains("Financial Context:"));
    }
}
