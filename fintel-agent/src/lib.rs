//! fintel-agent: the assistant layer: configuration, intent routing,
//! local response templates, insight summaries, the optional remote
//! completion path, and chat-transcript persistence.
//!
//! The local template path never needs configuration or network access;
//! the remote path is an optional extra that callers fall back from
//! explicitly when it fails.

pub mod config;
pub mod context;
pub mod history;
pub mod insights;
pub mod intents;
pub mod remote;
pub mod templates;

pub use config::{AgentConfig, OpenAiSection};
pub use context::AnalysisContext;
pub use history::{ChatRecord, Sender, load_history, save_history};
pub use insights::InsightCards;
pub use intents::Intent;
pub use templates::local_reply;
