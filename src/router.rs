//! Intent routing for the traffic assistant.
//!
//! A message is answered by the first rule that applies:
//!
//! 0. report-generator requests get a redirect signal,
//! 1. a fine trigger word (`fine`, `penalty`, `amount`) switches to fine lookup,
//! 2. the ordered canned-topic table in [`crate::knowledge::topics`],
//! 3. a remote chat completion, or the degraded help text when that is
//!    unavailable, fails, or runs past the time box.
//!
//! [`IntentRouter::classify`] never fails. The route taken is logged and
//! counted so operators can see how often the remote path degrades.

use crate::cli::Args;
use crate::knowledge::{ explanations, fines, topics::{ self, CannedTopic } };
use crate::llm::{ LlmConfig, LlmError, LlmType };
use crate::llm::chat::{ ChatClient, CompletionMessage, new_client as new_chat_client };
use crate::models::chat::{ ClassificationResult, HistoryEntry, RouterAction };
use crate::models::violation::ExplainResponse;

use log::{ info, warn };
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{ AtomicU64, Ordering };
use std::time::Duration;

pub const REPORT_TRIGGERS: [&str; 3] = ["generate report", "create report", "report generator"];
pub const REPORT_GENERATOR_PATH: &str = "/report-generator";
pub const REPORT_REDIRECT_REPLY: &str = "Redirecting you to the AI Report Generator... 📋";

pub const EMPTY_COMPLETION_REPLY: &str = "Sorry, I could not process your request.";

pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(15);

macro_rules! help_menu {
    () => {
        "🚨 **Traffic Violations & Fines**\n\
         • Ask me about specific violations with \"fine\" or \"penalty\"\n\
         • I can tell you fine amounts for common violations\n\
         \n\
         📋 **Traffic Rules**\n\
         • Ask about \"traffic rules\" for general guidance\n\
         • Emergency procedures and contacts\n\
         \n\
         🆘 **Emergency Help**\n\
         • Ask about \"emergency procedures\" for incident response\n\
         \n\
         💡 **Try asking:**\n\
         • \"What's the fine for speeding?\"\n\
         • \"Tell me about traffic rules\"\n\
         • \"What are emergency procedures?\""
    };
}

/// Reply when no completion credential is configured.
pub const DEGRADED_UNCONFIGURED: &str = concat!(
    "I'm here to help with traffic management! \n\n",
    "Since I'm not connected to advanced AI right now, here are some things I can help with:\n\n",
    help_menu!(),
    "\n\nFor more detailed answers, please ensure your OpenAI API key is properly configured."
);

const DEGRADED_FAILURE_PREFIX: &str = concat!(
    "I'm here to help with traffic management! \n\n",
    "Since I encountered an issue with the advanced AI service, here are some things I can help with:\n\n",
    help_menu!(),
    "\n\nError details: "
);

/// Reply when the completion call errors or times out.
pub fn degraded_failure_reply(detail: &str) -> String {
    format!("{}{}", DEGRADED_FAILURE_PREFIX, detail)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DegradedReason {
    Unconfigured,
    Failed,
    TimedOut,
}

/// Which rule produced a reply. Never exposed to callers, only logged and counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    ReportRedirect,
    FineLookup,
    FineNotFound,
    Canned(CannedTopic),
    Remote,
    RemoteEmpty,
    Degraded(DegradedReason),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::ReportRedirect => write!(f, "report-redirect"),
            Route::FineLookup => write!(f, "fine-lookup"),
            Route::FineNotFound => write!(f, "fine-not-found"),
            Route::Canned(topic) => write!(f, "canned:{}", topic),
            Route::Remote => write!(f, "remote"),
            Route::RemoteEmpty => write!(f, "remote-empty"),
            Route::Degraded(DegradedReason::Unconfigured) => write!(f, "degraded:unconfigured"),
            Route::Degraded(DegradedReason::Failed) => write!(f, "degraded:failed"),
            Route::Degraded(DegradedReason::TimedOut) => write!(f, "degraded:timeout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply {
    pub route: Route,
    pub message: String,
    pub action: Option<RouterAction>,
}

impl Reply {
    fn new(route: Route, message: impl Into<String>) -> Self {
        Self { route, message: message.into(), action: None }
    }
}

#[derive(Debug, Default)]
struct RouteCounters {
    report_redirect: AtomicU64,
    fine_lookup: AtomicU64,
    fine_not_found: AtomicU64,
    canned: AtomicU64,
    remote: AtomicU64,
    remote_empty: AtomicU64,
    degraded_unconfigured: AtomicU64,
    degraded_failed: AtomicU64,
    degraded_timeout: AtomicU64,
}

impl RouteCounters {
    fn record(&self, route: Route) {
        let counter = match route {
            Route::ReportRedirect => &self.report_redirect,
            Route::FineLookup => &self.fine_lookup,
            Route::FineNotFound => &self.fine_not_found,
            Route::Canned(_) => &self.canned,
            Route::Remote => &self.remote,
            Route::RemoteEmpty => &self.remote_empty,
            Route::Degraded(DegradedReason::Unconfigured) => &self.degraded_unconfigured,
            Route::Degraded(DegradedReason::Failed) => &self.degraded_failed,
            Route::Degraded(DegradedReason::TimedOut) => &self.degraded_timeout,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> RouteStats {
        let read = |c: &AtomicU64| c.load(Ordering::Relaxed);
        RouteStats {
            report_redirect: read(&self.report_redirect),
            fine_lookup: read(&self.fine_lookup),
            fine_not_found: read(&self.fine_not_found),
            canned: read(&self.canned),
            remote: read(&self.remote),
            remote_empty: read(&self.remote_empty),
            degraded_unconfigured: read(&self.degraded_unconfigured),
            degraded_failed: read(&self.degraded_failed),
            degraded_timeout: read(&self.degraded_timeout),
        }
    }
}

/// Per-route totals since startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteStats {
    pub report_redirect: u64,
    pub fine_lookup: u64,
    pub fine_not_found: u64,
    pub canned: u64,
    pub remote: u64,
    pub remote_empty: u64,
    pub degraded_unconfigured: u64,
    pub degraded_failed: u64,
    pub degraded_timeout: u64,
}

pub struct IntentRouter {
    chat_client: Option<Arc<dyn ChatClient>>,
    system_prompt: String,
    remote_timeout: Duration,
    counters: RouteCounters,
}

impl IntentRouter {
    pub fn new(chat_client: Option<Arc<dyn ChatClient>>) -> Self {
        Self {
            chat_client,
            system_prompt: crate::cli::DEFAULT_SYSTEM_PROMPT.to_string(),
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
            counters: RouteCounters::default(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let llm_type: LlmType = args.chat_llm_type.parse()?;
        let config = LlmConfig {
            llm_type,
            api_key: Some(args.chat_api_key.clone()),
            completion_model: args.chat_model.clone(),
            base_url: args.chat_base_url.clone(),
            max_tokens: args.chat_max_tokens,
            temperature: args.chat_temperature,
        };

        let chat_client = if config.usable_api_key().is_some() {
            let client = new_chat_client(&config)?;
            info!(
                "Chat client configured: Type={}, Model={}, BaseURL={}",
                llm_type,
                client.get_model(),
                client.get_base_url().unwrap_or_default()
            );
            Some(client)
        } else {
            warn!("No completion API key configured. Unmatched messages get the offline help text.");
            None
        };

        Ok(
            Self::new(chat_client)
                .with_system_prompt(args.system_prompt.clone())
                .with_timeout(Duration::from_secs(args.chat_timeout_secs))
        )
    }

    pub fn has_remote(&self) -> bool {
        self.chat_client.is_some()
    }

    pub async fn classify(&self, message: &str, history: &[HistoryEntry]) -> ClassificationResult {
        let reply = self.route(message, history).await;
        self.counters.record(reply.route);
        info!("Routed message ({} chars) via {}", message.chars().count(), reply.route);

        let result = ClassificationResult::reply(reply.message);
        match reply.action {
            Some(action) => result.with_action(action),
            None => result,
        }
    }

    pub(crate) async fn route(&self, message: &str, history: &[HistoryEntry]) -> Reply {
        let normalized = message.to_lowercase();
        if let Some(reply) = Self::route_static(&normalized) {
            return reply;
        }
        self.route_remote(message, history).await
    }

    /// Rules 0-2. Pure: same input, same reply.
    pub(crate) fn route_static(normalized: &str) -> Option<Reply> {
        if REPORT_TRIGGERS.iter().any(|t| normalized.contains(t)) {
            let mut reply = Reply::new(Route::ReportRedirect, REPORT_REDIRECT_REPLY);
            reply.action = Some(RouterAction::Redirect { target: REPORT_GENERATOR_PATH.to_string() });
            return Some(reply);
        }

        if fines::has_fine_trigger(normalized) {
            let found = fines::matching_fines(normalized);
            let route = if found.is_empty() { Route::FineNotFound } else { Route::FineLookup };
            return Some(Reply::new(route, fines::fine_reply(&found)));
        }

        topics
            ::match_topic(normalized)
            .map(|topic| Reply::new(Route::Canned(topic), topic.response()))
    }

    async fn route_remote(&self, message: &str, history: &[HistoryEntry]) -> Reply {
        let client = match &self.chat_client {
            Some(c) => c,
            None => {
                return Reply::new(
                    Route::Degraded(DegradedReason::Unconfigured),
                    DEGRADED_UNCONFIGURED
                );
            }
        };

        let messages = build_completion_messages(&self.system_prompt, history, message);
        match tokio::time::timeout(self.remote_timeout, client.complete(&messages)).await {
            Ok(Ok(completion)) if completion.response.trim().is_empty() => {
                Reply::new(Route::RemoteEmpty, EMPTY_COMPLETION_REPLY)
            }
            Ok(Ok(completion)) => Reply::new(Route::Remote, completion.response.trim()),
            Ok(Err(e)) => {
                warn!("Remote completion failed: {}", e);
                Reply::new(
                    Route::Degraded(DegradedReason::Failed),
                    degraded_failure_reply(&describe_failure(&e))
                )
            }
            Err(_) => {
                warn!("Remote completion timed out after {:?}", self.remote_timeout);
                Reply::new(
                    Route::Degraded(DegradedReason::TimedOut),
                    degraded_failure_reply(
                        &format!("Request timed out after {:?}", self.remote_timeout)
                    )
                )
            }
        }
    }

    pub fn explain(&self, violation_id: &str) -> ExplainResponse {
        let response = explanations::explain(violation_id);
        if !response.is_success() {
            info!("No explanation for violation id '{}'", violation_id);
        }
        response
    }

    pub fn stats(&self) -> RouteStats {
        self.counters.snapshot()
    }
}

fn describe_failure(e: &LlmError) -> String {
    match e {
        LlmError::Http(inner) if inner.is_connect() => "Could not reach the AI service".to_string(),
        other => other.to_string(),
    }
}

/// `[system, ...history, user(message)]`, with history senders mapped to completion roles.
pub fn build_completion_messages(
    system_prompt: &str,
    history: &[HistoryEntry],
    message: &str
) -> Vec<CompletionMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(CompletionMessage::new("system", system_prompt));
    messages.extend(
        history
            .iter()
            .map(|entry| CompletionMessage::new(entry.sender.completion_role(), entry.text.as_str()))
    );
    messages.push(CompletionMessage::new("user", message));
    messages
}
