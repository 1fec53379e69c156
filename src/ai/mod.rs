// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit message generation over a chat completions endpoint.
//!
//! ```text
//! diff --trim--> empty? --> EmptyDiff
//!        |
//!        v
//!   api key? --no--> MissingApiKey
//!        |
//!        v
//!   truncate to max_diff_chars (+ "[Diff truncated for size]")
//!        |
//!        v
//!   POST endpoint { model, temperature, max_tokens, messages }
//!        |                        |
//!     2xx v                   4xx/5xx --> Http { status, body (collapsed, 240) }
//!   choices[0].message.content
//!        |
//!        v
//!   first non-blank line, max_message_chars --> message
//!                     (none) --> EmptyResponse
//! ```
//!
//! Global client: `OnceLock`, connection pool, keep-alive

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::config::types::AiConfig;
use crate::error::{AiError, MultiResult};
use crate::utility::summary::{BatchFailures, Overflow};

/// Appended to a diff cut at the size limit.
pub const TRUNCATION_MARKER: &str = "\n\n[Diff truncated for size]";

pub const SYSTEM_PROMPT: &str = "You write concise git commit messages. Return only one line, \
                                 imperative mood, no trailing period, max 72 chars.";

const USER_PROMPT: &str = "Write a commit message for this diff:\n\n";

/// Characters of an error body kept in `AiError::Http`.
const ERROR_BODY_CHARS: usize = 240;

/// Per-repository failures listed before the `(+K more)` tail.
const BATCH_FAILURES_SHOWN: usize = 3;

fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("multi-rs/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Trims `diff` and cuts it at `max_chars`, appending the truncation marker.
///
/// `None` when nothing but whitespace is left.
#[must_use]
pub fn prepare_diff(diff: &str, max_chars: usize) -> Option<String> {
    let trimmed = diff.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.char_indices().nth(max_chars) {
        Some((cut, _)) => Some(format!("{}{TRUNCATION_MARKER}", &trimmed[..cut])),
        None => Some(trimmed.to_string()),
    }
}

/// First non-blank trimmed line of `raw`, at most `max_chars` long.
#[must_use]
pub fn first_message_line(raw: &str, max_chars: usize) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(max_chars).collect())
}

/// Error body with whitespace runs collapsed, cut to 240 characters.
#[must_use]
pub fn concise_error_body(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(ERROR_BODY_CHARS)
        .collect()
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or_default()
    }
}

/// Messages generated for several repositories, plus what failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMessages {
    /// `(repo name, message)` in request order.
    pub messages: Vec<(String, String)>,
    pub failures: BatchFailures,
}

impl RepoMessages {
    /// `Some descriptions failed: a | b | c (+K more)`, or `None`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "Some descriptions failed: {}",
            self.failures.render(BATCH_FAILURES_SHOWN, Overflow::Inline)
        ))
    }
}

/// Client for one completions endpoint.
#[derive(Debug, Clone)]
pub struct CommitMessageGenerator {
    client: Client,
    config: AiConfig,
}

impl From<&Config> for CommitMessageGenerator {
    fn from(config: &Config) -> Self {
        Self::new(config.ai.clone())
    }
}

impl CommitMessageGenerator {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: global_client().clone(),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AiConfig {
        &self.config
    }

    /// One-line commit message for `diff`.
    ///
    /// # Errors
    ///
    /// Returns an `AiError` when the diff is blank, no key is given, the
    /// request fails or the reply holds no text.
    pub async fn generate(&self, diff: &str, api_key: Option<&str>) -> MultiResult<String> {
        let diff = prepare_diff(diff, self.config.max_diff_chars).ok_or(AiError::EmptyDiff)?;
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let user_prompt = format!("{USER_PROMPT}{diff}");
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };

        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            diff_chars = diff.chars().count(),
            "requesting commit message"
        );
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(AiError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Http {
                status: status.as_u16(),
                body: concise_error_body(&body),
            }
            .into());
        }

        let reply: ChatResponse = response.json().await.map_err(AiError::Request)?;
        first_message_line(reply.content(), self.config.max_message_chars)
            .ok_or_else(|| AiError::EmptyResponse.into())
    }

    /// Generates one message per `(repo name, diff)`, sequentially.
    ///
    /// Failures are collected instead of stopping the batch.
    pub async fn generate_per_repo(
        &self,
        repos: &[(String, String)],
        api_key: Option<&str>,
    ) -> RepoMessages {
        let mut result = RepoMessages::default();
        for (name, diff) in repos {
            match self.generate(diff, api_key).await {
                Ok(message) => result.messages.push((name.clone(), message)),
                Err(e) => {
                    warn!(repo = %name, error = %e, "commit message generation failed");
                    result.failures.push(name, &e.to_string());
                }
            }
        }
        result
    }
}

#[cfg(test)]
mod tests;
