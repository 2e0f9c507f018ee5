//! Compliance analysis of a document against a reference policy.
//!
//! This module assembles the messages for an LLM and keeps the session
//! state around them. The completion call itself is delegated to a
//! [`CompletionProvider`], so any client (HTTP API, local model, test mock)
//! can be plugged in.
//!
//! # Example
//!
//! ```
//! use lexclean::compliance::{ComplianceSession, CompletionProvider, Message};
//!
//! struct Echo;
//!
//! impl CompletionProvider for Echo {
//!     fn complete(&self, messages: &[Message]) -> lexclean::Result<String> {
//!         Ok(format!("{} messages received", messages.len()))
//!     }
//! }
//!
//! let mut session = ComplianceSession::new("Employees must report bribery.");
//! let report = session.analyze(&Echo, "Staff may accept gifts.").unwrap();
//! assert_eq!(report, "4 messages received");
//! ```

mod prompts;

pub use prompts::{
    ANALYSIS_SYSTEM_PROMPT, INITIAL_GREETING, NO_REPORT, REPORT_GREETING, REPORT_REQUEST,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Prompt-in, text-out completion service.
pub trait CompletionProvider: Send + Sync {
    /// Complete a conversation and return the assistant's reply.
    fn complete(&self, messages: &[Message]) -> Result<String>;
}

/// Messages requesting a compliance report on `document` against `reference`.
pub fn analysis_messages(reference: &str, document: &str) -> Vec<Message> {
    vec![
        Message::system(ANALYSIS_SYSTEM_PROMPT),
        Message::user(prompts::reference_message(reference)),
        Message::user(prompts::document_message(document)),
        Message::user(REPORT_REQUEST),
    ]
}

/// Messages for a follow-up question about the reference and the report.
pub fn chat_messages(reference: &str, report: Option<&str>, question: &str) -> Vec<Message> {
    vec![
        Message::system(prompts::chat_system_prompt(
            reference,
            report.unwrap_or(NO_REPORT),
        )),
        Message::user(question),
    ]
}

/// A compliance review of documents against one reference text.
#[derive(Debug, Clone)]
pub struct ComplianceSession {
    reference: String,
    report: Option<String>,
    history: Vec<Message>,
}

impl ComplianceSession {
    /// Start a session on the given reference text.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            report: None,
            history: vec![Message::assistant(INITIAL_GREETING)],
        }
    }

    /// The reference text.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The latest report, if one has been generated.
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// Display transcript, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Generate a compliance report for `document`.
    ///
    /// On success the report replaces any previous one and the transcript
    /// restarts with a post-report greeting.
    pub fn analyze(&mut self, provider: &dyn CompletionProvider, document: &str) -> Result<String> {
        let messages = analysis_messages(&self.reference, document);
        let report = provider.complete(&messages).map_err(into_completion)?;

        log::debug!("compliance report generated ({} bytes)", report.len());
        self.report = Some(report.clone());
        self.history = vec![Message::assistant(REPORT_GREETING)];
        Ok(report)
    }

    /// Ask a question about the reference and the current report.
    ///
    /// Whitespace-only questions are ignored and return `Ok(None)`. The
    /// question and answer enter the transcript together once the provider
    /// has answered, so a failed call leaves the transcript as it was.
    pub fn ask(
        &mut self,
        provider: &dyn CompletionProvider,
        question: &str,
    ) -> Result<Option<String>> {
        if question.trim().is_empty() {
            return Ok(None);
        }

        let messages = chat_messages(&self.reference, self.report.as_deref(), question);
        let answer = provider.complete(&messages).map_err(into_completion)?;

        self.history.push(Message::user(question));
        self.history.push(Message::assistant(answer.clone()));
        Ok(Some(answer))
    }

    /// Reset the transcript to the initial greeting. The report is kept.
    pub fn clear_chat(&mut self) {
        self.history = vec![Message::assistant(INITIAL_GREETING)];
    }
}

fn into_completion(e: Error) -> Error {
    match e {
        Error::Completion(_) => e,
        other => Error::Completion(other.to_string()),
    }
}
