//! Fault taxonomy for hira.
//!
//! Tool failures, protocol violations, and turn-level faults are distinct
//! types so callers (and tests) can match on the kind instead of scraping
//! error strings. Nothing in this module terminates the process: tool errors
//! become observations inside the dispatch loop, and anything that escapes a
//! turn is caught at the [`ChatSession`](crate::session::ChatSession) boundary.

use thiserror::Error;

/// Classifies why a lookup tool failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// Backing table missing or unreadable.
    SourceUnavailable,
    /// Backing table present but schema-incomplete.
    MissingColumn,
    /// Valid request, no matching row.
    NotFound,
    /// Argument rejected before any table access.
    EmptyInput,
}

/// A structured tool failure: kind, human-readable message, and an optional
/// bounded sample of valid keys for operator debugging.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    /// At most [`HINT_SAMPLE_SIZE`](crate::constants::HINT_SAMPLE_SIZE) sample
    /// keys; never guaranteed complete.
    pub hint: Option<Vec<String>>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: Vec<String>) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// A generator completion that does not match the required output grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// Both an `Action:` and a `Final Answer:` marker in one completion.
    #[error("the response contains both an Action and a Final Answer")]
    MixedDirective,
    /// Neither marker present.
    #[error("the response contains neither an Action nor a Final Answer")]
    MissingDirective,
    /// `Action:` names a tool that is not registered.
    #[error("unknown tool name '{0}'")]
    UnknownTool(String),
    /// `Action:` present but no `Action Input:` line follows it.
    #[error("the Action line is not followed by an Action Input line")]
    MissingInput,
}

/// A fault that ends a turn without a normal answer.
///
/// Budget exhaustion is deliberately *not* here: it produces a canned reply
/// and is reported as a completed turn, not a fault.
#[derive(Debug, Error)]
pub enum AgentFault {
    /// The text-generation backend failed: auth, network timeout, or a
    /// malformed response. Loop-fatal for the turn.
    #[error("text generation failed: {0}")]
    Backend(#[source] anyhow::Error),
    /// The recovery policy was set to abort and the generator violated the
    /// protocol.
    #[error("the model response did not follow the required format: {0}")]
    Protocol(#[from] ProtocolViolation),
}
