//! Chat session: transcript ownership and the turn boundary.
//!
//! A [`ChatSession`] owns the ordered transcript of (user, assistant) pairs
//! and runs one fresh dispatch loop per submitted turn. Turns are
//! contextually independent: the transcript is *not* fed into the next
//! prompt, so follow-up questions cannot reference earlier turns. This is a
//! documented limitation, not an accident.
//!
//! Exclusive access is enforced at compile time: `submit` takes `&mut self`,
//! so concurrent callers must add their own serialization around the session.

use crate::agent::{run_turn, Generator, LoopConfig, TurnOutcome};
use crate::error::AgentFault;
use crate::tools::ToolRegistry;

/// One completed (user, assistant) exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// A stateful chat surface over the dispatch loop.
pub struct ChatSession<G: Generator> {
    generator: G,
    tools: ToolRegistry,
    config: LoopConfig,
    transcript: Vec<Exchange>,
}

impl<G: Generator> ChatSession<G> {
    pub fn new(generator: G, tools: ToolRegistry, config: LoopConfig) -> Self {
        Self {
            generator,
            tools,
            config,
            transcript: Vec::new(),
        }
    }

    /// Runs one turn and preserves the fault taxonomy for the caller.
    ///
    /// The transcript is appended on success (including budget aborts, which
    /// are normal turns); faults leave the transcript untouched so the caller
    /// decides what to record.
    pub async fn try_submit(&mut self, user_text: &str) -> Result<TurnOutcome, AgentFault> {
        let outcome = run_turn(&self.generator, &self.tools, &self.config, user_text).await?;
        self.transcript.push(Exchange {
            user: user_text.to_string(),
            assistant: outcome.text().to_string(),
        });
        Ok(outcome)
    }

    /// Runs one turn and never fails: any fault below this boundary becomes
    /// a user-visible apologetic message, also recorded in the transcript.
    pub async fn submit(&mut self, user_text: &str) -> String {
        match self.try_submit(user_text).await {
            Ok(outcome) => outcome.text().to_string(),
            Err(fault) => {
                let reply = format!(
                    "I encountered an error: {}\n\nPlease try rephrasing your question.",
                    fault
                );
                self.transcript.push(Exchange {
                    user: user_text.to_string(),
                    assistant: reply.clone(),
                });
                reply
            }
        }
    }

    /// Clears the transcript. Idempotent.
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    /// Returns a copy of the transcript, never the live container.
    pub fn history(&self) -> Vec<Exchange> {
        self.transcript.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RecoveryPolicy;
    use anyhow::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Generator that replays a fixed script of completions.
    struct Scripted {
        completions: Vec<&'static str>,
        cursor: AtomicUsize,
    }

    impl Scripted {
        fn new(completions: Vec<&'static str>) -> Self {
            Self {
                completions,
                cursor: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl Generator for Scripted {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .completions
                .get(i)
                .copied()
                .unwrap_or("Thought: done\nFinal Answer: fallback")
                .to_string())
        }
    }

    /// Generator that always fails, for boundary tests.
    struct Failing;

    #[async_trait::async_trait]
    impl Generator for Failing {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    fn session<G: Generator>(generator: G) -> ChatSession<G> {
        ChatSession::new(generator, ToolRegistry::new(), LoopConfig::default())
    }

    #[tokio::test]
    async fn submit_records_transcript() {
        let mut s = session(Scripted::new(vec!["Thought: easy\nFinal Answer: Hello!"]));
        let reply = s.submit("hi").await;
        assert_eq!(reply, "Hello!");
        let history = s.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user, "hi");
        assert_eq!(history[0].assistant, "Hello!");
    }

    #[tokio::test]
    async fn reset_clears_history() {
        let mut s = session(Scripted::new(vec![
            "Thought: a\nFinal Answer: one",
            "Thought: b\nFinal Answer: two",
        ]));
        s.submit("first").await;
        s.submit("second").await;
        assert_eq!(s.history().len(), 2);
        s.reset();
        assert!(s.history().is_empty());
        // Idempotent.
        s.reset();
        assert!(s.history().is_empty());
    }

    #[tokio::test]
    async fn history_returns_copy() {
        let mut s = session(Scripted::new(vec!["Thought: a\nFinal Answer: one"]));
        s.submit("q").await;
        let mut copy = s.history();
        copy.clear();
        assert_eq!(s.history().len(), 1);
    }

    #[tokio::test]
    async fn backend_fault_becomes_apology() {
        let mut s = session(Failing);
        let reply = s.submit("hi").await;
        assert!(reply.starts_with("I encountered an error:"));
        assert!(reply.contains("rephrasing"));
        assert_eq!(s.history().len(), 1);
    }

    #[tokio::test]
    async fn try_submit_preserves_fault() {
        let mut s = ChatSession::new(
            Failing,
            ToolRegistry::new(),
            LoopConfig {
                on_violation: RecoveryPolicy::Abort,
                ..LoopConfig::default()
            },
        );
        let err = s.try_submit("hi").await.unwrap_err();
        assert!(matches!(err, AgentFault::Backend(_)));
        assert!(s.history().is_empty());
    }
}
