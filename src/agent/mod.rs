//! The dispatch loop: hira's reason-then-act core.
//!
//! One call to [`run_turn`] drives one user turn through a
//! THINKING → ACTING → OBSERVING cycle: build the prompt, invoke the
//! generator, parse the completion into a [`Directive`], execute the named
//! tool, append the observation, repeat. The loop terminates on a final
//! answer, the iteration cap, or the wall-clock deadline.
//!
//! The tight iteration cap and the exactly-one-marker parsing rule exist to
//! counter a known failure mode of free-form generators: emitting both an
//! action and a final answer in one completion, or rambling through unbounded
//! tool calls. Boundedness is traded for completeness.

pub mod directive;
pub mod prompt;
pub mod trace;

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::constants::{BUDGET_EXCEEDED_REPLY, EMPTY_OUTPUT_REPLY, MAX_ITERATIONS, MAX_TURN_SECONDS};
use crate::error::AgentFault;
use crate::tools::sanitize::sanitize_input;
use crate::tools::ToolRegistry;
use directive::{parse_directive, Directive};
use prompt::build_prompt;
use trace::StepTrace;

/// The text-generation backend as the loop sees it: one prompt in, one
/// completion out. [`Provider`](crate::provider::Provider) implements this
/// for real backends; tests implement it with scripted completions.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// What the loop does when a completion violates the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Feed a corrective observation back and re-prompt, consuming one
    /// iteration. The default.
    Reprompt,
    /// Abort the turn with [`AgentFault::Protocol`].
    Abort,
}

/// Budgets and policies for one dispatch-loop run.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Maximum THINKING entries per turn.
    pub max_iterations: usize,
    /// Wall-clock deadline from loop start, checked between iterations only.
    /// A generator call in flight is never interrupted, so worst-case turn
    /// latency is this deadline plus one uninterruptible call.
    pub max_turn_time: Duration,
    pub on_violation: RecoveryPolicy,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            max_turn_time: Duration::from_secs(MAX_TURN_SECONDS),
            on_violation: RecoveryPolicy::Reprompt,
        }
    }
}

/// Which budget forced an abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetKind {
    Iterations,
    WallClock,
}

/// The completed result of one turn.
///
/// A budget abort is a *normal* turn from the caller's perspective: the user
/// gets a canned reply, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Answered { text: String },
    Aborted { budget: BudgetKind, text: String },
}

impl TurnOutcome {
    /// The user-visible text regardless of outcome.
    pub fn text(&self) -> &str {
        match self {
            TurnOutcome::Answered { text } => text,
            TurnOutcome::Aborted { text, .. } => text,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, TurnOutcome::Aborted { .. })
    }
}

/// Runs one dispatch-loop turn for `input`.
///
/// Tool faults become observations; protocol violations follow the configured
/// recovery policy; only generator failures (auth, timeout, malformed
/// response) and policy aborts surface as [`AgentFault`].
pub async fn run_turn(
    generator: &dyn Generator,
    tools: &ToolRegistry,
    config: &LoopConfig,
    input: &str,
) -> Result<TurnOutcome, AgentFault> {
    let started = Instant::now();
    let mut trace = StepTrace::new();
    let mut iterations = 0usize;
    let tool_names = tools.names();

    loop {
        // Budgets are checked before each new THINKING entry.
        if iterations >= config.max_iterations {
            return Ok(TurnOutcome::Aborted {
                budget: BudgetKind::Iterations,
                text: BUDGET_EXCEEDED_REPLY.to_string(),
            });
        }
        if started.elapsed() >= config.max_turn_time {
            return Ok(TurnOutcome::Aborted {
                budget: BudgetKind::WallClock,
                text: BUDGET_EXCEEDED_REPLY.to_string(),
            });
        }
        iterations += 1;

        // THINKING: prompt the generator and parse its completion.
        let prompt = build_prompt(tools, input, &trace);
        let completion = generator
            .complete(&prompt)
            .await
            .map_err(AgentFault::Backend)?;

        let parsed = match parse_directive(&completion, &tool_names) {
            Ok(directive) => directive,
            Err(violation) => match config.on_violation {
                RecoveryPolicy::Abort => return Err(AgentFault::Protocol(violation)),
                RecoveryPolicy::Reprompt => {
                    trace.push_corrective(format!(
                        "Invalid response: {}. Reply again using the required format.",
                        violation
                    ));
                    continue;
                }
            },
        };

        match parsed {
            Directive::FinalAnswer { text, .. } => {
                let text = if text.is_empty() {
                    EMPTY_OUTPUT_REPLY.to_string()
                } else {
                    text
                };
                return Ok(TurnOutcome::Answered { text });
            }
            Directive::Action {
                reasoning,
                tool_name,
                tool_input,
            } => {
                // ACTING: resolve and invoke the tool. The parser already
                // validated the name; an unregistered tool still degrades to
                // an error observation rather than a fatal fault.
                let observation = match tools.get(&tool_name) {
                    Some(tool) => tool.call(&sanitize_input(&tool_input)).await.content,
                    None => format!(
                        "Error: unknown tool '{}'. Available tools: {}",
                        tool_name,
                        tools.prompt_names()
                    ),
                };

                // OBSERVING: record the step and loop back to THINKING.
                trace.push_step(reasoning, tool_name, tool_input, observation);
            }
        }
    }
}

#[cfg(test)]
mod tests;
