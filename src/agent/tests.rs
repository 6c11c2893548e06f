use super::directive::{parse_directive, Directive};
use super::prompt::build_prompt;
use super::trace::StepTrace;
use super::*;
use crate::constants::{BUDGET_EXCEEDED_REPLY, EMPTY_OUTPUT_REPLY};
use crate::error::{AgentFault, ProtocolViolation};
use crate::tools::{Tool, ToolOutcome, ToolRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

const TOOL_NAMES: [&str; 1] = ["echo_lookup"];

/// Generator that replays a fixed script of completions and records the
/// prompts it was given.
struct Scripted {
    completions: Vec<&'static str>,
    cursor: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Scripted {
    fn new(completions: Vec<&'static str>) -> Self {
        Self {
            completions,
            cursor: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

#[async_trait::async_trait]
impl Generator for Scripted {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.completions
            .get(index)
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("script exhausted after {} completions", index))
    }
}

/// Tool that records the inputs it receives.
struct EchoTool {
    inputs: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo_lookup"
    }

    fn description(&self) -> &str {
        "Echoes its input back."
    }

    fn usage(&self) -> &str {
        "Input is any string."
    }

    async fn call(&self, input: &str) -> ToolOutcome {
        self.inputs.lock().unwrap().push(input.to_string());
        ToolOutcome::success(format!("echo: {}", input))
    }
}

fn registry_with_echo() -> (ToolRegistry, Arc<Mutex<Vec<String>>>) {
    let inputs = Arc::new(Mutex::new(Vec::new()));
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EchoTool {
        inputs: inputs.clone(),
    }));
    (registry, inputs)
}

const ACTION_COMPLETION: &str =
    "Thought: I need to look that up\nAction: echo_lookup\nAction Input: 10026\n";

const FINAL_COMPLETION: &str =
    "Thought: I now know the final answer\nFinal Answer: Adinah has 23 days.";

// --- Turn Parser ---

#[test]
fn parses_action_directive() {
    let directive = parse_directive(ACTION_COMPLETION, &TOOL_NAMES).unwrap();
    match directive {
        Directive::Action {
            reasoning,
            tool_name,
            tool_input,
        } => {
            assert_eq!(reasoning, "I need to look that up");
            assert_eq!(tool_name, "echo_lookup");
            assert_eq!(tool_input.trim(), "10026");
        }
        other => panic!("expected Action, got {:?}", other),
    }
}

#[test]
fn parses_final_answer_directive() {
    let directive = parse_directive(FINAL_COMPLETION, &TOOL_NAMES).unwrap();
    match directive {
        Directive::FinalAnswer { reasoning, text } => {
            assert_eq!(reasoning, "I now know the final answer");
            assert_eq!(text, "Adinah has 23 days.");
        }
        other => panic!("expected FinalAnswer, got {:?}", other),
    }
}

#[test]
fn action_input_stops_at_next_marker() {
    let completion =
        "Action: echo_lookup\nAction Input: 10026\nObservation: I'll guess the result";
    let directive = parse_directive(completion, &TOOL_NAMES).unwrap();
    match directive {
        Directive::Action { tool_input, .. } => assert_eq!(tool_input, " 10026\n"),
        other => panic!("expected Action, got {:?}", other),
    }
}

#[test]
fn rejects_mixed_directive() {
    let completion = "Action: echo_lookup\nAction Input: 10026\nFinal Answer: done";
    assert_eq!(
        parse_directive(completion, &TOOL_NAMES),
        Err(ProtocolViolation::MixedDirective)
    );
}

#[test]
fn rejects_missing_directive() {
    assert_eq!(
        parse_directive("Let me think about that for a moment.", &TOOL_NAMES),
        Err(ProtocolViolation::MissingDirective)
    );
}

#[test]
fn rejects_unknown_tool() {
    let completion = "Action: frobnicate\nAction Input: 10026";
    assert_eq!(
        parse_directive(completion, &TOOL_NAMES),
        Err(ProtocolViolation::UnknownTool("frobnicate".to_string()))
    );
}

#[test]
fn rejects_action_without_input() {
    assert_eq!(
        parse_directive("Action: echo_lookup\nno argument follows", &TOOL_NAMES),
        Err(ProtocolViolation::MissingInput)
    );
}

// --- Prompt assembly ---

#[test]
fn prompt_substitutes_all_placeholders() {
    let (registry, _) = registry_with_echo();
    let mut trace = StepTrace::new();
    trace.push_step(
        "reasoning".to_string(),
        "echo_lookup".to_string(),
        " 10026\n".to_string(),
        "echo: 10026".to_string(),
    );

    let prompt = build_prompt(&registry, "How many leave days does 10026 have?", &trace);
    // The template text starts with a newline; the grammar is byte-stable.
    assert!(prompt.starts_with('\n'));
    assert!(prompt.contains("echo_lookup: Echoes its input back. Input is any string."));
    assert!(prompt.contains("TOOL NAMES: echo_lookup"));
    assert!(prompt.contains("Question: How many leave days does 10026 have?"));
    assert!(prompt.contains(
        "Thought: reasoning\nAction: echo_lookup\nAction Input: 10026\nObservation: echo: 10026\n"
    ));
    assert!(!prompt.contains("{tools}"));
    assert!(!prompt.contains("{tool_names}"));
    assert!(!prompt.contains("{agent_scratchpad}"));
}

#[test]
fn trace_renders_corrective_entries() {
    let mut trace = StepTrace::new();
    trace.push_corrective("Invalid response: bad format.".to_string());
    assert_eq!(trace.render(), "Observation: Invalid response: bad format.\n");
    assert_eq!(trace.len(), 1);
}

// --- Dispatch loop ---

#[tokio::test]
async fn answers_after_one_action() {
    let generator = Scripted::new(vec![ACTION_COMPLETION, FINAL_COMPLETION]);
    let (registry, inputs) = registry_with_echo();
    let config = LoopConfig::default();

    let outcome = run_turn(&generator, &registry, &config, "leave for 10026")
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Adinah has 23 days.");
    assert!(!outcome.is_aborted());
    assert_eq!(generator.calls(), 2);
    // The tool saw the sanitized input, and the second prompt carried the
    // observation back.
    assert_eq!(*inputs.lock().unwrap(), vec!["10026".to_string()]);
    assert!(generator.prompt(1).contains("Observation: echo: 10026"));
}

#[tokio::test]
async fn answers_directly_without_tools() {
    let generator = Scripted::new(vec![FINAL_COMPLETION]);
    let (registry, inputs) = registry_with_echo();
    let config = LoopConfig::default();

    let outcome = run_turn(&generator, &registry, &config, "hello")
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Adinah has 23 days.");
    assert_eq!(generator.calls(), 1);
    assert!(inputs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_final_answer_becomes_canned_reply() {
    let generator = Scripted::new(vec!["Thought: done\nFinal Answer:"]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig::default();

    let outcome = run_turn(&generator, &registry, &config, "hello")
        .await
        .unwrap();

    assert_eq!(outcome.text(), EMPTY_OUTPUT_REPLY);
}

#[tokio::test]
async fn iteration_cap_aborts_the_turn() {
    let generator = Scripted::new(vec![
        ACTION_COMPLETION,
        ACTION_COMPLETION,
        ACTION_COMPLETION,
    ]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig::default();

    let outcome = run_turn(&generator, &registry, &config, "loop forever")
        .await
        .unwrap();

    match outcome {
        TurnOutcome::Aborted { budget, text } => {
            assert_eq!(budget, BudgetKind::Iterations);
            assert_eq!(text, BUDGET_EXCEEDED_REPLY);
        }
        other => panic!("expected Aborted, got {:?}", other),
    }
    // Exactly the cap, never one more.
    assert_eq!(generator.calls(), MAX_ITERATIONS);
}

#[tokio::test]
async fn wall_clock_deadline_aborts_before_thinking() {
    let generator = Scripted::new(vec![]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig {
        max_turn_time: Duration::ZERO,
        ..LoopConfig::default()
    };

    let outcome = run_turn(&generator, &registry, &config, "anything")
        .await
        .unwrap();

    match outcome {
        TurnOutcome::Aborted { budget, text } => {
            assert_eq!(budget, BudgetKind::WallClock);
            assert_eq!(text, BUDGET_EXCEEDED_REPLY);
        }
        other => panic!("expected Aborted, got {:?}", other),
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn violation_reprompts_with_corrective_observation() {
    let generator = Scripted::new(vec!["I refuse to follow the format.", FINAL_COMPLETION]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig::default();

    let outcome = run_turn(&generator, &registry, &config, "hello")
        .await
        .unwrap();

    assert_eq!(outcome.text(), "Adinah has 23 days.");
    // The retry consumed an iteration and saw the corrective observation.
    assert_eq!(generator.calls(), 2);
    assert!(generator.prompt(1).contains("Observation: Invalid response:"));
}

#[tokio::test]
async fn abort_policy_surfaces_protocol_fault() {
    let generator = Scripted::new(vec!["I refuse to follow the format."]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig {
        on_violation: RecoveryPolicy::Abort,
        ..LoopConfig::default()
    };

    let fault = run_turn(&generator, &registry, &config, "hello")
        .await
        .unwrap_err();

    assert!(matches!(
        fault,
        AgentFault::Protocol(ProtocolViolation::MissingDirective)
    ));
}

#[tokio::test]
async fn backend_failure_is_loop_fatal() {
    // An empty script makes the generator fail on its first call.
    let generator = Scripted::new(vec![]);
    let (registry, _) = registry_with_echo();
    let config = LoopConfig::default();

    let fault = run_turn(&generator, &registry, &config, "hello")
        .await
        .unwrap_err();

    assert!(matches!(fault, AgentFault::Backend(_)));
}
