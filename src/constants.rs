//! Centralized constants for hira.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "hira";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "gpt-oss:120b";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

/// Sampling temperature for the generator. Low for consistent ReAct output.
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "chat_history.txt";

/// Default directory holding the backing CSV tables.
pub const DEFAULT_DATA_DIR: &str = "data";

// --- Provider defaults ---

/// Default provider when none is configured.
pub const DEFAULT_PROVIDER: &str = "ollama";

/// Default LLM model identifier for Anthropic.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";

/// Default LLM model identifier for OpenAI.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";

/// Default LLM model identifier for OpenRouter.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-oss-120b";

/// Default base URL for Ollama (hosted endpoint; set to
/// `http://localhost:11434` in config for a local server).
pub const OLLAMA_DEFAULT_BASE_URL: &str = "https://ollama.com";

/// Default LLM model identifier for Ollama.
pub const OLLAMA_DEFAULT_MODEL: &str = DEFAULT_MODEL;

// --- Dispatch loop budgets ---

/// Maximum reasoning iterations per turn.
pub const MAX_ITERATIONS: usize = 3;

/// Wall-clock deadline for one turn, in seconds. Checked between iterations
/// only; a generator call in flight is never interrupted.
pub const MAX_TURN_SECONDS: u64 = 30;

/// Timeout for a single generator request, in seconds.
pub const GENERATOR_TIMEOUT_SECONDS: u64 = 120;

// --- Backing tables ---

/// Employee table filename.
pub const EMPLOYEE_TABLE: &str = "employee_data.csv";

/// Leave balance table filename.
pub const LEAVE_TABLE: &str = "leave_balances.csv";

/// Recruitment table filename.
pub const RECRUITMENT_TABLE: &str = "recruitment_data.csv";

/// Maximum number of sample keys included in a `NotFound` hint.
pub const HINT_SAMPLE_SIZE: usize = 5;

/// Default number of interview questions per request.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

// --- Canned replies ---

/// Reply when the loop exhausts its iteration or time budget.
pub const BUDGET_EXCEEDED_REPLY: &str =
    "I wasn't able to complete that request within my step and time budget. \
Please try a simpler or more specific question.";

/// Reply when a turn produced no usable output.
pub const EMPTY_OUTPUT_REPLY: &str = "I apologize, but I couldn't process that request.";

// --- ReAct prompt ---

/// Strict ReAct prompt template sent to the generator. The grammar must stay
/// bit-for-bit stable: the Turn Parser re-validates the same markers.
///
/// Placeholders: `{tools}`, `{tool_names}`, `{input}`, `{agent_scratchpad}`.
pub const REACT_PROMPT_TEMPLATE: &str = "\n\
Answer the user's question by following this EXACT format. Do NOT deviate.

TOOLS:
{tools}

TOOL NAMES: {tool_names}

FORMAT - You MUST use this structure:

Question: [the user's question]
Thought: [your reasoning about what to do next]
Action: [ONLY the tool name from: {tool_names}]
Action Input: [the exact input for the tool]
Observation: [wait for tool result - you will see this]
... (you can repeat Thought/Action/Action Input/Observation if needed)
Thought: [once you have all info] I now know the final answer
Final Answer: [give the complete answer here]

CRITICAL RULES:
1. NEVER write \"Final Answer\" and \"Action\" in the same response
2. After \"Action Input:\", STOP and WAIT for Observation
3. Only write \"Final Answer:\" when you have all the information
4. Do NOT add extra text after \"Final Answer:\"

Question: {input}
{agent_scratchpad}";
