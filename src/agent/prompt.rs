//! Prompt assembly for the dispatch loop.
//!
//! Substitutes the tool listing, tool names, user input, and rendered
//! scratchpad into [`REACT_PROMPT_TEMPLATE`]. The template text is
//! reproduced bit-for-bit: the fixed-format generator and the Turn Parser
//! both depend on the exact grammar.

use super::trace::StepTrace;
use crate::constants::REACT_PROMPT_TEMPLATE;
use crate::tools::ToolRegistry;

/// Builds the full prompt for one THINKING step.
pub fn build_prompt(tools: &ToolRegistry, input: &str, trace: &StepTrace) -> String {
    // {input} is substituted last so user text containing a placeholder
    // cannot pull in another substitution.
    REACT_PROMPT_TEMPLATE
        .replace("{tools}", &tools.prompt_listing())
        .replace("{tool_names}", &tools.prompt_names())
        .replace("{agent_scratchpad}", &trace.render())
        .replace("{input}", input)
}
