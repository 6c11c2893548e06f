//! Turn Parser: one generator completion → one [`Directive`].
//!
//! The ReAct grammar is centralized here so the "exactly one marker" rule is
//! enforced in one place. A syntactically valid completion carries either an
//! `Action:` marker or a `Final Answer:` marker, never both and never
//! neither; anything else is a [`ProtocolViolation`].

use crate::error::ProtocolViolation;

/// Marker that opens an action request.
const ACTION_MARKER: &str = "Action:";

/// Marker that opens the action argument.
const ACTION_INPUT_MARKER: &str = "Action Input:";

/// Marker that opens the final answer.
const FINAL_ANSWER_MARKER: &str = "Final Answer:";

/// Marker that opens a reasoning line.
const THOUGHT_MARKER: &str = "Thought:";

/// Markers that terminate a verbatim action-input span.
const STOP_MARKERS: [&str; 5] = [
    "Observation:",
    THOUGHT_MARKER,
    "Question:",
    FINAL_ANSWER_MARKER,
    ACTION_MARKER,
];

/// The parsed intent of one generator completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A tool invocation request.
    Action {
        reasoning: String,
        tool_name: String,
        /// Verbatim span up to the next recognized marker; sanitized later by
        /// the dispatch step, not here.
        tool_input: String,
    },
    /// A terminal answer for the turn.
    FinalAnswer { reasoning: String, text: String },
}

/// Parses one completion against the registered tool names.
///
/// Tool-name matching is exact and case-sensitive; an unrecognized name is a
/// protocol violation, not a silent fallback.
pub fn parse_directive(
    completion: &str,
    tool_names: &[&str],
) -> Result<Directive, ProtocolViolation> {
    let action_pos = completion.find(ACTION_MARKER);
    let final_pos = completion.find(FINAL_ANSWER_MARKER);

    match (action_pos, final_pos) {
        (Some(_), Some(_)) => Err(ProtocolViolation::MixedDirective),
        (None, None) => Err(ProtocolViolation::MissingDirective),
        (None, Some(pos)) => Ok(Directive::FinalAnswer {
            reasoning: extract_reasoning(&completion[..pos]),
            // Nothing is allowed to follow a final answer, so the remainder
            // of the completion is the answer.
            text: completion[pos + FINAL_ANSWER_MARKER.len()..].trim().to_string(),
        }),
        (Some(pos), None) => {
            let reasoning = extract_reasoning(&completion[..pos]);
            let after_action = &completion[pos + ACTION_MARKER.len()..];

            let input_pos = after_action
                .find(ACTION_INPUT_MARKER)
                .ok_or(ProtocolViolation::MissingInput)?;

            let tool_name = after_action[..input_pos]
                .lines()
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            if !tool_names.contains(&tool_name.as_str()) {
                return Err(ProtocolViolation::UnknownTool(tool_name));
            }

            let raw_input = &after_action[input_pos + ACTION_INPUT_MARKER.len()..];
            let end = STOP_MARKERS
                .iter()
                .filter_map(|marker| raw_input.find(marker))
                .min()
                .unwrap_or(raw_input.len());

            Ok(Directive::Action {
                reasoning,
                tool_name,
                tool_input: raw_input[..end].to_string(),
            })
        }
    }
}

/// Reasoning is the text before the directive marker, with the leading
/// `Thought:` label stripped.
fn extract_reasoning(prefix: &str) -> String {
    let trimmed = prefix.trim();
    let body = match trimmed.rfind(THOUGHT_MARKER) {
        Some(pos) => &trimmed[pos + THOUGHT_MARKER.len()..],
        None => trimmed,
    };
    body.trim().to_string()
}
