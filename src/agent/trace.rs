//! Step Trace: the record of directive/observation pairs within one turn.
//!
//! Scoped to one dispatch-loop run and discarded when the turn completes.
//! Rendered into the `{agent_scratchpad}` slot of the next prompt so the
//! generator sees its own prior steps and their observations.

/// One recorded step of the current turn.
#[derive(Debug, Clone)]
pub enum TraceEntry {
    /// A completed action: the directive's fields plus the tool observation.
    Step {
        reasoning: String,
        tool_name: String,
        tool_input: String,
        observation: String,
    },
    /// A corrective observation synthesized after a protocol violation.
    Corrective { observation: String },
}

/// Ordered record of the current turn's steps.
#[derive(Debug, Default)]
pub struct StepTrace {
    entries: Vec<TraceEntry>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_step(
        &mut self,
        reasoning: String,
        tool_name: String,
        tool_input: String,
        observation: String,
    ) {
        self.entries.push(TraceEntry::Step {
            reasoning,
            tool_name,
            tool_input,
            observation,
        });
    }

    pub fn push_corrective(&mut self, observation: String) {
        self.entries.push(TraceEntry::Corrective { observation });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Renders the scratchpad in the exact wire grammar: repeated
    /// `Thought/Action/Action Input/Observation` blocks, with corrective
    /// entries as bare `Observation:` lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry {
                TraceEntry::Step {
                    reasoning,
                    tool_name,
                    tool_input,
                    observation,
                } => {
                    out.push_str(&format!(
                        "Thought: {}\nAction: {}\nAction Input: {}\nObservation: {}\n",
                        reasoning,
                        tool_name,
                        tool_input.trim(),
                        observation
                    ));
                }
                TraceEntry::Corrective { observation } => {
                    out.push_str(&format!("Observation: {}\n", observation));
                }
            }
        }
        out
    }
}
