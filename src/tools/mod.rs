pub mod employee;
pub mod interview;
pub mod leave;
pub mod sanitize;
pub mod table;

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ToolError;

/// The textual result of executing a tool, fed back into the next prompt as
/// an observation.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutcome {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// Renders a structured tool failure as observation text.
///
/// Hints are bounded samples of valid keys, never the full key space.
pub fn render_error(error: &ToolError) -> String {
    match &error.hint {
        Some(hint) if !hint.is_empty() => {
            format!(
                "Error: {}\nHint: sample valid IDs: {}",
                error.message,
                hint.join(", ")
            )
        }
        _ => format!("Error: {}", error.message),
    }
}

/// Every lookup tool implements this trait.
///
/// `call` never fails at the trait level: internal faults are rendered into
/// the outcome text so the dispatch loop can treat them as observations.
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the generator uses to select this tool.
    fn name(&self) -> &str;

    /// One-sentence usage description substituted into the prompt.
    fn description(&self) -> &str;

    /// Argument description substituted into the prompt.
    fn usage(&self) -> &str;

    /// Execute the tool with the (already sanitized) string argument.
    async fn call(&self, input: &str) -> ToolOutcome;
}

/// Fixed, ordered list of named tools; dispatches calls by exact name.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Called during startup.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(Arc::from(tool));
    }

    /// Create a registry with the three HR lookup tools, in their fixed order.
    pub fn with_builtins(data_dir: PathBuf) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(employee::EmployeeTool::new(data_dir.clone())));
        registry.register(Box::new(leave::LeaveTool::new(data_dir.clone())));
        registry.register(Box::new(interview::InterviewTool::new(data_dir)));
        registry
    }

    /// Look up a tool by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Iterates registered tools in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.iter()
    }

    /// The `{tools}` block of the prompt: one `name: description argument`
    /// line per tool. Must stay consistent with the actual tool contracts.
    pub fn prompt_listing(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {} {}", t.name(), t.description(), t.usage()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The `{tool_names}` block of the prompt.
    pub fn prompt_names(&self) -> String {
        self.names().join(", ")
    }

    /// How many tools are registered.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
