//! Interview question generation from the recruitment table.
//!
//! A "role" is implicit in the data: the set of distinct job titles. Matching
//! is substring-based in both directions and case-insensitive; the first
//! matching title in row order wins, with no closeness ranking. Row order is
//! the snapshot's file order, so the selection is deterministic per file.

use std::path::{Path, PathBuf};

use super::table::Table;
use super::{render_error, Tool, ToolOutcome};
use crate::constants::{DEFAULT_QUESTION_COUNT, RECRUITMENT_TABLE};
use crate::error::{ToolError, ToolErrorKind};

/// Keyword-triggered question banks. A bank is selected when the matched
/// title's lowercased text contains the keyword.
const KEYWORD_BANKS: [(&str, [&str; 5]); 6] = [
    (
        "data",
        [
            "Explain your experience with data analysis and visualization tools.",
            "How do you ensure data quality and accuracy in your work?",
            "Describe your approach to handling large datasets.",
            "What statistical methods are you most comfortable with?",
            "How do you communicate complex data insights to non-technical stakeholders?",
        ],
    ),
    (
        "scientist",
        [
            "Walk me through your experience with machine learning algorithms.",
            "How do you approach feature engineering and model selection?",
            "Describe a time when your model didn't perform as expected. What did you do?",
            "What's your experience with A/B testing and experimentation?",
            "How do you stay current with the latest developments in data science?",
        ],
    ),
    (
        "engineer",
        [
            "Describe your software development process from requirements to deployment.",
            "How do you approach debugging complex technical issues?",
            "What's your experience with version control and collaborative coding?",
            "Tell me about a time you optimized code for better performance.",
            "How do you ensure code quality and maintainability?",
        ],
    ),
    (
        "manager",
        [
            "Describe your leadership and team management style.",
            "How do you handle conflict within your team?",
            "What's your approach to performance reviews and feedback?",
            "How do you prioritize competing projects and resources?",
            "Tell me about a time you had to make a difficult personnel decision.",
        ],
    ),
    (
        "analyst",
        [
            "How do you approach problem-solving and root cause analysis?",
            "Describe your experience creating reports and dashboards.",
            "What tools and methodologies do you use for analysis?",
            "How do you validate your analytical findings?",
            "Give an example of how your analysis drove business decisions.",
        ],
    ),
    (
        "developer",
        [
            "What programming languages and frameworks are you most proficient in?",
            "How do you approach testing and quality assurance?",
            "Describe your experience with APIs and integrations.",
            "What's your approach to learning new technologies?",
            "Tell me about a technically challenging feature you've built.",
        ],
    ),
];

/// A successful question generation.
#[derive(Debug, Clone)]
pub struct InterviewQuestions {
    /// The matched job title from the recruitment table.
    pub job_role: String,
    /// The caller's query, when it differs from the matched title.
    pub original_query: Option<String>,
    pub questions: Vec<String>,
    /// Count of applicant rows sharing the matched title.
    pub based_on_applicants: usize,
}

/// Generates up to `count` interview questions for a job role.
pub fn generate_interview_questions(
    data_dir: &Path,
    job_role: &str,
    count: usize,
) -> Result<InterviewQuestions, ToolError> {
    let role = job_role.trim();
    if role.is_empty() {
        return Err(ToolError::new(
            ToolErrorKind::EmptyInput,
            "Job role cannot be empty",
        ));
    }

    let table = Table::load(data_dir, RECRUITMENT_TABLE)?;
    table.require_columns(RECRUITMENT_TABLE, &["Job Title"])?;

    let matched = match_role(&table, role).ok_or_else(|| {
        ToolError::new(
            ToolErrorKind::NotFound,
            format!("Job role '{}' not found", role),
        )
    })?;

    let based_on_applicants = table
        .rows()
        .filter(|row| row.get("Job Title").map(str::trim) == Some(matched.as_str()))
        .count();

    let questions = build_questions(&matched, count);

    Ok(InterviewQuestions {
        original_query: if role != matched {
            Some(role.to_string())
        } else {
            None
        },
        job_role: matched,
        questions,
        based_on_applicants,
    })
}

/// First distinct title (in row order) that contains the query or is
/// contained by it, case-insensitively. Rows with a null title are skipped,
/// not treated as the end of the table.
fn match_role(table: &Table, role: &str) -> Option<String> {
    let query = role.to_lowercase();
    let mut seen: Vec<String> = Vec::new();
    for row in table.rows() {
        let Some(title) = row.get("Job Title") else {
            continue;
        };
        let title = title.trim();
        if seen.iter().any(|t| t == title) {
            continue;
        }
        seen.push(title.to_string());
        let candidate = title.to_lowercase();
        if candidate.contains(&query) || query.contains(&candidate) {
            return Some(title.to_string());
        }
    }
    None
}

/// Concatenates keyword banks and role-templated generics, deduplicates
/// preserving first-seen order, and truncates to `count`. Never pads: a pool
/// smaller than `count` is returned whole.
fn build_questions(role: &str, count: usize) -> Vec<String> {
    let role_lower = role.to_lowercase();
    let mut pool: Vec<String> = Vec::new();

    for (keyword, bank) in KEYWORD_BANKS.iter() {
        if role_lower.contains(keyword) {
            pool.extend(bank.iter().map(|q| q.to_string()));
        }
    }

    pool.push(format!(
        "Tell me about your experience relevant to the {} position.",
        role
    ));
    pool.push(format!("What interests you most about this {} role?", role));
    pool.push("Describe a challenging project you've worked on in your career.".to_string());
    pool.push("How do you handle tight deadlines and pressure?".to_string());
    pool.push("Where do you see yourself in 5 years?".to_string());

    let mut unique: Vec<String> = Vec::new();
    for question in pool {
        if !unique.contains(&question) {
            unique.push(question);
        }
    }
    unique.truncate(count);
    unique
}

/// Renders generated questions as observation text for the generator.
pub fn format_interview_questions(result: &InterviewQuestions) -> String {
    let mut lines = vec![
        format!("Interview questions for {}:", result.job_role),
        format!("  (Based on {} applicants)", result.based_on_applicants),
        String::new(),
    ];
    for (i, question) in result.questions.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, question));
    }
    lines.join("\n")
}

/// Registry entry for interview question generation.
pub struct InterviewTool {
    data_dir: PathBuf,
}

impl InterviewTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for InterviewTool {
    fn name(&self) -> &str {
        "generate_interview_questions"
    }

    fn description(&self) -> &str {
        "Generate relevant interview questions for a specific job role. \
Returns 5 thoughtful interview questions tailored to the role."
    }

    fn usage(&self) -> &str {
        "Input should be the job title (e.g., 'Data Scientist', 'Software Engineer')."
    }

    async fn call(&self, input: &str) -> ToolOutcome {
        match generate_interview_questions(&self.data_dir, input, DEFAULT_QUESTION_COUNT) {
            Ok(result) => ToolOutcome::success(format_interview_questions(&result)),
            Err(e) => ToolOutcome::error(render_error(&e)),
        }
    }
}
