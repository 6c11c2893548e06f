//! Employee detail lookup over the employee table.

use std::path::{Path, PathBuf};

use super::sanitize::normalize_key;
use super::table::Table;
use super::{render_error, Tool, ToolOutcome};
use crate::constants::EMPLOYEE_TABLE;
use crate::error::{ToolError, ToolErrorKind};

/// Columns every employee table must have.
const REQUIRED_COLUMNS: [&str; 3] = ["EmpID", "FirstName", "LastName"];

/// A successful employee lookup.
///
/// Optional fields are `Some` only when the source cell is non-null. The
/// source-column → field mapping is fixed and applied uniformly in
/// [`get_employee_details`].
#[derive(Debug, Clone)]
pub struct EmployeeDetails {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub business_unit: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub supervisor: Option<String>,
    pub start_date: Option<String>,
    pub employee_type: Option<String>,
    pub division: Option<String>,
    pub job_function: Option<String>,
    pub performance_score: Option<String>,
    pub current_rating: Option<String>,
}

/// Looks up one employee by exact identifier match.
///
/// The identifier is normalized (trimmed) before comparison. First matching
/// row wins if the table contains duplicate identifiers.
pub fn get_employee_details(data_dir: &Path, employee_id: &str) -> Result<EmployeeDetails, ToolError> {
    let emp_id = normalize_key(employee_id);

    let table = Table::load(data_dir, EMPLOYEE_TABLE)?;
    table.require_columns(EMPLOYEE_TABLE, &REQUIRED_COLUMNS)?;

    let row = table.find_first("EmpID", &emp_id).ok_or_else(|| {
        ToolError::new(
            ToolErrorKind::NotFound,
            format!("Employee ID '{}' not found", emp_id),
        )
        .with_hint(table.sample_keys("EmpID"))
    })?;

    let first_name = row.get("FirstName").unwrap_or_default().to_string();
    let last_name = row.get("LastName").unwrap_or_default().to_string();
    let full_name = format!("{} {}", first_name, last_name);
    let opt = |column: &str| row.get(column).map(str::to_string);

    Ok(EmployeeDetails {
        employee_id: emp_id,
        full_name,
        first_name,
        last_name,
        title: opt("Title"),
        department: opt("DepartmentType"),
        business_unit: opt("BusinessUnit"),
        email: opt("ADEmail"),
        status: opt("EmployeeStatus"),
        supervisor: opt("Supervisor"),
        start_date: opt("StartDate"),
        employee_type: opt("EmployeeType"),
        division: opt("Division"),
        job_function: opt("JobFunctionDescription"),
        performance_score: opt("Performance Score"),
        current_rating: opt("Current Employee Rating"),
    })
}

/// Renders an employee lookup as observation text for the generator.
pub fn format_employee_details(details: &EmployeeDetails) -> String {
    let na = |field: &Option<String>| field.clone().unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![
        format!("Employee found: {}", details.full_name),
        format!("  - ID: {}", details.employee_id),
        format!("  - Email: {}", na(&details.email)),
        format!("  - Title: {}", na(&details.title)),
        format!("  - Department: {}", na(&details.department)),
        format!("  - Status: {}", na(&details.status)),
    ];
    if let Some(ref supervisor) = details.supervisor {
        lines.push(format!("  - Supervisor: {}", supervisor));
    }
    if let Some(ref start_date) = details.start_date {
        lines.push(format!("  - Start Date: {}", start_date));
    }
    lines.join("\n")
}

/// Registry entry for the employee lookup.
pub struct EmployeeTool {
    data_dir: PathBuf,
}

impl EmployeeTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for EmployeeTool {
    fn name(&self) -> &str {
        "get_employee_details"
    }

    fn description(&self) -> &str {
        "Retrieve detailed information about an employee including name, \
title, department, email, status, supervisor, and more."
    }

    fn usage(&self) -> &str {
        "Input should be the employee ID (e.g., '10026')."
    }

    async fn call(&self, input: &str) -> ToolOutcome {
        match get_employee_details(&self.data_dir, input) {
            Ok(details) => ToolOutcome::success(format_employee_details(&details)),
            Err(e) => ToolOutcome::error(render_error(&e)),
        }
    }
}
