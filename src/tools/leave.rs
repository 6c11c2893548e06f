//! Leave balance lookup over the leave table.

use std::path::{Path, PathBuf};

use super::sanitize::normalize_key;
use super::table::{format_days, Table};
use super::{render_error, Tool, ToolOutcome};
use crate::constants::LEAVE_TABLE;
use crate::error::{ToolError, ToolErrorKind};

/// Columns every leave table must have.
const REQUIRED_COLUMNS: [&str; 4] = ["EmpID", "AnnualLeave", "SickLeave", "PersonalLeave"];

/// A successful leave balance lookup.
///
/// `total_leave` is always recomputed as the sum of the three components;
/// a stored total in the source table is never trusted.
#[derive(Debug, Clone)]
pub struct LeaveBalance {
    pub employee_id: String,
    pub employee_name: Option<String>,
    pub annual_leave: f64,
    pub sick_leave: f64,
    pub personal_leave: f64,
    pub total_leave: f64,
    pub leave_year: Option<String>,
}

/// Looks up one employee's leave balance by exact identifier match.
///
/// Null leave-day cells count as 0, not as failures.
pub fn check_leave_balance(data_dir: &Path, employee_id: &str) -> Result<LeaveBalance, ToolError> {
    let emp_id = normalize_key(employee_id);

    let table = Table::load(data_dir, LEAVE_TABLE)?;
    table.require_columns(LEAVE_TABLE, &REQUIRED_COLUMNS)?;

    let row = table.find_first("EmpID", &emp_id).ok_or_else(|| {
        ToolError::new(
            ToolErrorKind::NotFound,
            format!("Employee ID '{}' not found in leave records", emp_id),
        )
        .with_hint(table.sample_keys("EmpID"))
    })?;

    let annual_leave = row.number_or_zero("AnnualLeave");
    let sick_leave = row.number_or_zero("SickLeave");
    let personal_leave = row.number_or_zero("PersonalLeave");

    let employee_name = match (row.get("FirstName"), row.get("LastName")) {
        (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
        _ => None,
    };

    Ok(LeaveBalance {
        employee_id: emp_id,
        employee_name,
        annual_leave,
        sick_leave,
        personal_leave,
        total_leave: annual_leave + sick_leave + personal_leave,
        leave_year: row.get("LeaveYear").map(str::to_string),
    })
}

/// Renders a leave balance as observation text for the generator.
pub fn format_leave_balance(balance: &LeaveBalance) -> String {
    let who = balance
        .employee_name
        .clone()
        .unwrap_or_else(|| balance.employee_id.clone());

    let mut lines = vec![
        format!("Leave balance for {}:", who),
        format!("  - Annual Leave: {} days", format_days(balance.annual_leave)),
        format!("  - Sick Leave: {} days", format_days(balance.sick_leave)),
        format!(
            "  - Personal Leave: {} days",
            format_days(balance.personal_leave)
        ),
        format!(
            "  - Total Available: {} days",
            format_days(balance.total_leave)
        ),
    ];
    if let Some(ref year) = balance.leave_year {
        lines.push(format!("  - Year: {}", year));
    }
    lines.join("\n")
}

/// Registry entry for the leave balance lookup.
pub struct LeaveTool {
    data_dir: PathBuf,
}

impl LeaveTool {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }
}

#[async_trait::async_trait]
impl Tool for LeaveTool {
    fn name(&self) -> &str {
        "check_leave_balance"
    }

    fn description(&self) -> &str {
        "Check an employee's remaining leave balance including annual leave, \
sick leave, and personal leave days."
    }

    fn usage(&self) -> &str {
        "Input should be the employee ID (e.g., '10026')."
    }

    async fn call(&self, input: &str) -> ToolOutcome {
        match check_leave_balance(&self.data_dir, input) {
            Ok(balance) => ToolOutcome::success(format_leave_balance(&balance)),
            Err(e) => ToolOutcome::error(render_error(&e)),
        }
    }
}
