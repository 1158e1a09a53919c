//! Case-list state for the dashboard.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use casesite::CaseRecord;
use casesite::api::CaseStats;

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub cases: Vec<CaseRecord>,
    pub stats: Option<CaseStats>,
    pub loading: bool,
    pub error: Option<String>,
    /// Case awaiting delete confirmation.
    pub pending_delete: Option<String>,
}

impl DashboardState {
    /// Drop a deleted case locally and keep the counters in step.
    pub fn remove_case(&mut self, id: &str) {
        let before = self.cases.len();
        self.cases.retain(|c| c.id != id);
        if self.cases.len() < before {
            if let Some(stats) = self.stats.as_mut() {
                stats.total_cases = stats.total_cases.saturating_sub(1);
            }
        }
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
    }
}

/// Status badge text for a case row.
#[must_use]
pub fn case_status(case: &CaseRecord) -> &'static str {
    let deployed = case.field("is_deployed").and_then(serde_json::Value::as_bool).unwrap_or(false)
        || case
            .field("deployment_status")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| matches!(s, "active" | "deployed" | "live"));
    if deployed { "Published" } else { "Draft" }
}
