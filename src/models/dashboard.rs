use serde::Deserialize;

use super::Anken;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub overdue: i64,
    #[serde(rename = "dueThisWeek", default)]
    pub due_this_week: i64,
    #[serde(default)]
    pub waiting: i64,
}

/// Payload of the `getDashboard` action: headline counts plus the two
/// prioritized project lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(rename = "overdueList", default)]
    pub overdue_list: Vec<Anken>,
    #[serde(rename = "thisWeekList", default)]
    pub this_week_list: Vec<Anken>,
}
