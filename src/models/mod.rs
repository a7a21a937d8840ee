mod anken;
mod dashboard;
mod tantosha;

pub use anken::{Anken, AnkenPayload, PRIORITY_OPTIONS, STATUS_OPTIONS};
pub use dashboard::{DashboardData, DashboardStats};
pub use tantosha::{Tantosha, TantoshaPayload};
