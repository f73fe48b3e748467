mod report_job;
mod summary;

pub use report_job::{ReportJob, ReportJobState};
pub use summary::{FeeSummaryRow, GroupBuyRow};
