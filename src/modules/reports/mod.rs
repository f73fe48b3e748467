pub mod models;
pub mod services;

pub use models::{FeeSummaryRow, GroupBuyRow, ReportJob, ReportJobState};
pub use services::{ReportDelivery, ReportRunner, Reports};
