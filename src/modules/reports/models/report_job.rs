use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a background report job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportJobState {
    Pending,
    Running,
    Completed,
    /// Ran past the inline window; the caller was handed a download link
    /// and the job kept running
    TimedOut,
    Failed,
}

/// A report computation handed off to the background queue.
///
/// Jobs that outlive the inline window deliver through a time-limited
/// download link instead of the request cycle; the link 404s once the
/// retention lapses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportJob {
    pub id: Uuid,
    pub name: String,
    pub state: ReportJobState,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub download_token: Option<String>,
    pub link_expires_at: Option<DateTime<Utc>>,
}

impl ReportJob {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            state: ReportJobState::Pending,
            created_at: Utc::now(),
            completed_at: None,
            download_token: None,
            link_expires_at: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.state = ReportJobState::Running;
    }

    pub fn mark_completed(&mut self) {
        self.state = ReportJobState::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self) {
        self.state = ReportJobState::Failed;
        self.completed_at = Some(Utc::now());
    }

    /// Switch to deferred delivery: mint a download token valid until the
    /// retention lapses
    pub fn defer(&mut self, expires_at: DateTime<Utc>) -> String {
        let token = Uuid::new_v4().to_string();
        self.state = ReportJobState::TimedOut;
        self.download_token = Some(token.clone());
        self.link_expires_at = Some(expires_at);
        token
    }

    pub fn link_valid_at(&self, now: DateTime<Utc>) -> bool {
        match self.link_expires_at {
            Some(expires_at) => now <= expires_at,
            None => false,
        }
    }
}
