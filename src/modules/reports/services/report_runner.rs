use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::ReportConfig;
use crate::core::{AppError, Result};
use crate::modules::reports::models::{ReportJob, ReportJobState};

/// How a report reached the caller
#[derive(Debug)]
pub enum ReportDelivery {
    /// The report finished inside the inline window
    Inline(Value),
    /// The report is still running; the job carries a download token the
    /// caller can email out, valid until the link retention lapses
    Deferred(ReportJob),
}

struct StoredReport {
    job: ReportJob,
    payload: Option<Value>,
}

/// Runs report computations on background tasks.
///
/// Requests come back immediately: either with the payload when the report
/// finished inside the inline window, or with a deferred job whose
/// download link stays valid for the configured retention and 404s after.
pub struct ReportRunner {
    store: Arc<Mutex<HashMap<String, StoredReport>>>,
    inline_timeout: Duration,
    link_retention: chrono::Duration,
}

impl ReportRunner {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(HashMap::new())),
            inline_timeout: Duration::from_secs(config.inline_timeout_secs),
            link_retention: chrono::Duration::days(config.link_retention_days),
        }
    }

    /// Execute a report, delivering inline when it beats the timeout and
    /// deferring to a download link otherwise
    pub async fn run<F>(&self, name: &str, generate: F) -> Result<ReportDelivery>
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        let mut job = ReportJob::new(name);
        job.mark_running();
        info!(report = name, job_id = %job.id, "Running report");

        let mut handle = tokio::spawn(generate);

        match tokio::time::timeout(self.inline_timeout, &mut handle).await {
            Ok(Ok(Ok(payload))) => {
                job.mark_completed();
                Ok(ReportDelivery::Inline(payload))
            }
            Ok(Ok(Err(e))) => {
                job.mark_failed();
                error!(report = name, error = %e, "Report generation failed");
                Err(e)
            }
            Ok(Err(join_error)) => {
                job.mark_failed();
                Err(AppError::internal(format!(
                    "Report task aborted: {}",
                    join_error
                )))
            }
            Err(_elapsed) => {
                let token = job.defer(Utc::now() + self.link_retention);
                warn!(
                    report = name,
                    job_id = %job.id,
                    "Report exceeded the inline window, deferring to download link"
                );

                self.store.lock().unwrap().insert(
                    token.clone(),
                    StoredReport {
                        job: job.clone(),
                        payload: None,
                    },
                );

                let store = Arc::clone(&self.store);
                let report_name = name.to_string();
                tokio::spawn(async move {
                    let outcome = handle.await;
                    let mut store = store.lock().unwrap();
                    let Some(entry) = store.get_mut(&token) else {
                        return;
                    };
                    match outcome {
                        Ok(Ok(payload)) => {
                            entry.job.mark_completed();
                            entry.payload = Some(payload);
                        }
                        Ok(Err(e)) => {
                            entry.job.mark_failed();
                            error!(report = %report_name, error = %e, "Deferred report failed");
                        }
                        Err(join_error) => {
                            entry.job.mark_failed();
                            error!(
                                report = %report_name,
                                error = %join_error,
                                "Deferred report task aborted"
                            );
                        }
                    }
                });

                Ok(ReportDelivery::Deferred(job))
            }
        }
    }

    /// Fetch a deferred report by its download token
    pub fn fetch(&self, token: &str, now: DateTime<Utc>) -> Result<Value> {
        let mut store = self.store.lock().unwrap();

        let Some(entry) = store.get(token) else {
            return Err(AppError::not_found("Report"));
        };

        if !entry.job.link_valid_at(now) {
            store.remove(token);
            return Err(AppError::not_found("Report download link has expired"));
        }

        match entry.job.state {
            ReportJobState::Completed => entry
                .payload
                .clone()
                .ok_or_else(|| AppError::internal("Completed report has no payload")),
            ReportJobState::Failed => Err(AppError::internal("Report generation failed")),
            _ => Err(AppError::validation("Report is still being generated")),
        }
    }
}
