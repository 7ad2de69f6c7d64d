use crate::core::client::MailchimpClient;
use crate::core::errors::MailchimpError;
use crate::core::kernel::Transport;
use crate::core::types::BatchJob;
use std::time::Duration;
use tracing::{debug, info};

/// Polling policy for a submitted batch job
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

/// Poll `GET /batches/{batch_id}` until the job reports `finished`.
///
/// Returns the last observed job state. Gives up with
/// [`MailchimpError::Api`] (no status code) after `max_attempts` polls.
pub async fn wait_for_batch<T: Transport>(
    client: &MailchimpClient<T>,
    batch_id: &str,
    config: PollConfig,
) -> Result<BatchJob, MailchimpError> {
    for attempt in 1..=config.max_attempts {
        let job = client.get_batch_operation(batch_id).await?;

        debug!(
            batch_id = %batch_id,
            attempt,
            status = ?job.status,
            finished = job.finished_operations,
            total = job.total_operations,
            "Polled batch job"
        );

        if job.status.is_finished() {
            info!(
                batch_id = %batch_id,
                errored = job.errored_operations,
                "Batch job finished"
            );
            return Ok(job);
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    Err(MailchimpError::Api {
        code: None,
        message: format!(
            "Batch {} did not finish after {} polls",
            batch_id, config.max_attempts
        ),
        source: None,
    })
}
