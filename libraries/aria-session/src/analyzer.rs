//! Cover-art animation analysis
//!
//! The analyzer is an external collaborator (network specifics out of
//! scope); this module owns the serial job runner around it. Calls are
//! throttled by a fixed delay, and a single failure is recorded as "no
//! decision" and never halts the rest of the batch.

use crate::tasks::TaskResult;
use aria_core::types::{AlbumId, AnimationDecision, Artwork};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delay between successive analyzer calls
const THROTTLE_DELAY: Duration = Duration::from_millis(500);

/// External cover-art analyzer
///
/// Given an album's representative artwork, returns an animation decision
/// or an error string. Implementations own all network/auth details.
#[async_trait]
pub trait CoverAnalyzer: Send + Sync {
    async fn analyze(&self, artwork: &Artwork) -> std::result::Result<AnimationDecision, String>;
}

/// One pending analysis job
#[derive(Debug, Clone)]
pub struct AnalyzerJob {
    pub album_id: AlbumId,
    pub artwork: Artwork,
}

/// Serial analyzer job runner
pub struct AnalyzerQueue {
    analyzer: Arc<dyn CoverAnalyzer>,
    delay: Duration,
}

impl AnalyzerQueue {
    pub fn new(analyzer: Arc<dyn CoverAnalyzer>) -> Self {
        Self {
            analyzer,
            delay: THROTTLE_DELAY,
        }
    }

    /// Override the inter-call delay
    pub fn with_delay(analyzer: Arc<dyn CoverAnalyzer>, delay: Duration) -> Self {
        Self { analyzer, delay }
    }

    /// Run a batch of jobs serially, posting one result per job
    ///
    /// Jobs are processed in order with the throttle delay between calls.
    /// Failures are logged and posted as `decision: None`.
    pub fn run(&self, jobs: Vec<AnalyzerJob>, tx: mpsc::Sender<TaskResult>) -> JoinHandle<()> {
        let analyzer = Arc::clone(&self.analyzer);
        let delay = self.delay;
        tokio::spawn(async move {
            let mut first = true;
            for job in jobs {
                if !first {
                    tokio::time::sleep(delay).await;
                }
                first = false;

                let decision = match analyzer.analyze(&job.artwork).await {
                    Ok(decision) => Some(decision),
                    Err(err) => {
                        tracing::warn!(album_id = %job.album_id, error = %err, "cover analysis failed");
                        None
                    }
                };

                if tx
                    .send(TaskResult::AnimationAnalyzed {
                        album_id: job.album_id,
                        decision,
                    })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        })
    }
}
