//! Cancellable request tasks

use crate::events::Completion;
use std::future::Future;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A spawned request that can be abandoned. A cancelled request never
/// delivers its completion.
#[derive(Debug)]
pub struct RequestHandle {
    generation: u64,
    token: CancellationToken,
}

impl RequestHandle {
    /// Runs `request` on the runtime and forwards its completion to `completions`.
    pub fn spawn<F>(generation: u64, completions: mpsc::Sender<Completion>, request: F) -> Self
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                completion = request => {
                    let _ = completions.send(completion).await;
                }
            }
        });
        Self {
            generation,
            token,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}
