use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rst_common::with_logging::log::{debug, error, info, warn};
use rst_common::with_tokio::tokio;
use rst_common::with_tokio::tokio::sync::mpsc::{self, error::TrySendError};
use rst_common::with_tokio::tokio::sync::oneshot;
use rst_common::with_tokio::tokio::task::JoinHandle;

use crate::trust::types::IdentityBuilder;

use super::aggregator::Aggregator;
use super::publisher::Publisher;
use super::types::{PresentationError, RepoBuilder, SignerBuilder, SourceRepoBuilder};

/// Number of `VC` fragments published by a rebuild
pub type RebuildOutcome = Result<usize, PresentationError>;

/// `RebuildIntent` asks the worker for one rebuild. Intents with an `ack` are answered once the
/// rebuild covering them has finished
#[derive(Debug)]
pub struct RebuildIntent {
    seq: u64,
    ack: Option<oneshot::Sender<RebuildOutcome>>,
}

/// `RebuildHandle` is the submitting side of the rebuild lane, it can be cloned freely
#[derive(Clone, Debug)]
pub struct RebuildHandle {
    sender: mpsc::Sender<RebuildIntent>,
    seq: Arc<AtomicU64>,
}

impl RebuildHandle {
    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// submit enqueues a rebuild without waiting for it
    ///
    /// A full queue already holds a rebuild that hasn't started yet, that rebuild will read the
    /// newer state, so the intent is counted as coalesced instead of failing
    pub fn submit(&self) -> Result<u64, PresentationError> {
        let seq = self.next_seq();
        match self.sender.try_send(RebuildIntent { seq, ack: None }) {
            Ok(_) => Ok(seq),
            Err(TrySendError::Full(_)) => {
                debug!("[presentation:rebuild] queue full, intent #{} coalesced", seq);
                Ok(seq)
            }
            Err(TrySendError::Closed(_)) => Err(PresentationError::LaneClosed),
        }
    }

    pub async fn submit_and_wait(&self) -> RebuildOutcome {
        let (ack, waiter) = oneshot::channel();
        let seq = self.next_seq();

        self.sender
            .send(RebuildIntent {
                seq,
                ack: Some(ack),
            })
            .await
            .map_err(|_| PresentationError::LaneClosed)?;

        waiter.await.map_err(|_| PresentationError::LaneClosed)?
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// `channel` creates the rebuild lane, `capacity` is the number of intents allowed to wait
pub fn channel(capacity: usize) -> (RebuildHandle, mpsc::Receiver<RebuildIntent>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    let handle = RebuildHandle {
        sender,
        seq: Arc::new(AtomicU64::new(0)),
    };

    (handle, receiver)
}

/// `Worker` is the only consumer of the rebuild lane
///
/// Every waiting intent is drained before a rebuild starts, one rebuild answers all of them.
/// A fatal error stops the worker, later submissions fail with
/// [`PresentationError::LaneClosed`].
pub struct Worker<TSource, TRepo, TSigner, TIdentity>
where
    TSource: SourceRepoBuilder,
    TRepo: RepoBuilder,
    TSigner: SignerBuilder,
    TIdentity: IdentityBuilder,
{
    aggregator: Aggregator<TSource>,
    publisher: Publisher<TRepo, TSigner>,
    identity: TIdentity,
    receiver: mpsc::Receiver<RebuildIntent>,
}

impl<TSource, TRepo, TSigner, TIdentity> Worker<TSource, TRepo, TSigner, TIdentity>
where
    TSource: SourceRepoBuilder + 'static,
    TRepo: RepoBuilder + 'static,
    TSigner: SignerBuilder + 'static,
    TIdentity: IdentityBuilder + 'static,
{
    pub fn new(
        aggregator: Aggregator<TSource>,
        publisher: Publisher<TRepo, TSigner>,
        identity: TIdentity,
        receiver: mpsc::Receiver<RebuildIntent>,
    ) -> Self {
        Self {
            aggregator,
            publisher,
            identity,
            receiver,
        }
    }

    async fn rebuild(&self) -> RebuildOutcome {
        let my_did = self.identity.my_did();
        let fragments = self.aggregator.aggregate(&my_did).await?;
        let total = fragments.len();

        self.publisher.publish(fragments).await?;
        Ok(total)
    }

    pub async fn run(mut self) {
        while let Some(intent) = self.receiver.recv().await {
            let mut batch = vec![intent];
            while let Ok(next) = self.receiver.try_recv() {
                batch.push(next);
            }

            let last_seq = batch.last().map(|intent| intent.seq).unwrap_or_default();
            debug!(
                "[presentation:rebuild] rebuilding for {} intent(s), up to #{}",
                batch.len(),
                last_seq
            );

            let outcome = self.rebuild().await;
            let fatal = match &outcome {
                Ok(total) => {
                    info!("[presentation:rebuild] published {} fragment(s)", total);
                    false
                }
                Err(err) if err.is_fatal() => {
                    error!("[presentation:rebuild] stopping rebuild lane: {}", err);
                    true
                }
                Err(err) => {
                    warn!("[presentation:rebuild] rebuild #{} dropped: {}", last_seq, err);
                    false
                }
            };

            if fatal {
                self.receiver.close();
            }

            for intent in batch {
                if let Some(ack) = intent.ack {
                    let _ = ack.send(outcome.clone());
                }
            }

            if fatal {
                break;
            }
        }

        info!("[presentation:rebuild] rebuild lane stopped");
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
