use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use common::{ClientSnapshot, DateSelection, FailureReason, RequestEvent, RequestState};
use tokio::{sync::watch, time};
use tracing::{debug, error, info};

use crate::{
    config::PredictorConfig, error::PredictionError, remote::HttpPredictionSource,
    traits::PredictionSource,
};

/// Owns the date selection and the request state machine, and mediates
/// requests to a [`PredictionSource`].
///
/// Every request gets a sequence number when it is issued. Only a completion
/// carrying the latest sequence number may move the state out of `Loading`;
/// anything older is dropped, so a slow earlier response can never overwrite
/// a newer one.
pub struct PredictionClient<S> {
    source: S,
    timeout: Duration,
    latest: AtomicU64,
    snapshot_tx: watch::Sender<ClientSnapshot>,
}

impl PredictionClient<HttpPredictionSource> {
    pub fn from_config(config: &PredictorConfig, date: DateSelection) -> Result<Self, PredictionError> {
        let source = HttpPredictionSource::new(config)?;
        info!("Prediction endpoint: {}", source.predict_url());
        Ok(Self::new(source, date, config.timeout))
    }
}

impl<S: PredictionSource> PredictionClient<S> {
    pub fn new(source: S, date: DateSelection, timeout: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(ClientSnapshot::new(date));
        Self {
            source,
            timeout,
            latest: AtomicU64::new(0),
            snapshot_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ClientSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> ClientSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn date(&self) -> DateSelection {
        self.snapshot_tx.borrow().date.clone()
    }

    pub fn state(&self) -> RequestState {
        self.snapshot_tx.borrow().state.clone()
    }

    /// Replaces the date selection. Does not issue a request.
    pub fn set_date(&self, date: impl Into<DateSelection>) {
        let date = date.into();
        self.snapshot_tx.send_if_modified(|snapshot| {
            if snapshot.date == date {
                return false;
            }
            snapshot.date = date;
            true
        });
    }

    /// Clears a finished result or failure. The date selection is kept, and an
    /// in-flight request is left alone.
    pub fn reset_result(&self) {
        self.apply(RequestEvent::Reset);
    }

    /// Supersedes whatever is in flight and drops back to `Idle`.
    pub fn cancel_pending(&self) {
        let mut superseded = 0;
        self.snapshot_tx.send_if_modified(|snapshot| {
            superseded = self.latest.fetch_add(1, Ordering::SeqCst);
            Self::transition(snapshot, RequestEvent::Cancelled)
        });
        debug!("Cancelling pending predictions up to #{}", superseded);
    }

    /// Issues a prediction request for the current date.
    ///
    /// The request is issued (sequence number taken, date captured, state set
    /// to `Loading`) when this is called; the returned future performs the
    /// fetch. It never fails: it resolves to the state the client is in once
    /// this request has settled, which for a superseded request is whatever
    /// the newer one left behind. Dropping the future before it resolves
    /// cancels the request, so `Loading` never outlives it.
    pub fn request_prediction(&self) -> impl Future<Output = RequestState> + Send + '_ {
        let date = self.date();
        let mut seq = 0;
        self.snapshot_tx.send_if_modified(|snapshot| {
            seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            Self::transition(snapshot, RequestEvent::Started)
        });
        debug!("Prediction request #{} issued for {}", seq, date);

        let pending = PendingRequest {
            client: self,
            seq,
            settled: false,
        };

        async move {
            let outcome = match time::timeout(self.timeout, self.source.fetch(&date)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(PredictionError::Timeout(self.timeout)),
            };

            let event = match outcome {
                Ok(result) => {
                    info!(
                        "Prediction for {}: high={:.2} low={:.2} avg={:.2}, {} strategy steps",
                        date,
                        result.high_price,
                        result.low_price,
                        result.avg_price,
                        result.strategy.len()
                    );
                    RequestEvent::Succeeded(result)
                }
                Err(e) => {
                    error!("Error fetching prediction for {}: {}", date, e);
                    RequestEvent::Failed(FailureReason::from(&e))
                }
            };

            if !pending.settle(event) {
                debug!(
                    "Discarding response #{} for {}, superseded by #{}",
                    seq,
                    date,
                    self.latest.load(Ordering::SeqCst)
                );
            }

            self.state()
        }
    }

    fn apply(&self, event: RequestEvent) {
        self.snapshot_tx
            .send_if_modified(|snapshot| Self::transition(snapshot, event));
    }

    /// Applies `event` only while `seq` is the most recently issued request.
    /// Returns false when the event was dropped as stale. The sequence check
    /// runs under the same lock that bumps `latest`.
    fn apply_if_current(&self, seq: u64, event: RequestEvent) -> bool {
        let mut current = false;
        self.snapshot_tx.send_if_modified(|snapshot| {
            current = self.latest.load(Ordering::SeqCst) == seq;
            current && Self::transition(snapshot, event)
        });
        current
    }

    fn transition(snapshot: &mut ClientSnapshot, event: RequestEvent) -> bool {
        let next = snapshot.state.clone().apply(event);
        if next == snapshot.state {
            return false;
        }
        snapshot.state = next;
        true
    }
}

/// The issued half of a request. Dropped without settling, it cancels its
/// request if that request is still the latest one.
struct PendingRequest<'a, S: PredictionSource> {
    client: &'a PredictionClient<S>,
    seq: u64,
    settled: bool,
}

impl<S: PredictionSource> PendingRequest<'_, S> {
    fn settle(mut self, event: RequestEvent) -> bool {
        self.settled = true;
        self.client.apply_if_current(self.seq, event)
    }
}

impl<S: PredictionSource> Drop for PendingRequest<'_, S> {
    fn drop(&mut self) {
        if !self.settled && self.client.apply_if_current(self.seq, RequestEvent::Cancelled) {
            debug!("Prediction request #{} dropped before it settled", self.seq);
        }
    }
}
