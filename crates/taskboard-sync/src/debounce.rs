/*
[INPUT]:  Rapid successive values (search input), quiet period
[OUTPUT]: The last value, once the quiet period elapses
[POS]:    Scheduling layer - cancellable delayed delivery
[UPDATE]: When changing debounce or cancellation semantics
*/

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Default quiet period for search input
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Last-write-wins debouncer.
///
/// Each [`schedule`](Self::schedule) cancels the pending timer and starts a
/// new one; only a value whose timer runs to completion is delivered. Timers
/// run on the tokio clock and must be scheduled from inside a runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    /// Bumped on every schedule/cancel; deliveries from older timers are dropped.
    generation: u64,
    pending: Option<CancellationToken>,
    tx: mpsc::UnboundedSender<(u64, T)>,
    rx: mpsc::UnboundedReceiver<(u64, T)>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `value` and restart the quiet period.
    pub fn schedule(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let child = token.clone();
        let generation = self.generation;
        let tx = self.tx.clone();
        let deadline = Instant::now() + self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {
                    trace!("debounced value superseded");
                }
                _ = sleep_until(deadline) => {
                    // Receiver lives as long as the debouncer; a send error
                    // only means it was dropped.
                    let _ = tx.send((generation, value));
                }
            }
        });

        self.pending = Some(token);
    }

    /// Drop the pending value, if any. Values already delivered but not yet
    /// taken with [`fired`](Self::fired) are discarded too.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
        while self.rx.try_recv().is_ok() {}
    }

    /// Whether a timer is running or a fired value is waiting
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Wait for the next value whose quiet period elapsed.
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` loop.
    pub async fn fired(&mut self) -> T {
        loop {
            match self.rx.recv().await {
                Some((generation, value)) if generation == self.generation => {
                    self.pending = None;
                    return value;
                }
                Some(_) => continue,
                // The debouncer holds a sender, so the channel never closes.
                None => return std::future::pending().await,
            }
        }
    }

    /// Non-blocking variant of [`fired`](Self::fired)
    pub fn try_fired(&mut self) -> Option<T> {
        while let Ok((generation, value)) = self.rx.try_recv() {
            if generation == self.generation {
                self.pending = None;
                return Some(value);
            }
        }
        None
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
