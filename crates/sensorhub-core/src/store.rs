//! The shared reading store.
//!
//! [`ReadingStore`] holds the one current [`Reading`] together with the
//! broadcast channel that fans it out to viewers. It is wrapped in an
//! [`Arc`](std::sync::Arc) and handed to the ingestion handler, the
//! simulator, and the push channel.
//!
//! # Atomicity
//!
//! Every mutation takes the write guard, overwrites the reading, and
//! publishes it before releasing the guard. Broadcast order therefore
//! equals mutation order, and a subscriber registered under the read
//! guard sees exactly the mutations that follow its snapshot.

use sensorhub_types::{Reading, ReadingSource, SensorValues};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the reading broadcast channel.
///
/// A viewer that falls behind by more than this many readings receives
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest one.
const BROADCAST_CAPACITY: usize = 16;

/// Display format for `lastUpdate`.
const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

#[derive(Debug)]
struct Inner {
    reading: Reading,
    /// Set by the first accepted device reading and never cleared.
    live_seen: bool,
}

/// The current reading plus its fan-out channel.
#[derive(Debug)]
pub struct ReadingStore {
    inner: RwLock<Inner>,
    tx: broadcast::Sender<Reading>,
}

impl ReadingStore {
    /// Create a store holding the disconnected placeholder reading.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            inner: RwLock::new(Inner {
                reading: Reading::initial(),
                live_seen: false,
            }),
            tx,
        }
    }

    /// Snapshot of the current reading.
    pub async fn get(&self) -> Reading {
        self.inner.read().await.reading.clone()
    }

    /// Whether a device reading has ever been accepted.
    pub async fn live_data_seen(&self) -> bool {
        self.inner.read().await.live_seen
    }

    /// Accept a device reading.
    ///
    /// Always succeeds, sets the live lock, and broadcasts the result.
    pub async fn apply_live(&self, values: SensorValues) -> Reading {
        let mut inner = self.inner.write().await;
        inner.live_seen = true;
        inner
            .reading
            .overwrite(values, ReadingSource::Live, timestamp());
        self.publish(&inner.reading);
        inner.reading.clone()
    }

    /// Accept a simulated reading unless a device has ever reported.
    ///
    /// Returns the new reading, or `None` when the live lock is set and
    /// nothing changed.
    pub async fn apply_simulated(&self, values: SensorValues) -> Option<Reading> {
        let mut inner = self.inner.write().await;
        if inner.live_seen {
            return None;
        }
        inner
            .reading
            .overwrite(values, ReadingSource::Simulated, timestamp());
        self.publish(&inner.reading);
        Some(inner.reading.clone())
    }

    /// Subscribe to future readings.
    pub fn subscribe(&self) -> broadcast::Receiver<Reading> {
        self.tx.subscribe()
    }

    /// Subscribe and take the current reading in one step.
    ///
    /// The receiver yields every reading written after the returned
    /// snapshot, with no gap and no duplicate.
    pub async fn subscribe_with_snapshot(&self) -> (Reading, broadcast::Receiver<Reading>) {
        let inner = self.inner.read().await;
        let rx = self.tx.subscribe();
        (inner.reading.clone(), rx)
    }

    /// Number of live subscribers (connected viewers).
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn publish(&self, reading: &Reading) {
        // send only fails when nobody is subscribed, which is normal
        // before the first viewer connects.
        let delivered = self.tx.send(reading.clone()).unwrap_or(0);
        tracing::trace!(delivered, "reading broadcast");
    }
}

impl Default for ReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
