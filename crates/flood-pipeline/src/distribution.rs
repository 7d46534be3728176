//! Channels carrying [`StateRecord`] snapshots from the sampler to the
//! actuator consumers.
//!
//! Two flavours share one interface:
//!
//! - [`StateQueue`]: a single bounded FIFO. Every snapshot is handed to
//!   exactly one consumer, whichever receives first. A full queue rejects
//!   the newest snapshot.
//! - [`StateBus`]: a bounded broadcast. Every reader sees every snapshot in
//!   publish order. When the slowest reader is a full buffer behind, the
//!   oldest snapshot is overwritten and that reader is told how many it
//!   missed.
//!
//! Publishing never blocks. Receiving blocks until a snapshot is available,
//! optionally bounded by a timeout.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::pubsub::{
    ImmediatePublisher, PubSubChannel, Subscriber, WaitResult,
};
use embassy_time::{with_timeout, Duration};
use portable_atomic::{AtomicU32, Ordering};

use crate::error::PipelineError;
use crate::state::StateRecord;

/// Snapshot slots in either channel.
pub const QUEUE_CAPACITY: usize = 20;
/// Actuator consumers: display, status LEDs, buzzer, LED matrix.
pub const CONSUMER_COUNT: usize = 4;

/// Producer side of a distribution channel.
pub trait StatePublisher {
    /// Enqueues `record` without waiting.
    fn publish(&mut self, record: StateRecord) -> Result<(), PipelineError>;

    /// Counters of the channel behind this publisher.
    fn stats(&self) -> &PublishStats;
}

/// Consumer side of a distribution channel.
#[allow(async_fn_in_trait)]
pub trait StateSource {
    /// Waits for the next snapshot addressed to this reader.
    async fn next(&mut self) -> Result<StateRecord, PipelineError>;

    /// Takes a snapshot if one is already waiting.
    fn try_next(&mut self) -> Result<StateRecord, PipelineError>;

    /// Waits for a snapshot and then skips ahead to the newest one this
    /// reader can see without stealing from other consumers. Snapshots
    /// overwritten on the way are added to [`take_missed`](Self::take_missed).
    async fn next_latest(&mut self) -> Result<StateRecord, PipelineError> {
        self.next().await
    }

    /// Snapshots lost to overwriting before this reader got to them, since
    /// the previous call. Clears the count.
    fn take_missed(&mut self) -> u64 {
        0
    }

    /// [`next_latest`](Self::next_latest) bounded by `timeout`; `None`
    /// waits forever. Expiry reports [`PipelineError::QueueEmpty`].
    async fn next_within(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<StateRecord, PipelineError> {
        match timeout {
            None => self.next_latest().await,
            Some(timeout) => with_timeout(timeout, self.next_latest())
                .await
                .unwrap_or(Err(PipelineError::QueueEmpty)),
        }
    }
}

/// Publish counters kept by each channel.
pub struct PublishStats {
    published: AtomicU32,
    dropped: AtomicU32,
}

impl PublishStats {
    pub const fn new() -> Self {
        Self { published: AtomicU32::new(0), dropped: AtomicU32::new(0) }
    }

    /// Snapshots that entered the channel.
    pub fn published(&self) -> u32 {
        self.published.load(Ordering::Relaxed)
    }

    /// Snapshots lost to a full channel, rejected or overwritten.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for PublishStats {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Single delivery
// ---------------------------------------------------------------------------

/// Shared FIFO: each snapshot is delivered to one consumer only.
pub struct StateQueue<M: RawMutex> {
    channel: Channel<M, StateRecord, QUEUE_CAPACITY>,
    stats: PublishStats,
}

impl<M: RawMutex> StateQueue<M> {
    pub const fn new() -> Self {
        Self { channel: Channel::new(), stats: PublishStats::new() }
    }

    pub fn writer(&self) -> StateQueueWriter<'_, M> {
        StateQueueWriter { queue: self }
    }

    /// Any number of readers may share the queue; they compete for records.
    pub fn reader(&self) -> StateQueueReader<'_, M> {
        StateQueueReader { queue: self }
    }

    pub fn stats(&self) -> &PublishStats {
        &self.stats
    }

    /// Snapshots waiting to be received.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<M: RawMutex> Default for StateQueue<M> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StateQueueWriter<'a, M: RawMutex> {
    queue: &'a StateQueue<M>,
}

impl<M: RawMutex> StatePublisher for StateQueueWriter<'_, M> {
    fn publish(&mut self, record: StateRecord) -> Result<(), PipelineError> {
        match self.queue.channel.try_send(record) {
            Ok(()) => {
                self.queue.stats.record_published();
                Ok(())
            }
            Err(_) => {
                self.queue.stats.record_dropped();
                Err(PipelineError::QueueFull)
            }
        }
    }

    fn stats(&self) -> &PublishStats {
        &self.queue.stats
    }
}

pub struct StateQueueReader<'a, M: RawMutex> {
    queue: &'a StateQueue<M>,
}

impl<M: RawMutex> StateSource for StateQueueReader<'_, M> {
    async fn next(&mut self) -> Result<StateRecord, PipelineError> {
        Ok(self.queue.channel.receive().await)
    }

    fn try_next(&mut self) -> Result<StateRecord, PipelineError> {
        self.queue
            .channel
            .try_receive()
            .map_err(|_| PipelineError::QueueEmpty)
    }
}

// ---------------------------------------------------------------------------
// Broadcast
// ---------------------------------------------------------------------------

type BusChannel<M> =
    PubSubChannel<M, StateRecord, QUEUE_CAPACITY, CONSUMER_COUNT, 1>;

/// Fan-out channel: every reader receives every snapshot.
pub struct StateBus<M: RawMutex> {
    channel: BusChannel<M>,
    stats: PublishStats,
}

impl<M: RawMutex> StateBus<M> {
    pub const fn new() -> Self {
        Self { channel: PubSubChannel::new(), stats: PublishStats::new() }
    }

    pub fn writer(&self) -> StateBusWriter<'_, M> {
        StateBusWriter {
            publisher: self.channel.immediate_publisher(),
            channel: &self.channel,
            stats: &self.stats,
        }
    }

    /// Claims one of the [`CONSUMER_COUNT`] reader slots. The reader only
    /// sees snapshots published after it was created.
    pub fn reader(&self) -> Result<StateBusReader<'_, M>, PipelineError> {
        self.channel
            .subscriber()
            .map(|subscriber| StateBusReader { subscriber, missed: 0 })
            .map_err(|_| PipelineError::ReadersExhausted)
    }

    pub fn stats(&self) -> &PublishStats {
        &self.stats
    }
}

impl<M: RawMutex> Default for StateBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct StateBusWriter<'a, M: RawMutex> {
    publisher: ImmediatePublisher<
        'a,
        M,
        StateRecord,
        QUEUE_CAPACITY,
        CONSUMER_COUNT,
        1,
    >,
    channel: &'a BusChannel<M>,
    stats: &'a PublishStats,
}

impl<M: RawMutex> StatePublisher for StateBusWriter<'_, M> {
    fn publish(&mut self, record: StateRecord) -> Result<(), PipelineError> {
        // Single producer: the buffer can only shrink between this check
        // and the publish.
        if self.channel.is_full() {
            self.stats.record_dropped();
        }
        self.publisher.publish_immediate(record);
        self.stats.record_published();
        Ok(())
    }

    fn stats(&self) -> &PublishStats {
        self.stats
    }
}

pub struct StateBusReader<'a, M: RawMutex> {
    subscriber:
        Subscriber<'a, M, StateRecord, QUEUE_CAPACITY, CONSUMER_COUNT, 1>,
    missed: u64,
}

impl<M: RawMutex> StateBusReader<'_, M> {
    fn unwrap_wait(
        result: WaitResult<StateRecord>,
    ) -> Result<StateRecord, PipelineError> {
        match result {
            WaitResult::Message(record) => Ok(record),
            WaitResult::Lagged(missed) => Err(PipelineError::Lagged(missed)),
        }
    }
}

impl<M: RawMutex> StateSource for StateBusReader<'_, M> {
    async fn next(&mut self) -> Result<StateRecord, PipelineError> {
        Self::unwrap_wait(self.subscriber.next_message().await)
    }

    fn try_next(&mut self) -> Result<StateRecord, PipelineError> {
        match self.subscriber.try_next_message() {
            Some(result) => Self::unwrap_wait(result),
            None => Err(PipelineError::QueueEmpty),
        }
    }

    async fn next_latest(&mut self) -> Result<StateRecord, PipelineError> {
        let mut latest = loop {
            match self.next().await {
                Err(PipelineError::Lagged(n)) => self.missed += n,
                result => break result?,
            }
        };
        loop {
            match self.try_next() {
                Ok(record) => latest = record,
                Err(PipelineError::Lagged(n)) => self.missed += n,
                Err(_) => return Ok(latest),
            }
        }
    }

    fn take_missed(&mut self) -> u64 {
        core::mem::take(&mut self.missed)
    }
}
