/// Failures at the distribution channel. None of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// The channel had no free slot; the snapshot was not enqueued.
    QueueFull,
    /// Nothing arrived before the receive deadline.
    QueueEmpty,
    /// A broadcast reader fell behind and missed this many snapshots.
    Lagged(u64),
    /// Every broadcast reader slot is already taken.
    ReadersExhausted,
}

impl core::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::QueueFull => f.write_str("state queue full"),
            Self::QueueEmpty => f.write_str("state queue empty"),
            Self::Lagged(n) => write!(f, "reader lagged by {n} snapshots"),
            Self::ReadersExhausted => f.write_str("no free reader slot"),
        }
    }
}
