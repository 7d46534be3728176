use embassy_time::Duration;

/// Longest pattern any actuator emits for a single snapshot.
const MAX_STEPS: usize = 2;

/// Hold an output at `level` for `hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step<L> {
    pub level: L,
    pub hold: Duration,
}

impl<L> Step<L> {
    pub const fn new(level: L, hold: Duration) -> Self {
        Self { level, hold }
    }
}

/// Output waveform played once per received snapshot.
pub type Pattern<L> = heapless::Vec<Step<L>, MAX_STEPS>;

pub(crate) fn pattern<L, const K: usize>(steps: [Step<L>; K]) -> Pattern<L> {
    let mut out = Pattern::new();
    for step in steps {
        // K never exceeds MAX_STEPS at the call sites.
        let _ = out.push(step);
    }
    out
}
