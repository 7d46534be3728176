//! Wall-clock time driver so host tests can await embassy-time timers.
//!
//! Runs at the workspace tick rate; each scheduled wake gets a sleeper
//! thread.

use std::sync::OnceLock;
use std::task::Waker;
use std::time::{Duration, Instant};

use embassy_time_driver::{Driver, TICK_HZ};

const NANOS_PER_SEC: u128 = 1_000_000_000;

struct HostDriver;

fn epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

impl Driver for HostDriver {
    fn now(&self) -> u64 {
        let elapsed = epoch().elapsed().as_nanos();
        (elapsed * u128::from(TICK_HZ) / NANOS_PER_SEC) as u64
    }

    fn schedule_wake(&self, at: u64, waker: &Waker) {
        // Round up so `now()` has reached `at` once the sleeper wakes.
        let hz = u128::from(TICK_HZ);
        let nanos = (u128::from(at) * NANOS_PER_SEC + hz - 1) / hz;
        let deadline = epoch() + Duration::from_nanos(nanos as u64);
        let waker = waker.clone();
        std::thread::spawn(move || {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            waker.wake();
        });
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: HostDriver = HostDriver);
