#![no_std]

#[doc(hidden)]
pub mod util;
pub mod tasks;

use embassy_executor::{InterruptExecutor, SendSpawner};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use flood_pipeline::{Delivery, PipelineConfig};
use static_cell::StaticCell;

pub const FW_VERSION: &str = env!("FW_VERSION");

pub type StateMutex = CriticalSectionRawMutex;

cfg_if::cfg_if! {
    if #[cfg(feature = "single-delivery")] {
        pub type StateChannel = flood_pipeline::StateQueue<StateMutex>;
        pub type StateWriter =
            flood_pipeline::StateQueueWriter<'static, StateMutex>;
        pub type StateReader =
            flood_pipeline::StateQueueReader<'static, StateMutex>;
        const DELIVERY: Delivery = Delivery::SingleDelivery;
    } else {
        pub type StateChannel = flood_pipeline::StateBus<StateMutex>;
        pub type StateWriter =
            flood_pipeline::StateBusWriter<'static, StateMutex>;
        pub type StateReader =
            flood_pipeline::StateBusReader<'static, StateMutex>;
        const DELIVERY: Delivery = Delivery::Broadcast;
    }
}

pub const CONFIG: PipelineConfig =
    PipelineConfig::DEFAULT.with_delivery(DELIVERY);

/// Producer and consumer ends of the state channel, one per task.
pub struct StateEndpoints {
    pub writer: StateWriter,
    pub display: StateReader,
    pub status_leds: StateReader,
    pub buzzer: StateReader,
    pub gauge: StateReader,
}

static STATE_CHANNEL: StaticCell<StateChannel> = StaticCell::new();

pub fn init_state_channel() -> StateEndpoints {
    let channel: &'static StateChannel =
        STATE_CHANNEL.init(StateChannel::new());

    cfg_if::cfg_if! {
        if #[cfg(feature = "single-delivery")] {
            let reader = || channel.reader();
        } else {
            let reader = || unwrap!(channel.reader());
        }
    }

    StateEndpoints {
        writer: channel.writer(),
        display: reader(),
        status_leds: reader(),
        buzzer: reader(),
        gauge: reader(),
    }
}

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn EGU1_SWI1() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Starts the executor the sampler runs on. It preempts the thread-mode
/// executor that hosts the actuator tasks.
pub fn init_executors() -> SendSpawner {
    interrupt::EGU1_SWI1.set_priority(Priority::P6);
    EXECUTOR_HIGH.start(interrupt::EGU1_SWI1)
}

pub mod prelude {
    pub use super::{
        debug, error, info, init_executors, init_state_channel, tasks::*,
        trace, unwrap, warn, StateEndpoints, StateReader, StateWriter,
        CONFIG, FW_VERSION,
    };
    pub use embassy_executor::Spawner;
    pub use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    pub use embassy_time::{Duration, Timer};
    pub use flood_bsp::FloodBoard;
    pub use flood_pipeline::{
        PipelineConfig, PipelineError, StatePublisher, StateRecord,
        StateSource,
    };
}
