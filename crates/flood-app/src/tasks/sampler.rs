use crate::prelude::*;
use embassy_time::Ticker;
use flood_bsp::{Joystick, ADC_MAX};
use flood_pipeline::{AxisSample, Normalizer};

/// Reads both joystick axes. Single-ended conversions can dip slightly
/// below zero; those read as 0.
async fn read_axes(joystick: &mut Joystick) -> AxisSample {
    let mut buf = [0i16; 2];
    joystick.sample(&mut buf).await;
    let [x, y] = buf.map(|raw| raw.clamp(0, ADC_MAX as i16) as u16);
    AxisSample { x, y }
}

/// Samples the joystick at the configured cadence, integrates it into the
/// river/rain state and publishes every snapshot without waiting.
#[embassy_executor::task]
pub async fn sampler_task(
    mut joystick: Joystick,
    mut writer: StateWriter,
    config: PipelineConfig,
) {
    let mut normalizer = Normalizer::new(config.calibration);
    let mut ticker = Ticker::every(config.sample_period);
    let report_every = config.cycles_per_report();
    let mut cycles: u64 = 0;

    info!("Sampler started: {:?}", normalizer.snapshot());

    loop {
        let sample = read_axes(&mut joystick).await;
        let (dx, dy) = normalizer.deviations(sample);
        trace!("X deviation: {}, Y deviation: {}", dx, dy);

        let record = normalizer.update(sample);
        // A full channel drops this snapshot; the next cycle replaces it.
        let _ = writer.publish(record);

        cycles = cycles.wrapping_add(1);
        if cycles % report_every == 0 {
            let stats = writer.stats();
            info!(
                "State {:?}: {} published, {} dropped",
                record,
                stats.published(),
                stats.dropped()
            );
        }

        ticker.next().await;
    }
}
