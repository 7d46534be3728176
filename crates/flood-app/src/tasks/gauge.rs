use crate::prelude::*;
use flood_bsp::Matrix;
use flood_pipeline::{render, MATRIX_LEDS};
use smart_leds::{SmartLedsWriteAsync, RGB8};

/// Splits a packed `0x00RRGGBB` gauge word.
fn unpack(word: u32) -> RGB8 {
    let [_, r, g, b] = word.to_be_bytes();
    RGB8::new(r, g, b)
}

#[embassy_executor::task]
pub async fn gauge_task(
    mut matrix: Matrix,
    mut source: StateReader,
    config: PipelineConfig,
) {
    loop {
        if let Some(record) =
            next_snapshot(&mut source, "Gauge", config.receive_timeout).await
        {
            let pixels = render::<MATRIX_LEDS>(&record);
            trace!("Gauge: river {}%", record.river_level());
            if let Err(e) = matrix.write(pixels.into_iter().map(unpack)).await {
                warn!("Gauge: matrix write failed: {:?}", e);
            }
        }
        Timer::after(config.gauge_period).await;
    }
}

