use crate::prelude::*;
use flood_pipeline::{compose, DisplayFrame};

/// Hands a composed frame to the panel. The panel driver lives outside this
/// firmware, so the frame goes to the log, and only when it changed.
fn present(frame: &DisplayFrame, last: &mut Option<DisplayFrame>) {
    if last.as_ref() == Some(frame) {
        return;
    }
    for item in frame.items.iter() {
        debug!("Display ({}, {}): {}", item.x, item.y, item.text.as_str());
    }
    *last = Some(frame.clone());
}

#[embassy_executor::task]
pub async fn display_task(mut source: StateReader, config: PipelineConfig) {
    let mut last: Option<DisplayFrame> = None;
    loop {
        if let Some(record) =
            next_snapshot(&mut source, "Display", config.receive_timeout)
                .await
        {
            let frame = compose(&record);
            if record.alert_active() && last.as_ref() != Some(&frame) {
                info!("Display: alert {:?}", record.alert());
            }
            present(&frame, &mut last);
        }
        Timer::after(config.display_period).await;
    }
}
