mod common;

use embassy_futures::join::join;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::{Duration, Instant};

use flood_pipeline::{
    PipelineError, StateBus, StatePublisher, StateQueue, StateRecord,
    StateSource, CONSUMER_COUNT, QUEUE_CAPACITY,
};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn record(seq: u8) -> StateRecord {
    StateRecord::new(seq, 0)
}

// ---------------------------------------------------------------------------
// Single delivery
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn queue_is_fifo() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut reader = queue.reader();

    for seq in 0..5 {
        writer.publish(record(seq)).unwrap();
    }
    for seq in 0..5 {
        assert_eq!(reader.next().await, Ok(record(seq)));
    }
    assert!(queue.is_empty());
}

#[futures_test::test]
async fn queue_delivers_each_record_once() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut readers =
        [queue.reader(), queue.reader(), queue.reader(), queue.reader()];

    for seq in 0..QUEUE_CAPACITY as u8 {
        writer.publish(record(seq)).unwrap();
    }

    let mut seen = [0u8; QUEUE_CAPACITY];
    let mut last = [None::<u8>; CONSUMER_COUNT];
    let mut turn = 0;
    loop {
        let idx = turn % CONSUMER_COUNT;
        match readers[idx].try_next() {
            Ok(r) => {
                let seq = r.river_level();
                seen[seq as usize] += 1;
                if let Some(prev) = last[idx] {
                    assert!(seq > prev, "reader {idx} saw {seq} after {prev}");
                }
                last[idx] = Some(seq);
            }
            Err(e) => {
                assert_eq!(e, PipelineError::QueueEmpty);
                break;
            }
        }
        turn += 1;
    }

    assert!(seen.iter().all(|&n| n == 1));
    assert!(last.iter().all(|l| l.is_some()));
}

#[futures_test::test]
async fn full_queue_drops_newest() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut reader = queue.reader();

    for seq in 0..25 {
        let result = writer.publish(record(seq));
        if (seq as usize) < QUEUE_CAPACITY {
            assert_eq!(result, Ok(()));
        } else {
            assert_eq!(result, Err(PipelineError::QueueFull));
        }
    }
    assert_eq!(queue.stats().published(), 20);
    assert_eq!(queue.stats().dropped(), 5);
    assert_eq!(queue.len(), QUEUE_CAPACITY);

    for seq in 0..QUEUE_CAPACITY as u8 {
        assert_eq!(reader.next().await, Ok(record(seq)));
    }
}

#[futures_test::test]
async fn empty_queue_try_next_fails() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut reader = queue.reader();
    assert_eq!(reader.try_next(), Err(PipelineError::QueueEmpty));
}

#[futures_test::test]
async fn blocked_reader_wakes_on_publish() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut reader = queue.reader();

    let (received, ()) = join(reader.next(), async {
        writer.publish(record(42)).unwrap();
    })
    .await;
    assert_eq!(received, Ok(record(42)));
}

#[futures_test::test]
async fn queue_latest_does_not_skip() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut reader = queue.reader();

    writer.publish(record(1)).unwrap();
    writer.publish(record(2)).unwrap();
    assert_eq!(reader.next_latest().await, Ok(record(1)));
    assert_eq!(queue.len(), 1);
    assert_eq!(reader.take_missed(), 0);
}

// ---------------------------------------------------------------------------
// Broadcast
// ---------------------------------------------------------------------------

#[futures_test::test]
async fn bus_delivers_every_record_to_every_reader() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut readers = [
        bus.reader().unwrap(),
        bus.reader().unwrap(),
        bus.reader().unwrap(),
        bus.reader().unwrap(),
    ];
    let mut writer = bus.writer();

    for seq in 0..10 {
        writer.publish(record(seq)).unwrap();
    }

    for reader in readers.iter_mut() {
        for seq in 0..10 {
            assert_eq!(reader.next().await, Ok(record(seq)));
        }
        assert_eq!(reader.try_next(), Err(PipelineError::QueueEmpty));
    }
    assert_eq!(bus.stats().published(), 10);
    assert_eq!(bus.stats().dropped(), 0);
}

#[futures_test::test]
async fn bus_reader_slots_are_limited() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let _readers: [_; CONSUMER_COUNT] =
        core::array::from_fn(|_| bus.reader().unwrap());
    assert!(matches!(bus.reader(), Err(PipelineError::ReadersExhausted)));
}

#[futures_test::test]
async fn slow_reader_is_told_what_it_missed() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut slow = bus.reader().unwrap();
    let mut writer = bus.writer();

    for seq in 0..25 {
        assert_eq!(writer.publish(record(seq)), Ok(()));
    }
    assert_eq!(bus.stats().published(), 25);
    assert_eq!(bus.stats().dropped(), 5);

    assert_eq!(slow.next().await, Err(PipelineError::Lagged(5)));
    for seq in 5..25 {
        assert_eq!(slow.next().await, Ok(record(seq)));
    }
}

#[futures_test::test]
async fn bus_latest_skips_to_newest() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut fast = bus.reader().unwrap();
    let mut catching_up = bus.reader().unwrap();
    let mut writer = bus.writer();

    for seq in 0..30 {
        writer.publish(record(seq)).unwrap();
    }
    assert_eq!(catching_up.next_latest().await, Ok(record(29)));
    assert_eq!(catching_up.try_next(), Err(PipelineError::QueueEmpty));
    assert_eq!(catching_up.take_missed(), 10);

    // The other reader still gets its own backlog.
    assert_eq!(fast.next().await, Err(PipelineError::Lagged(10)));
    assert_eq!(fast.next().await, Ok(record(10)));
}

#[futures_test::test]
async fn lagging_consumer_learns_how_many_it_missed() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut reader = bus.reader().unwrap();
    let mut writer = bus.writer();

    for seq in 0..25 {
        writer.publish(record(seq)).unwrap();
    }
    assert_eq!(reader.next_within(None).await, Ok(record(24)));
    assert_eq!(reader.take_missed(), 5);
    assert_eq!(reader.take_missed(), 0);

    // Keeping up loses nothing.
    writer.publish(record(30)).unwrap();
    assert_eq!(reader.next_within(None).await, Ok(record(30)));
    assert_eq!(reader.take_missed(), 0);
}

#[futures_test::test]
async fn blocked_bus_reader_wakes_on_publish() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut reader = bus.reader().unwrap();
    let mut writer = bus.writer();

    let (received, ()) = join(reader.next_latest(), async {
        writer.publish(record(7)).unwrap();
    })
    .await;
    assert_eq!(received, Ok(record(7)));
}

// ---------------------------------------------------------------------------
// Receive timeout
// ---------------------------------------------------------------------------

const TIMEOUT: Duration = Duration::from_millis(50);

#[futures_test::test]
async fn timed_receive_on_empty_queue_reports_empty() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut reader = queue.reader();

    let start = Instant::now();
    assert_eq!(
        reader.next_within(Some(TIMEOUT)).await,
        Err(PipelineError::QueueEmpty)
    );
    assert!(start.elapsed() >= TIMEOUT);
}

#[futures_test::test]
async fn timed_receive_on_empty_bus_reports_empty() {
    let bus: StateBus<NoopRawMutex> = StateBus::new();
    let mut reader = bus.reader().unwrap();

    let start = Instant::now();
    assert_eq!(
        reader.next_within(Some(TIMEOUT)).await,
        Err(PipelineError::QueueEmpty)
    );
    assert!(start.elapsed() >= TIMEOUT);
    assert_eq!(reader.take_missed(), 0);
}

#[futures_test::test]
async fn timed_receive_returns_waiting_record() {
    let queue: StateQueue<NoopRawMutex> = StateQueue::new();
    let mut writer = queue.writer();
    let mut reader = queue.reader();

    writer.publish(record(3)).unwrap();
    assert_eq!(reader.next_within(Some(TIMEOUT)).await, Ok(record(3)));
}
