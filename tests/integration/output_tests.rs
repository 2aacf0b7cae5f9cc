//! Integration tests for the shared output lock.
//!
//! Writers run on real threads here so that lock contention is genuine.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use embassy_time::Duration;
use futures_lite::future::block_on;

use motordiag::app::output::OutputSink;

use crate::mock_hw::{RecordingDisplay, RecordingLog, StallingLog, TrickleLog};

#[test]
fn racing_writers_never_interleave() {
    const A: &str = "Ventilation says hello from the left-hand thread";
    const B: &str = "fuel responder writes from the right-hand thread!";
    const ROUNDS: usize = 20;

    let log = TrickleLog::default();
    let sink = Arc::new(OutputSink::new(
        log.clone(),
        RecordingDisplay::default(),
        Duration::from_secs(10),
    ));

    let writers: Vec<_> = [A, B]
        .into_iter()
        .map(|text| {
            let sink = sink.clone();
            std::thread::spawn(move || {
                for _ in 0..ROUNDS {
                    assert!(block_on(sink.append_line(text)));
                }
            })
        })
        .collect();
    for w in writers {
        w.join().unwrap();
    }

    let lines = log.lines();
    assert_eq!(lines.len(), 2 * ROUNDS);
    for line in &lines {
        assert!(line == A || line == B, "interleaved line: {line:?}");
    }
    assert_eq!(sink.dropped_writes(), 0);
}

#[test]
fn writers_racing_at_the_default_deadline_are_whole_or_dropped() {
    const LINES: [&str; 4] = [
        "Ventilation says hello from the first writer thread",
        "fuel responder writes from the second writer thread",
        "motor supervisor reports from the third writer here",
        "a fourth writer joins in to keep the lock contended",
    ];
    const ROUNDS: usize = 25;

    let log = TrickleLog::default();
    let sink = Arc::new(OutputSink::new(
        log.clone(),
        RecordingDisplay::default(),
        Duration::from_millis(100),
    ));

    let writers: Vec<_> = LINES
        .into_iter()
        .map(|text| {
            let sink = sink.clone();
            std::thread::spawn(move || {
                (0..ROUNDS)
                    .filter(|_| block_on(sink.append_line(text)))
                    .count()
            })
        })
        .collect();
    let accepted: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();

    let lines = log.lines();
    for line in &lines {
        assert!(LINES.contains(&line.as_str()), "interleaved line: {line:?}");
    }
    assert_eq!(lines.len(), accepted);
    assert_eq!(
        sink.dropped_writes() as usize,
        LINES.len() * ROUNDS - accepted
    );
}

#[test]
fn busy_lock_drops_the_write() {
    let slow = RecordingLog::default();
    let sink = Arc::new(OutputSink::new(
        StallingLog {
            stall: StdDuration::from_millis(300),
            inner: slow.clone(),
        },
        RecordingDisplay::default(),
        Duration::from_millis(100),
    ));

    let holder = {
        let sink = sink.clone();
        std::thread::spawn(move || block_on(sink.append_line("slow")))
    };
    std::thread::sleep(StdDuration::from_millis(50));

    // The holder keeps the lock for 300 ms; this waits only 100 ms.
    let accepted = block_on(sink.append_line("fast"));
    assert!(holder.join().unwrap());

    assert!(!accepted);
    assert_eq!(sink.dropped_writes(), 1);
    assert_eq!(slow.lines(), vec!["slow".to_string()]);
}

#[test]
fn display_updates_share_the_lock() {
    let display = RecordingDisplay::default();
    let sink = Arc::new(OutputSink::new(
        StallingLog {
            stall: StdDuration::from_millis(300),
            inner: RecordingLog::default(),
        },
        display.clone(),
        Duration::from_millis(100),
    ));

    let holder = {
        let sink = sink.clone();
        std::thread::spawn(move || block_on(sink.append_line("slow")))
    };
    std::thread::sleep(StdDuration::from_millis(50));

    assert!(!block_on(sink.show_status("Fuel Level", "Low Fuel!")));
    holder.join().unwrap();
    assert!(display.frames().is_empty());

    // Once free, updates go through again.
    assert!(block_on(sink.show_status("Fuel Level", "Low Fuel!")));
    assert_eq!(
        display.frames(),
        vec![("Fuel Level".to_string(), "Low Fuel!".to_string())]
    );
}

#[test]
fn uncontended_writes_are_never_dropped() {
    let log = RecordingLog::default();
    let sink = OutputSink::new(log.clone(), RecordingDisplay::default(), Duration::from_millis(100));

    for i in 0..50 {
        assert!(block_on(sink.append_line(&format!("line {i}"))));
    }
    assert_eq!(log.lines().len(), 50);
    assert_eq!(sink.dropped_writes(), 0);
}
