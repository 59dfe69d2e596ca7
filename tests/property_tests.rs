//! Property-based tests for swmr-buffer using quickcheck.
//!
//! These tests check read-after-write and value provenance for arbitrary
//! write sequences.

#![cfg(not(feature = "loom"))]

use quickcheck_macros::quickcheck;
use std::thread;
use swmr_buffer::{SwapBuffer, WaitStrategy};

fn strategy(selector: u8) -> WaitStrategy {
    match selector % 3 {
        0 => WaitStrategy::Spin,
        1 => WaitStrategy::Yield,
        _ => WaitStrategy::Park,
    }
}

#[quickcheck]
fn prop_read_after_write(initial: i64, writes: Vec<i64>) -> bool {
    let mut buffer = SwapBuffer::new(initial);
    let reader = buffer.reader();

    writes.iter().all(|&v| {
        buffer.write(v);
        reader.read() == v && buffer.read() == v
    })
}

#[quickcheck]
fn prop_last_write_wins(initial: String, writes: Vec<String>) -> bool {
    let mut buffer = SwapBuffer::new(initial.clone());

    for v in &writes {
        buffer.write_clone(v);
    }

    buffer.read() == writes.last().cloned().unwrap_or(initial)
}

#[quickcheck]
fn prop_writes_counted(writes: Vec<u16>) -> bool {
    let mut buffer = SwapBuffer::new(0u16);

    for &v in &writes {
        buffer.write(v);
    }

    buffer.writes() == writes.len() as u64
}

#[quickcheck]
fn prop_concurrent_reads_come_from_written_values(selector: u8, writes: Vec<u32>) -> bool {
    let mut buffer = SwapBuffer::builder()
        .wait_strategy(strategy(selector))
        .build(u32::MAX);

    let mut written = writes.clone();
    written.push(u32::MAX);

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let reader = buffer.reader();
            let written = written.clone();
            thread::spawn(move || (0..200).all(|_| written.contains(&reader.read())))
        })
        .collect();

    for &v in &writes {
        buffer.write(v);
    }

    handles.into_iter().all(|h| h.join().unwrap())
}

#[quickcheck]
fn prop_try_read_uncontended_always_succeeds(initial: Vec<u8>, writes: Vec<Vec<u8>>) -> bool {
    let mut buffer = SwapBuffer::new(initial.clone());
    let reader = buffer.reader();

    if reader.try_read() != Some(initial) {
        return false;
    }

    writes.into_iter().all(|v| {
        buffer.write(v.clone());
        reader.try_read() == Some(v)
    })
}
