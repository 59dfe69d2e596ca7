//! # SWMR Double Buffer
//!
//! A single-writer, multi-reader double buffer. One writer publishes new
//! snapshots of a value while any number of readers copy out the latest
//! published snapshot, with no locks on either side.
//!
//! ## Core Concepts
//!
//! - **Slot**: one of two fixed storage cells, each with its own reader count.
//! - **Current**: the atomic handle naming the slot readers treat as live.
//! - **Pending**: the other slot; the only one the writer mutates.
//! - **Publish**: the atomic swap that makes the pending slot current.
//!
//! A reader raises the count of the slot it believes is live, re-checks that
//! the slot is still live, and retries on a mismatch. The writer, after
//! publishing, waits for the slot it displaced to reach a count of zero, so it
//! never overwrites a value a reader is still copying.
//!
//! ## Typical Usage
//!
//! ```rust
//! use swmr_buffer::SwapBuffer;
//!
//! // 1. Create the buffer (this handle is the writer)
//! let mut buffer = SwapBuffer::new(42i32);
//!
//! // 2. Create a reader handle for this thread (or send it to another)
//! let reader = buffer.reader();
//! assert_eq!(reader.read(), 42);
//!
//! // 3. Writer publishes a new value
//! buffer.write(100);
//!
//! // 4. Readers observe it
//! assert_eq!(reader.read(), 100);
//! assert_eq!(reader.read_with(|v| v * 2), 200);
//! ```
//!
//! 单写多读双缓冲。一个写入者发布值的新快照，同时任意数量的读者复制出最新发布的快照，
//! 两端都不加锁。
//!
//! 读者增加其认为是活跃槽位的计数，重新检查该槽位是否仍然活跃，不一致时重试。
//! 写入者在发布之后等待被替换的槽位计数降为零，因此永远不会覆盖读者仍在复制的值。
mod buffer;
mod builder;
mod reader;
mod state;
mod sync;
mod wait;

pub use buffer::SwapBuffer;
pub use builder::SwapBufferBuilder;
pub use reader::Reader;
pub use wait::WaitStrategy;

#[cfg(all(test, not(feature = "loom")))]
mod tests;
