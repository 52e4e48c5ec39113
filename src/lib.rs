//! # fifoq: Bounded Thread-Safe FIFO Queue
//!
//! fifoq provides a fixed-capacity First-In-First-Out queue backed by a
//! contiguous circular buffer and guarded by a single reader-writer lock.
//!
//! ## Features
//!
//! - **Bounded**: capacity is fixed at construction, the buffer never grows
//! - **Non-blocking**: enqueueing into a full queue or dequeueing from an
//!   empty one fails immediately instead of waiting
//! - **Thread-safe**: mutations take the lock exclusively, queries share it
//! - **Generic**: any element type, moved out of its slot on dequeue so the
//!   queue never keeps a dequeued value alive
//! - **Handles**: cloneable producer/consumer handles for spreading a queue
//!   across threads or tasks
//!
//! ## Basic Usage
//!
//! ```rust
//! use fifoq::FifoQueue;
//!
//! let q = FifoQueue::new(3);
//!
//! assert!(q.enqueue(1));
//! assert!(q.enqueue(2));
//! assert_eq!(q.dequeue(), Some(1));
//!
//! // the ring wraps around
//! assert!(q.enqueue(3));
//! assert!(q.enqueue(4));
//! assert!(q.is_full());
//! assert!(!q.enqueue(5));
//!
//! assert_eq!(q.dequeue(), Some(2));
//! assert_eq!(q.dequeue(), Some(3));
//! assert_eq!(q.dequeue(), Some(4));
//! assert_eq!(q.dequeue(), None);
//! ```
//!
//! ## Capacity
//!
//! A capacity of 0 selects [`DEFAULT_CAPACITY`] (32). [`size`] and [`cap`]
//! both report that fixed capacity, never the occupancy; use [`len`] for the
//! number of queued elements.
//!
//! ```rust
//! use fifoq::{DEFAULT_CAPACITY, FifoQueue};
//!
//! let q = FifoQueue::<u8>::new(0);
//! assert_eq!(q.cap(), DEFAULT_CAPACITY);
//!
//! q.enqueue(7);
//! assert_eq!(q.size(), DEFAULT_CAPACITY);
//! assert_eq!(q.len(), 1);
//! ```
//!
//! The builder accepts a signed capacity and refuses negative values instead
//! of clamping them:
//!
//! ```rust
//! use fifoq::{QueueError, bounded::queue};
//!
//! let err = queue::<u32>().capacity(-1).build().unwrap_err();
//! assert_eq!(err, QueueError::NegativeCapacity { requested: -1 });
//! ```
//!
//! ## Producer and Consumer Handles
//!
//! ```rust
//! use fifoq::{
//!     bounded::queue,
//!     traits::{QueueConsumer, QueueProducer},
//! };
//! use std::thread;
//!
//! # fn main() -> Result<(), fifoq::QueueError> {
//! let (producer, consumer) = queue::<usize>().capacity(128).channels()?;
//!
//! let producer_handle = thread::spawn(move || {
//!     for i in 0..100 {
//!         assert!(producer.enqueue(i));
//!     }
//! });
//!
//! let consumer_handle = thread::spawn(move || {
//!     let mut sum = 0;
//!     let mut received = 0;
//!     while received < 100 {
//!         match consumer.dequeue() {
//!             Some(value) => {
//!                 sum += value;
//!                 received += 1;
//!             },
//!             None => thread::yield_now(),
//!         }
//!     }
//!     sum
//! });
//!
//! producer_handle.join().unwrap();
//! assert_eq!(consumer_handle.join().unwrap(), 4950);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Full and empty are routine outcomes: [`enqueue`] returns `bool` and
//! [`dequeue`] returns `Option`. The `try_*` forms report them as
//! [`QueueError`] values for callers that prefer `Result`:
//! - `QueueError::Full` - no free slot
//! - `QueueError::Empty` - no element to take
//! - `QueueError::Rejected` - a conditional dequeue declined the head
//! - `QueueError::NegativeCapacity` - invalid construction request
//!
//! [`size`]: FifoQueue::size
//! [`cap`]: FifoQueue::cap
//! [`len`]: FifoQueue::len
//! [`enqueue`]: FifoQueue::enqueue
//! [`dequeue`]: FifoQueue::dequeue
#![deny(
    missing_docs,
    unused_imports,
    unused_variables,
    dead_code,
    unreachable_code,
    unused_must_use
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::multiple_crate_versions
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Fixed-capacity FIFO queue over a lock-guarded circular buffer.
///
/// This module provides [`FifoQueue`] together with its builder, the
/// producer/consumer handles and the [`queue`] entry point.
///
/// [`queue`]: bounded::queue
pub mod bounded;

/// Common traits for queue producers, consumers, and factories.
///
/// [`QueueProducer`], [`QueueConsumer`] and [`QueueFactory`] give the
/// handle types a uniform interface.
///
/// [`QueueProducer`]: traits::QueueProducer
/// [`QueueConsumer`]: traits::QueueConsumer
/// [`QueueFactory`]: traits::QueueFactory
pub mod traits;

pub use bounded::{DEFAULT_CAPACITY, FifoQueue};

use thiserror::Error;

/// Errors that can occur during queue operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueueError {
    /// Every slot is occupied.
    ///
    /// Returned by `try_enqueue`. The queue never grows and never waits for
    /// space, so the caller decides whether to retry or shed the value.
    #[error("queue is full")]
    Full,

    /// There is no element to dequeue.
    #[error("queue is empty")]
    Empty,

    /// A conditional dequeue found a head element but the predicate declined
    /// it. The queue is unchanged.
    #[error("head element rejected by predicate")]
    Rejected,

    /// A negative capacity was requested.
    ///
    /// This is a construction contract violation; the request is refused
    /// rather than clamped. Pass 0 to get [`DEFAULT_CAPACITY`].
    #[error("negative capacity {requested}: pass 0 to use the default ({})", DEFAULT_CAPACITY)]
    NegativeCapacity {
        /// The capacity that was asked for.
        requested: isize,
    },
}
