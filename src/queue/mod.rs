//! Bounded FIFO queues shared between concurrent tasks.
//!
//! # Data Flow
//! ```text
//! producer(s)
//!     → QueueSender::send (suspends while full)
//!     → bounded buffer (capacity C)
//!     → QueueReceiver::recv (suspends while empty, None once closed + drained)
//!     → consumer group (clones of one receiver)
//! ```
//!
//! # Design Decisions
//! - Backed by Tokio's bounded mpsc channel; the receiver is shared behind an
//!   async mutex so a group of workers can drain one queue
//! - Closing consumes the sender, so sending after close does not compile
//! - The queue closes once every sender handle is closed or dropped
//! - Items are moved through the queue, never shared

pub mod bounded;

pub use bounded::{bounded, QueueError, QueueReceiver, QueueSender};
