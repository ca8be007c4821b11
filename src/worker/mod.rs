//! Background execution of Data API calls.
//!
//! The dispatcher stays synchronous; network work happens here, on tasks
//! spawned by the runtime, and reports back through the event channel.
//!
//! # Architecture
//!
//! - `messages`: request/response protocol between dispatcher and worker
//! - `handler`: worker implementation on top of the loader

pub mod handler;
pub mod messages;

pub use handler::ApiWorker;
pub use messages::{WorkerMessage, WorkerResponse};
