//! TCP server speaking the Kafka wire protocol.

mod handler;

pub use handler::{handle_frame, run_server, run_server_on_listener, split_frame};
