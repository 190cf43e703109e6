pub mod mock_message_sender;

pub use mock_message_sender::{MockBehavior, MockMessageSender};
