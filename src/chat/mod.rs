mod log;
mod message;

pub use log::FileMessageLog;
pub use log::MessageLog;
pub use message::ChatMessage;
