pub mod error;
pub mod publisher;

pub use error::PublishError;
pub use publisher::Publisher;
