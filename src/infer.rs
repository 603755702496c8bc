pub mod openai;

pub use openai::{ApiError, CompletionClient};
