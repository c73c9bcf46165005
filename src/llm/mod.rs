pub mod client;
pub mod extraction;
pub mod suggestion;

pub use client::OpenAiClient;
