pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod models;
pub mod pdf;
pub mod service;

pub use config::AppConfig;
pub use db::create_pool;
pub use llm::OpenAiClient;
pub use service::CategorizerService;
