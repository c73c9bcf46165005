pub mod handlers;

pub use handlers::{extract, extract_base64, health_check, AppState};
