pub mod app;
pub mod config;
pub mod error;
pub mod gemini;
pub mod handlers;
pub mod prompts;
pub mod state;

pub use app::router;
pub use config::ProxyConfig;
pub use state::ProxyState;
