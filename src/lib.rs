pub mod config;
pub mod context; // Health context snapshot providers
pub mod engine; // Emergency matcher, intent classifier, response templates
pub mod models;
pub mod session; // Conversation history + typing-paced driver

pub use context::{ContextProvider, HealthLog};
pub use engine::{EngineReply, Intent, ResponseEngine};
pub use models::{HealthContext, Message, MessageCategory};
pub use session::{ChatSession, ConversationSession, SessionError};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Honors `RUST_LOG`, falling back to
/// `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
