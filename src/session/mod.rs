//! Conversation session: append-only history and the turn state machine.
//!
//! `Idle` accepts a submission; the user message is appended and the session
//! moves to `AwaitingResponse` until the bot reply for that turn is appended.
//! History lives only as long as the session value.

pub mod typing;

pub use typing::{ChatSession, TypingDelay};

use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::context::ContextProvider;
use crate::engine::templates::WELCOME;
use crate::engine::ResponseEngine;
use crate::models::{HealthContext, Message, MessageCategory};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyInput,

    #[error("A response is already in progress")]
    ResponseInFlight,

    #[error("Turn {0} is not the turn awaiting a response")]
    StaleTurn(u64),

    #[error("Session lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

/// A turn whose user message is appended but whose reply is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Id of the user message that opened the turn.
    pub turn_id: u64,
    pub text: String,
}

pub struct ConversationSession {
    id: Uuid,
    engine: Arc<ResponseEngine>,
    messages: Vec<Message>,
    next_id: u64,
    state: SessionState,
    pending: Option<u64>,
}

impl ConversationSession {
    /// New session seeded with the built-in welcome message.
    pub fn new(engine: Arc<ResponseEngine>) -> Self {
        Self::with_welcome(engine, WELCOME)
    }

    /// New session honoring the config's welcome override.
    pub fn from_config(engine: Arc<ResponseEngine>, config: &EngineConfig) -> Self {
        let welcome = config.welcome_message.as_deref().unwrap_or(WELCOME);
        Self::with_welcome(engine, welcome)
    }

    fn with_welcome(engine: Arc<ResponseEngine>, welcome: &str) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            engine,
            messages: Vec::new(),
            next_id: 1,
            state: SessionState::Idle,
            pending: None,
        };
        let id = session.allocate_id();
        session.messages.push(Message::bot(
            id,
            welcome.to_string(),
            MessageCategory::Suggestion,
            Local::now().naive_local(),
        ));
        tracing::info!(session_id = %session.id, "Conversation session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_responding(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    /// Read-only view in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Run a whole turn synchronously, reading `provider` once.
    pub fn submit(
        &mut self,
        text: &str,
        provider: &dyn ContextProvider,
    ) -> Result<&Message, SessionError> {
        let pending = self.begin_turn(text)?;
        let ctx = provider.health_context();
        self.complete_turn(pending, &ctx)
    }

    /// Append the user message and enter `AwaitingResponse`. Empty input and
    /// submissions during an in-flight turn are rejected without any change.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, SessionError> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if self.is_responding() {
            return Err(SessionError::ResponseInFlight);
        }

        let turn_id = self.allocate_id();
        self.messages
            .push(Message::user(turn_id, text, Local::now().naive_local()));
        self.state = SessionState::AwaitingResponse;
        self.pending = Some(turn_id);
        tracing::debug!(session_id = %self.id, turn_id, "Turn started");

        Ok(PendingTurn {
            turn_id,
            text: text.to_string(),
        })
    }

    /// Generate and append the reply for `pending`, then return to `Idle`.
    pub fn complete_turn(
        &mut self,
        pending: PendingTurn,
        ctx: &HealthContext,
    ) -> Result<&Message, SessionError> {
        if self.pending != Some(pending.turn_id) {
            return Err(SessionError::StaleTurn(pending.turn_id));
        }

        let reply = self.engine.respond(&pending.text, ctx);
        let id = self.allocate_id();
        self.messages.push(Message::bot(
            id,
            reply.text,
            reply.category,
            Local::now().naive_local(),
        ));
        self.state = SessionState::Idle;
        self.pending = None;
        tracing::info!(
            session_id = %self.id,
            turn_id = pending.turn_id,
            intent = reply.intent.as_str(),
            category = reply.category.as_str(),
            "Turn completed"
        );

        Ok(&self.messages[self.messages.len() - 1])
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecentVitals, Sender};

    fn session() -> ConversationSession {
        ConversationSession::new(Arc::new(ResponseEngine::default()))
    }

    #[test]
    fn starts_with_welcome() {
        let s = session();
        assert_eq!(s.messages().len(), 1);
        let welcome = &s.messages()[0];
        assert_eq!(welcome.id, 1);
        assert_eq!(welcome.sender, Sender::Bot);
        assert_eq!(welcome.category, Some(MessageCategory::Suggestion));
        assert!(welcome.text.contains("ChatMate"));
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn welcome_override_from_config() {
        let config = EngineConfig {
            welcome_message: Some("Welcome back!".into()),
            ..EngineConfig::immediate()
        };
        let s = ConversationSession::from_config(Arc::new(ResponseEngine::default()), &config);
        assert_eq!(s.messages()[0].text, "Welcome back!");
    }

    #[test]
    fn three_turns_give_six_ordered_messages() {
        let mut s = session();
        let ctx = HealthContext::default();
        for text in ["hello there", "I have a headache", "thanks"] {
            s.submit(text, &ctx).unwrap();
        }

        let turns = &s.messages()[1..];
        assert_eq!(turns.len(), 6);
        for pair in turns.chunks(2) {
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Bot);
            assert!(pair[1].category.is_some());
        }
        assert!(s.messages().windows(2).all(|w| w[0].id < w[1].id));
        assert!(s.messages().windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(turns[3].text.ends_with("on a scale of 1-10?"));
        assert_eq!(turns[4].text, "thanks");
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let mut s = session();
        let ctx = HealthContext::default();
        assert_eq!(s.submit("", &ctx).unwrap_err(), SessionError::EmptyInput);
        assert_eq!(s.submit("  \n\t", &ctx).unwrap_err(), SessionError::EmptyInput);
        assert_eq!(s.messages().len(), 1);
        assert!(!s.is_responding());
    }

    #[test]
    fn one_turn_in_flight_at_a_time() {
        let mut s = session();
        let pending = s.begin_turn("I feel dizzy").unwrap();
        assert!(s.is_responding());
        assert_eq!(
            s.begin_turn("hello?").unwrap_err(),
            SessionError::ResponseInFlight
        );
        assert_eq!(s.messages().len(), 2);

        let reply = s.complete_turn(pending, &HealthContext::default()).unwrap();
        assert_eq!(reply.id, 3);
        assert!(!s.is_responding());
    }

    #[test]
    fn stale_turn_is_rejected() {
        let mut s = session();
        let pending = s.begin_turn("I feel dizzy").unwrap();
        let stale = pending.clone();
        s.complete_turn(pending, &HealthContext::default()).unwrap();
        assert_eq!(
            s.complete_turn(stale, &HealthContext::default()).unwrap_err(),
            SessionError::StaleTurn(2)
        );
        assert_eq!(s.messages().len(), 3);
    }

    #[test]
    fn emergency_turn_is_a_warning() {
        let mut s = session();
        let reply = s
            .submit("I can't breathe", &HealthContext::default())
            .unwrap();
        assert_eq!(reply.category, Some(MessageCategory::Warning));
        assert!(reply.text.contains("emergency services"));
    }

    #[test]
    fn provider_snapshot_personalizes_reply() {
        let mut s = session();
        let ctx = HealthContext::default().with_vitals(RecentVitals {
            heart_rate: Some(72),
            ..Default::default()
        });
        let reply = s.submit("how is my heart rate", &ctx).unwrap();
        assert!(reply.text.contains("72 bpm"));
    }
}
