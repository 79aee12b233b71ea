//! Async session driver with an artificial "typing" delay.
//!
//! Classification stays synchronous in `ConversationSession`; this module only
//! adds pacing. The delayed reply task holds a `Weak` reference to the session
//! and is aborted when the `ChatSession` is closed or dropped, so a reply is
//! never appended to a torn-down conversation.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use super::{ConversationSession, PendingTurn, SessionError};
use crate::config::EngineConfig;
use crate::context::ContextProvider;
use crate::engine::ResponseEngine;
use crate::models::Message;

/// `base` plus a uniformly random extra in `[0, jitter)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl TypingDelay {
    pub const NONE: TypingDelay = TypingDelay {
        base: Duration::ZERO,
        jitter: Duration::ZERO,
    };

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            base: Duration::from_millis(config.typing_delay_ms),
            jitter: Duration::from_millis(config.typing_jitter_ms),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rng.gen_range(0..jitter_ms))
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Display-facing conversation handle. Must be used inside a tokio runtime.
pub struct ChatSession {
    session: Arc<Mutex<ConversationSession>>,
    provider: Arc<dyn ContextProvider>,
    delay: TypingDelay,
    in_flight: Option<JoinHandle<()>>,
}

impl ChatSession {
    pub fn new(
        engine: Arc<ResponseEngine>,
        provider: Arc<dyn ContextProvider>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(ConversationSession::from_config(engine, config))),
            provider,
            delay: TypingDelay::from_config(config),
            in_flight: None,
        }
    }

    /// Start a turn. The user message is appended immediately; the reply is
    /// appended after the typing delay.
    pub fn submit(&mut self, text: &str) -> Result<(), SessionError> {
        let pending = self.lock()?.begin_turn(text)?;
        let delay = self.delay.sample(&mut rand::thread_rng());
        let session = Arc::downgrade(&self.session);
        let provider = Arc::clone(&self.provider);

        self.in_flight = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver_reply(session, provider.as_ref(), pending);
        }));
        Ok(())
    }

    /// Wait until the in-flight reply (if any) has been appended.
    pub async fn wait_for_response(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Reply task failed");
                }
            }
        }
    }

    /// Snapshot of the history in insertion order.
    pub fn messages(&self) -> Result<Vec<Message>, SessionError> {
        Ok(self.lock()?.messages().to_vec())
    }

    pub fn is_responding(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_responding())
    }

    /// Tear the session down, discarding any pending reply.
    pub fn close(mut self) {
        self.abort_in_flight();
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::debug!("Discarding pending reply");
            }
            handle.abort();
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ConversationSession>, SessionError> {
        self.session.lock().map_err(|_| SessionError::LockPoisoned)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

fn deliver_reply(
    session: Weak<Mutex<ConversationSession>>,
    provider: &dyn ContextProvider,
    pending: PendingTurn,
) {
    let Some(session) = session.upgrade() else {
        tracing::debug!(turn_id = pending.turn_id, "Session gone, reply discarded");
        return;
    };
    let ctx = provider.health_context();
    let Ok(mut guard) = session.lock() else {
        tracing::error!(turn_id = pending.turn_id, "Session lock poisoned, reply discarded");
        return;
    };
    if let Err(e) = guard.complete_turn(pending, &ctx) {
        tracing::warn!(error = %e, "Reply not appended");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::context::HealthLog;
    use crate::models::{HealthContext, MessageCategory, Sender, VitalType};

    fn chat(config: &EngineConfig, provider: Arc<dyn ContextProvider>) -> ChatSession {
        ChatSession::new(Arc::new(ResponseEngine::default()), provider, config)
    }

    #[test]
    fn delay_without_jitter_is_fixed() {
        let delay = TypingDelay {
            base: Duration::from_millis(1500),
            jitter: Duration::ZERO,
        };
        let mut rng = StepRng::new(0, 1);
        assert_eq!(delay.sample(&mut rng), Duration::from_millis(1500));
        assert_eq!(TypingDelay::NONE.sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn sampled_delay_stays_in_range() {
        let delay = TypingDelay::default();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let d = delay.sample(&mut rng);
            assert!(d >= Duration::from_millis(1500));
            assert!(d < Duration::from_millis(2500));
        }
    }

    #[tokio::test]
    async fn reply_arrives_after_delay() {
        let mut chat = chat(&EngineConfig::immediate(), Arc::new(HealthContext::default()));
        chat.submit("I have a headache").unwrap();
        chat.wait_for_response().await;

        let messages = chat.messages().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[2].category, Some(MessageCategory::Normal));
        assert!(!chat.is_responding().unwrap());
    }

    #[tokio::test]
    async fn input_is_disabled_while_responding() {
        let config = EngineConfig {
            typing_delay_ms: 60_000,
            typing_jitter_ms: 0,
            ..EngineConfig::default()
        };
        let mut chat = chat(&config, Arc::new(HealthContext::default()));
        chat.submit("hello there").unwrap();
        assert!(chat.is_responding().unwrap());
        assert_eq!(chat.submit("anyone?"), Err(SessionError::ResponseInFlight));
        assert_eq!(chat.messages().unwrap().len(), 2);
    }

    /// Counts snapshot reads so tests can tell whether a reply was built.
    #[derive(Default)]
    struct CountingProvider {
        reads: AtomicUsize,
    }

    impl ContextProvider for CountingProvider {
        fn health_context(&self) -> HealthContext {
            self.reads.fetch_add(1, Ordering::SeqCst);
            HealthContext::default()
        }
    }

    #[tokio::test]
    async fn closing_discards_pending_reply() {
        let config = EngineConfig {
            typing_delay_ms: 20,
            typing_jitter_ms: 0,
            ..EngineConfig::default()
        };
        let provider = Arc::new(CountingProvider::default());
        let mut chat = chat(&config, provider.clone());
        chat.submit("I feel dizzy").unwrap();
        let session = Arc::downgrade(&chat.session);
        chat.close();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(session.upgrade().is_none());
        assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn orphaned_reply_is_dropped() {
        let engine = Arc::new(ResponseEngine::default());
        let session = Arc::new(Mutex::new(ConversationSession::new(engine)));
        let pending = session.lock().unwrap().begin_turn("hello there").unwrap();
        let weak = Arc::downgrade(&session);
        drop(session);

        let provider = CountingProvider::default();
        deliver_reply(weak, &provider, pending);
        assert_eq!(provider.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn context_is_read_when_reply_is_built() {
        let log = Arc::new(HealthLog::new());
        let mut chat = chat(&EngineConfig::immediate(), log.clone());

        chat.submit("how is my heart rate").unwrap();
        log.record_vital(VitalType::HeartRate, "64").unwrap();
        chat.wait_for_response().await;

        let messages = chat.messages().unwrap();
        assert!(messages[2].text.contains("64 bpm"));
    }

    #[tokio::test]
    async fn sequential_turns_keep_order() {
        let mut chat = chat(&EngineConfig::immediate(), Arc::new(HealthContext::default()));
        for text in ["hello there", "I feel dizzy", "thanks"] {
            chat.submit(text).unwrap();
            chat.wait_for_response().await;
        }
        let messages = chat.messages().unwrap();
        assert_eq!(messages.len(), 7);
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
    }
}
