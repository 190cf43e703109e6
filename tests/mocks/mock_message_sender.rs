use async_trait::async_trait;
use chrono::Utc;
use portfolio_contact::error::{SendError, SendResult};
use portfolio_contact::models::OutgoingEmail;
use portfolio_contact::sender::{MessageSender, SendOutcome};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// How the mock answers a send.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Deliver immediately.
    Succeed,
    /// Return a failure outcome.
    Decline,
    /// Return an error.
    Error,
    /// Never resolve.
    Hang,
    /// Panic inside `send`.
    Panic,
}

/// Mock message sender for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockMessageSender {
    behavior: Arc<Mutex<MockBehavior>>,
    gate: Option<Arc<Notify>>,
    received: Arc<Mutex<Vec<OutgoingEmail>>>,
    call_count: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockMessageSender {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            gate: None,
            received: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A sender that holds every send until the returned gate is notified.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let mut sender = Self::new(MockBehavior::Succeed);
        sender.gate = Some(gate.clone());
        (sender, gate)
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<OutgoingEmail> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for MockMessageSender {
    async fn send(&self, email: &OutgoingEmail) -> SendResult<SendOutcome> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(email.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let behavior = *self.behavior.lock().unwrap();
        match behavior {
            MockBehavior::Succeed => Ok(SendOutcome::delivered(Utc::now())),
            MockBehavior::Decline => Ok(SendOutcome::failed()),
            MockBehavior::Error => Err(SendError::Other("mock transport failure".to_string())),
            MockBehavior::Hang => std::future::pending().await,
            MockBehavior::Panic => panic!("mock sender panicked"),
        }
    }
}
