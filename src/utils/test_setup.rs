use std::sync::{Mutex, Once};

use crate::services::messenger::Messenger;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Broadcast(String),
    Direct(String, String),
}

/// Messenger that keeps everything it was asked to send.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.lock().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn drain(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn broadcasts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Broadcast(text) => Some(text.clone()),
                Sent::Direct(..) => None,
            })
            .collect()
    }

    pub fn directs_to(&self, identity: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|s| match s {
                Sent::Direct(to, text) if to == identity => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Sent>> {
        match self.sent.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Messenger for RecordingMessenger {
    fn broadcast(&self, text: &str) {
        self.lock().push(Sent::Broadcast(text.to_string()));
    }

    fn direct(&self, identity: &str, text: &str) {
        self.lock()
            .push(Sent::Direct(identity.to_string(), text.to_string()));
    }
}
