use axum::extract::ws::Message;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{broadcast, Mutex};

use crate::models::config::Config;
use crate::models::game::GameSession;
use crate::models::role::Alignment;
use crate::services::ledger::{Highscore, LedgerError, ScoreLedger};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<String, GameSession>>>,
    pub channel: Arc<Mutex<HashMap<String, broadcast::Sender<Message>>>>,
    /// Winner of the last finished game, per channel.
    pub last_winners: Arc<Mutex<HashMap<String, Alignment>>>,
    pub ledger: Arc<dyn ScoreLedger>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Opens the highscore file named by `config`.
    pub fn new(config: Config) -> Result<Self, LedgerError> {
        let ledger = Highscore::open(&config.highscore_file)?;
        Ok(Self::with_ledger(config, Arc::new(ledger)))
    }

    pub fn with_ledger(config: Config, ledger: Arc<dyn ScoreLedger>) -> Self {
        AppState {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            channel: Arc::new(Mutex::new(HashMap::new())),
            last_winners: Arc::new(Mutex::new(HashMap::new())),
            ledger,
            config: Arc::new(config),
        }
    }

    pub async fn get_or_create_room_channel(&self, channel: &str) -> broadcast::Sender<Message> {
        let mut channels = self.channel.lock().await;
        if let Some(tx) = channels.get(channel) {
            tx.clone()
        } else {
            let (tx, _) = broadcast::channel(1000);
            channels.insert(channel.to_string(), tx.clone());
            tx
        }
    }
}
