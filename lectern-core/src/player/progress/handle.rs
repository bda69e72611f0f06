use super::PlayerProgress;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tokio::sync::mpsc as tokio_mpsc;
use tracing::trace;
type SubscriptionId = u64;
/// Fan-out of player progress to any number of subscribers
#[derive(Clone, Default)]
pub struct PlayerProgressHandle {
    subscriptions: Arc<Mutex<HashMap<SubscriptionId, tokio_mpsc::UnboundedSender<PlayerProgress>>>>,
    next_id: Arc<AtomicU64>,
}
impl PlayerProgressHandle {
    pub fn new() -> Self {
        Self::default()
    }
    /// Subscribe to every progress update
    /// Subscription is automatically removed when receiver is dropped
    pub fn subscribe_all(&self) -> tokio_mpsc::UnboundedReceiver<PlayerProgress> {
        let (tx, rx) = tokio_mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.subscriptions.lock().unwrap().insert(id, tx);
        rx
    }
    /// Deliver an update to every live subscriber, pruning closed ones
    pub fn broadcast(&self, progress: PlayerProgress) {
        let mut subs = self.subscriptions.lock().unwrap();
        subs.retain(|id, tx| {
            let alive = tx.send(progress.clone()).is_ok();
            if !alive {
                trace!("Dropping closed progress subscription {}", id);
            }
            alive
        });
    }
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.lock().unwrap().len()
    }
}
