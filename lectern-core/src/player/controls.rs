//! Auto-hiding transport controls overlay
//!
//! Pointer activity shows the controls and (re)starts a quiet-period timer.
//! When the timer elapses it sends its [`HideToken`] back to the owner, which
//! feeds it to [`ControlsVisibility::on_hide_elapsed`]. Only the most recently
//! scheduled token may hide the controls, and a paused player never hides
//! them at all.

use std::time::Duration;

use tokio::sync::mpsc as tokio_mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Identifies one scheduled hide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideToken(u64);

struct PendingHide {
    token: HideToken,
    task: JoinHandle<()>,
}

pub struct ControlsVisibility {
    visible: bool,
    quiet_period: Duration,
    next_token: u64,
    /// At most one timer is ever pending
    pending_hide: Option<PendingHide>,
    elapsed_tx: tokio_mpsc::UnboundedSender<HideToken>,
}

impl ControlsVisibility {
    /// Controls start visible. Elapsed timers report on `elapsed_tx`.
    ///
    /// Scheduling spawns onto the current tokio runtime.
    pub fn new(quiet_period: Duration, elapsed_tx: tokio_mpsc::UnboundedSender<HideToken>) -> Self {
        Self {
            visible: true,
            quiet_period,
            next_token: 0,
            pending_hide: None,
            elapsed_tx,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide.is_some()
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Pointer moved over the player. Returns true if visibility changed.
    pub fn on_activity(&mut self, is_playing: bool) -> bool {
        let changed = self.set_visible(true);
        self.cancel();
        if is_playing {
            self.schedule_hide();
        }
        changed
    }

    /// Pointer left the player. Hides immediately while playing.
    pub fn on_pointer_leave(&mut self, is_playing: bool) -> bool {
        if !is_playing {
            return false;
        }
        self.cancel();
        self.set_visible(false)
    }

    /// A timer fired. Stale tokens are ignored.
    pub fn on_hide_elapsed(&mut self, token: HideToken, is_playing: bool) -> bool {
        match &self.pending_hide {
            Some(pending) if pending.token == token => {}
            _ => {
                trace!("Ignoring stale hide token {:?}", token);
                return false;
            }
        }
        self.pending_hide = None;
        if !is_playing {
            return false;
        }
        self.set_visible(false)
    }

    /// Playback toggled. Pausing pins the controls; resuming behaves like
    /// fresh activity so they fade out after the quiet period.
    pub fn on_playback_changed(&mut self, is_playing: bool) -> bool {
        if is_playing {
            self.on_activity(true)
        } else {
            self.cancel();
            self.set_visible(true)
        }
    }

    /// Drop any pending timer without changing visibility.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending_hide.take() {
            pending.task.abort();
        }
    }

    fn schedule_hide(&mut self) {
        self.next_token += 1;
        let token = HideToken(self.next_token);
        let quiet_period = self.quiet_period;
        let elapsed_tx = self.elapsed_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = elapsed_tx.send(token);
        });
        self.pending_hide = Some(PendingHide { token, task });
    }

    fn set_visible(&mut self, visible: bool) -> bool {
        std::mem::replace(&mut self.visible, visible) != visible
    }
}

impl Drop for ControlsVisibility {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(3000);

    fn controls() -> (ControlsVisibility, tokio_mpsc::UnboundedReceiver<HideToken>) {
        let (tx, rx) = tokio_mpsc::unbounded_channel();
        (ControlsVisibility::new(QUIET, tx), rx)
    }

    /// Drain every token that has fired so far into the controls.
    fn deliver(
        controls: &mut ControlsVisibility,
        rx: &mut tokio_mpsc::UnboundedReceiver<HideToken>,
        is_playing: bool,
    ) -> usize {
        let mut hides = 0;
        while let Ok(token) = rx.try_recv() {
            if controls.on_hide_elapsed(token, is_playing) {
                hides += 1;
            }
        }
        hides
    }

    #[tokio::test(start_paused = true)]
    async fn test_hides_after_quiet_period_while_playing() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);

        tokio::time::sleep(QUIET - Duration::from_millis(1)).await;
        assert_eq!(deliver(&mut controls, &mut rx, true), 0);
        assert!(controls.is_visible());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(deliver(&mut controls, &mut rx, true), 1);
        assert!(!controls.is_visible());
        assert!(!controls.has_pending_hide());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_activity_restarts_the_timer() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);
        tokio::time::sleep(Duration::from_millis(2000)).await;
        controls.on_activity(true);

        // First timer would have fired at 3000ms
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(deliver(&mut controls, &mut rx, true), 0);
        assert!(controls.is_visible());

        // Second timer fires 3000ms after the second call
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(deliver(&mut controls, &mut rx, true), 1);
        assert!(!controls.is_visible());

        tokio::time::sleep(QUIET * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_token_is_ignored() {
        let (mut controls, _rx) = controls();
        controls.on_activity(true);
        let stale = HideToken(controls.next_token);
        controls.on_activity(true);
        assert!(!controls.on_hide_elapsed(stale, true));
        assert!(controls.is_visible());
        assert!(controls.has_pending_hide());
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_player_never_hides() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(false);
        assert!(!controls.has_pending_hide());
        assert!(!controls.on_pointer_leave(false));

        tokio::time::sleep(QUIET * 2).await;
        deliver(&mut controls, &mut rx, false);
        assert!(controls.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_expiring_after_pause_does_not_hide() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);
        let token = HideToken(controls.next_token);
        // Fired while the player was paused by an external media event
        assert!(!controls.on_hide_elapsed(token, false));
        assert!(controls.is_visible());
        tokio::time::sleep(QUIET * 2).await;
        assert_eq!(deliver(&mut controls, &mut rx, false), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_leave_hides_immediately_while_playing() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);
        assert!(controls.on_pointer_leave(true));
        assert!(!controls.is_visible());
        assert!(!controls.has_pending_hide());

        tokio::time::sleep(QUIET * 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_pins_controls_visible() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);
        controls.on_pointer_leave(true);
        assert!(controls.on_playback_changed(false));
        assert!(controls.is_visible());

        assert!(!controls.on_playback_changed(true));
        assert!(controls.has_pending_hide());
        tokio::time::sleep(QUIET + Duration::from_millis(1)).await;
        assert_eq!(deliver(&mut controls, &mut rx, true), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (mut controls, mut rx) = controls();
        controls.on_activity(true);
        drop(controls);
        tokio::time::sleep(QUIET * 2).await;
        assert!(rx.try_recv().is_err());
    }
}
