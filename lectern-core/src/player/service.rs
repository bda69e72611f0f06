//! Lesson player command loop
//!
//! One task owns the navigation controller, the controls overlay and the
//! media element, and applies commands strictly in arrival order. User intents
//! and media-element callbacks both arrive as commands; the only other input is
//! the controls timer reporting that its quiet period elapsed.

use lectern_common::{Curriculum, CurriculumIndex, Position};
use tokio::sync::{mpsc as tokio_mpsc, oneshot};
use tracing::{debug, info, warn};

use super::progress::PlayerProgressHandle;
use super::{
    ControlsVisibility, HideToken, MediaElement, NavigationController, NextLecture,
    PlaybackState, PlayerError, PlayerProgress, PlayerSnapshot, PreviousLecture, SeekOutcome,
};
use crate::config::PlayerConfig;

enum PlayerCommand {
    GoNext,
    GoPrev,
    SelectLecture {
        position: Position,
        reply: oneshot::Sender<Result<Position, PlayerError>>,
    },
    ToggleExpandedSection(usize),
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    ToggleMute,
    ToggleFullscreen,
    /// Media clock tick
    TimeUpdate(f64),
    MetadataLoaded(f64),
    FullscreenChanged(bool),
    Ended,
    Activity,
    PointerLeave,
    Snapshot(oneshot::Sender<PlayerSnapshot>),
    Shutdown,
}

/// Handle to the lesson player for sending intents and media events
#[derive(Clone)]
pub struct LessonPlayerHandle {
    command_tx: tokio_mpsc::UnboundedSender<PlayerCommand>,
    progress_handle: PlayerProgressHandle,
}

impl LessonPlayerHandle {
    pub fn go_next(&self) {
        let _ = self.command_tx.send(PlayerCommand::GoNext);
    }
    pub fn go_prev(&self) {
        let _ = self.command_tx.send(PlayerCommand::GoPrev);
    }
    /// Jump to a lecture. Fails without changing anything if the lecture
    /// does not exist.
    pub async fn select_lecture(
        &self,
        section_index: usize,
        lecture_index: usize,
    ) -> Result<Position, PlayerError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(PlayerCommand::SelectLecture {
                position: Position::new(section_index, lecture_index),
                reply,
            })
            .map_err(|_| PlayerError::ServiceStopped)?;
        rx.await.map_err(|_| PlayerError::ServiceStopped)?
    }
    pub fn toggle_expanded_section(&self, section_index: usize) {
        let _ = self
            .command_tx
            .send(PlayerCommand::ToggleExpandedSection(section_index));
    }
    pub fn play(&self) {
        let _ = self.command_tx.send(PlayerCommand::Play);
    }
    pub fn pause(&self) {
        let _ = self.command_tx.send(PlayerCommand::Pause);
    }
    pub fn seek(&self, target_seconds: f64) {
        let _ = self.command_tx.send(PlayerCommand::Seek(target_seconds));
    }
    pub fn set_volume(&self, volume: f32) {
        let _ = self.command_tx.send(PlayerCommand::SetVolume(volume));
    }
    pub fn toggle_mute(&self) {
        let _ = self.command_tx.send(PlayerCommand::ToggleMute);
    }
    pub fn toggle_fullscreen(&self) {
        let _ = self.command_tx.send(PlayerCommand::ToggleFullscreen);
    }
    pub fn on_time_update(&self, elapsed_seconds: f64) {
        let _ = self
            .command_tx
            .send(PlayerCommand::TimeUpdate(elapsed_seconds));
    }
    pub fn on_metadata_loaded(&self, duration_seconds: f64) {
        let _ = self
            .command_tx
            .send(PlayerCommand::MetadataLoaded(duration_seconds));
    }
    /// Platform reported entering or leaving fullscreen (including via its
    /// own controls, e.g. Esc)
    pub fn on_fullscreen_change(&self, is_fullscreen: bool) {
        let _ = self
            .command_tx
            .send(PlayerCommand::FullscreenChanged(is_fullscreen));
    }
    /// Media reached the end of the current source
    pub fn on_ended(&self) {
        let _ = self.command_tx.send(PlayerCommand::Ended);
    }
    pub fn on_activity(&self) {
        let _ = self.command_tx.send(PlayerCommand::Activity);
    }
    pub fn on_pointer_leave(&self) {
        let _ = self.command_tx.send(PlayerCommand::PointerLeave);
    }
    /// Current derived view state, after every previously sent command
    pub async fn snapshot(&self) -> Result<PlayerSnapshot, PlayerError> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(PlayerCommand::Snapshot(reply))
            .map_err(|_| PlayerError::ServiceStopped)?;
        rx.await.map_err(|_| PlayerError::ServiceStopped)
    }
    pub fn subscribe_progress(&self) -> tokio_mpsc::UnboundedReceiver<PlayerProgress> {
        self.progress_handle.subscribe_all()
    }
    /// Stop the command loop and cancel the controls timer
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
    }
    pub fn is_running(&self) -> bool {
        !self.command_tx.is_closed()
    }
}

/// Lesson player that owns all session state
pub struct LessonPlayerService {
    config: PlayerConfig,
    nav: NavigationController,
    controls: ControlsVisibility,
    media: Box<dyn MediaElement>,
    command_rx: tokio_mpsc::UnboundedReceiver<PlayerCommand>,
    hide_rx: tokio_mpsc::UnboundedReceiver<HideToken>,
    progress: PlayerProgressHandle,
}

impl LessonPlayerService {
    /// Load the initial lecture and spawn the command loop on `runtime_handle`.
    ///
    /// `initial` is typically built from route parameters and is clamped into
    /// the curriculum.
    pub fn start(
        curriculum: Curriculum,
        initial: Position,
        media: Box<dyn MediaElement>,
        config: PlayerConfig,
        runtime_handle: tokio::runtime::Handle,
    ) -> LessonPlayerHandle {
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        let progress = PlayerProgressHandle::new();
        let handle = LessonPlayerHandle {
            command_tx,
            progress_handle: progress.clone(),
        };

        let nav = NavigationController::new(
            CurriculumIndex::new(curriculum),
            initial,
            PlaybackState::new(config.initial_volume),
        );
        info!(
            "Lesson player starting: {} lectures, position {:?}",
            nav.index().lecture_count(),
            nav.position()
        );

        runtime_handle.spawn(async move {
            let (hide_tx, hide_rx) = tokio_mpsc::unbounded_channel();
            let mut service = LessonPlayerService {
                controls: ControlsVisibility::new(config.controls_quiet_period, hide_tx),
                config,
                nav,
                media,
                command_rx,
                hide_rx,
                progress,
            };
            service.media.set_volume(service.nav.playback().volume());
            service.load_current_source();
            service.run().await;
        });

        handle
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(token) = self.hide_rx.recv() => self.handle_hide_elapsed(token),
            }
        }
        self.controls.cancel();
        self.media.pause();
        info!("Lesson player stopped");
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::GoNext => self.go_next(),
            PlayerCommand::GoPrev => match self.nav.go_prev() {
                PreviousLecture::Moved(_) => self.on_position_changed(),
                PreviousLecture::AtBeginning => {
                    debug!("Already at the first lecture");
                    self.emit(PlayerProgress::AtBeginning);
                }
            },
            PlayerCommand::SelectLecture { position, reply } => {
                let result = self
                    .nav
                    .select_lecture(position.section_index, position.lecture_index);
                match result {
                    Ok(_) => self.on_position_changed(),
                    Err(_) => self.emit(PlayerProgress::InvalidSelection {
                        section_index: position.section_index,
                        lecture_index: position.lecture_index,
                    }),
                }
                let _ = reply.send(result);
            }
            PlayerCommand::ToggleExpandedSection(section_index) => {
                let before = self.nav.expanded_section();
                let expanded_section = self.nav.toggle_expanded_section(section_index);
                if expanded_section != before {
                    self.emit(PlayerProgress::ExpandedSectionChanged { expanded_section });
                }
            }
            PlayerCommand::Play => self.play(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Seek(target) => match self.nav.playback_mut().seek(target) {
                SeekOutcome::Seeked(position_seconds) => {
                    self.media.set_current_time(position_seconds);
                    self.emit(PlayerProgress::Seeked { position_seconds });
                }
                SeekOutcome::Unready => {
                    debug!("Seek to {} ignored, duration unknown", target);
                    self.emit(PlayerProgress::SeekIgnored {
                        requested_seconds: target,
                    });
                }
            },
            PlayerCommand::SetVolume(volume) => {
                if let Some(volume) = self.nav.playback_mut().set_volume(volume) {
                    self.media.set_volume(volume);
                    self.emit(PlayerProgress::VolumeChanged { volume });
                }
            }
            PlayerCommand::ToggleMute => {
                let volume = self
                    .nav
                    .playback_mut()
                    .toggle_mute(self.config.unmute_volume);
                self.media.set_volume(volume);
                self.emit(PlayerProgress::VolumeChanged { volume });
            }
            PlayerCommand::ToggleFullscreen => self.toggle_fullscreen(),
            PlayerCommand::TimeUpdate(elapsed) => {
                let playback = self.nav.playback_mut();
                if !playback.on_time_update(elapsed) {
                    return;
                }
                let progress = PlayerProgress::TimeUpdate {
                    elapsed_seconds: playback.elapsed_seconds(),
                    progress_ratio: playback.progress_ratio(),
                };
                self.emit(progress);
            }
            PlayerCommand::MetadataLoaded(duration_seconds) => {
                if self.nav.playback_mut().on_metadata_loaded(duration_seconds) {
                    self.emit(PlayerProgress::DurationChanged { duration_seconds });
                }
            }
            PlayerCommand::FullscreenChanged(is_fullscreen) => {
                if self.nav.playback_mut().on_fullscreen_change(is_fullscreen) {
                    self.emit(PlayerProgress::FullscreenChanged { is_fullscreen });
                }
            }
            PlayerCommand::Ended => self.on_ended(),
            PlayerCommand::Activity => {
                let is_playing = self.nav.playback().is_playing();
                if self.controls.on_activity(is_playing) {
                    self.emit_controls();
                }
            }
            PlayerCommand::PointerLeave => {
                let is_playing = self.nav.playback().is_playing();
                if self.controls.on_pointer_leave(is_playing) {
                    self.emit_controls();
                }
            }
            PlayerCommand::Snapshot(reply) => {
                let _ = reply.send(PlayerSnapshot::capture(
                    &self.nav,
                    self.controls.is_visible(),
                ));
            }
            PlayerCommand::Shutdown => {}
        }
    }

    fn handle_hide_elapsed(&mut self, token: HideToken) {
        let is_playing = self.nav.playback().is_playing();
        if self.controls.on_hide_elapsed(token, is_playing) {
            self.emit_controls();
        }
    }

    fn go_next(&mut self) {
        match self.nav.go_next() {
            NextLecture::Moved(_) => self.on_position_changed(),
            NextLecture::CourseCompleted => {
                debug!("No lecture after the current one");
                self.emit(PlayerProgress::CourseCompleted);
            }
        }
    }

    fn play(&mut self) {
        if self.nav.current_lecture().is_none() {
            debug!("Nothing to play");
            return;
        }
        if let Err(e) = self.media.play() {
            warn!("Media refused to play: {}", e);
            self.emit(PlayerProgress::PlaybackError {
                message: e.to_string(),
            });
            return;
        }
        if self.nav.playback_mut().play() {
            self.on_playing_changed();
        }
    }

    fn pause(&mut self) {
        self.media.pause();
        if self.nav.playback_mut().pause() {
            self.on_playing_changed();
        }
    }

    fn toggle_fullscreen(&mut self) {
        let result = if self.nav.playback().is_fullscreen() {
            self.media.exit_fullscreen()
        } else {
            self.media.request_fullscreen()
        };
        match result {
            // State flips only when the platform confirms via on_fullscreen_change
            Ok(()) => debug!("Fullscreen change requested"),
            Err(e) => {
                warn!("Fullscreen request failed: {}", e);
                self.emit(PlayerProgress::FullscreenDenied {
                    reason: e.to_string(),
                });
            }
        }
    }

    fn on_ended(&mut self) {
        if self.config.auto_advance && self.nav.has_next() {
            self.go_next();
            return;
        }
        if !self.nav.has_next() {
            self.emit(PlayerProgress::CourseCompleted);
        }
        if self.nav.playback_mut().pause() {
            self.on_playing_changed();
        }
    }

    /// Follow-up for every successful move: load the new source and tell
    /// subscribers. The controller has already reset the clock and synced the
    /// sidebar.
    fn on_position_changed(&mut self) {
        self.load_current_source();
        if let Some(position) = self.nav.position() {
            self.emit(PlayerProgress::PositionChanged {
                position,
                expanded_section: self.nav.expanded_section(),
            });
        }
    }

    fn load_current_source(&mut self) {
        let source = self
            .nav
            .current_lecture()
            .and_then(|lecture| lecture.source.clone());
        debug!("Loading source {:?}", source);
        self.media.set_source(source.as_deref());
        if self.nav.playback().is_playing() {
            if let Err(e) = self.media.play() {
                warn!("Media refused to continue playing: {}", e);
                self.emit(PlayerProgress::PlaybackError {
                    message: e.to_string(),
                });
                if self.nav.playback_mut().pause() {
                    self.on_playing_changed();
                }
            }
        }
    }

    fn on_playing_changed(&mut self) {
        let is_playing = self.nav.playback().is_playing();
        self.emit(PlayerProgress::StateChanged { is_playing });
        if self.controls.on_playback_changed(is_playing) {
            self.emit_controls();
        }
    }

    fn emit_controls(&self) {
        self.emit(PlayerProgress::ControlsVisibilityChanged {
            visible: self.controls.is_visible(),
        });
    }

    fn emit(&self, progress: PlayerProgress) {
        self.progress.broadcast(progress);
    }
}
