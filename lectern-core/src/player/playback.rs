//! Transport state mirrored from the media element

use lectern_common::{format_time, progress_ratio, DURATION_PLACEHOLDER};
use tracing::warn;

/// Volume restored by unmute when nothing else is configured
pub const DEFAULT_UNMUTE_VOLUME: f32 = 0.8;

/// What `toggle_mute` restores when the player is silent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnmuteVolume {
    /// Always restore this level
    Fixed(f32),
    /// Restore the last non-zero volume, falling back to the default
    Remembered,
}

impl Default for UnmuteVolume {
    fn default() -> Self {
        UnmuteVolume::Fixed(DEFAULT_UNMUTE_VOLUME)
    }
}

/// Result of a seek request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekOutcome {
    /// Position moved to the contained (clamped) time
    Seeked(f64),
    /// Duration is not known yet, nothing changed
    Unready,
}

/// Play/pause and volume axes plus the mirrored media clock.
///
/// Both axes are independent of the curriculum position. `elapsed_seconds`
/// and `duration_seconds` belong to the media element; `is_playing` and
/// `volume` belong to the user and are pushed down to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    is_playing: bool,
    volume: f32,
    elapsed_seconds: f64,
    /// None until metadata for the current source has loaded
    duration_seconds: Option<f64>,
    is_fullscreen: bool,
    last_audible_volume: Option<f32>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        let volume = if volume.is_nan() {
            1.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        Self {
            is_playing: false,
            volume,
            elapsed_seconds: 0.0,
            duration_seconds: None,
            is_fullscreen: false,
            last_audible_volume: (volume > 0.0).then_some(volume),
        }
    }

    /// Returns true if the state changed.
    pub fn play(&mut self) -> bool {
        !std::mem::replace(&mut self.is_playing, true)
    }

    /// Returns true if the state changed.
    pub fn pause(&mut self) -> bool {
        std::mem::replace(&mut self.is_playing, false)
    }

    /// Move the play position, clamped to `[0, duration]`.
    ///
    /// Ignored until metadata has loaded.
    pub fn seek(&mut self, target_seconds: f64) -> SeekOutcome {
        let Some(duration) = self.duration_seconds else {
            return SeekOutcome::Unready;
        };
        if target_seconds.is_nan() {
            return SeekOutcome::Unready;
        }
        let clamped = target_seconds.clamp(0.0, duration);
        self.elapsed_seconds = clamped;
        SeekOutcome::Seeked(clamped)
    }

    /// Set the volume, clamped to `[0, 1]`. Returns the applied volume, or
    /// None if the input was not a number.
    pub fn set_volume(&mut self, volume: f32) -> Option<f32> {
        if volume.is_nan() {
            return None;
        }
        self.volume = volume.clamp(0.0, 1.0);
        if self.volume > 0.0 {
            self.last_audible_volume = Some(self.volume);
        }
        Some(self.volume)
    }

    /// Silence the player, or restore an audible level if already silent.
    /// Returns the new volume.
    pub fn toggle_mute(&mut self, policy: UnmuteVolume) -> f32 {
        if self.volume > 0.0 {
            self.volume = 0.0;
        } else {
            self.volume = match policy {
                UnmuteVolume::Fixed(level) => level.clamp(0.0, 1.0),
                UnmuteVolume::Remembered => {
                    self.last_audible_volume.unwrap_or(DEFAULT_UNMUTE_VOLUME)
                }
            };
        }
        self.volume
    }

    /// Mirror the media clock. Returns false if the tick was not a number.
    pub fn on_time_update(&mut self, elapsed_seconds: f64) -> bool {
        if elapsed_seconds.is_nan() {
            return false;
        }
        let upper = self.duration_seconds.unwrap_or(f64::INFINITY);
        self.elapsed_seconds = elapsed_seconds.clamp(0.0, upper);
        true
    }

    /// Record the duration of the freshly loaded source. Returns false if the
    /// reported value was unusable.
    pub fn on_metadata_loaded(&mut self, duration_seconds: f64) -> bool {
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            warn!("Ignoring unusable media duration: {}", duration_seconds);
            return false;
        }
        self.duration_seconds = Some(duration_seconds);
        self.elapsed_seconds = self.elapsed_seconds.min(duration_seconds);
        true
    }

    /// Mirror the platform's fullscreen-change event. Returns true if the
    /// state changed.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) -> bool {
        std::mem::replace(&mut self.is_fullscreen, is_fullscreen) != is_fullscreen
    }

    /// Forget the clock of the previous source.
    pub fn reset_for_new_source(&mut self) {
        self.elapsed_seconds = 0.0;
        self.duration_seconds = None;
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn progress_ratio(&self) -> f64 {
        progress_ratio(self.elapsed_seconds, self.duration_seconds.unwrap_or(0.0))
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.elapsed_seconds)
    }

    pub fn duration_label(&self) -> String {
        match self.duration_seconds {
            Some(duration) => format_time(duration),
            None => DURATION_PLACEHOLDER.to_string(),
        }
    }
}
