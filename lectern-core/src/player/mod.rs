mod controls;
mod error;
mod media;
mod navigation;
mod playback;
pub mod progress;
pub mod service;
mod snapshot;
pub use controls::{ControlsVisibility, HideToken};
pub use error::{MediaError, PlayerError};
pub use media::MediaElement;
pub use navigation::{NavigationController, NextLecture, PreviousLecture};
pub use playback::{PlaybackState, SeekOutcome, UnmuteVolume, DEFAULT_UNMUTE_VOLUME};
pub use progress::PlayerProgress;
pub use service::{LessonPlayerHandle, LessonPlayerService};
pub use snapshot::PlayerSnapshot;
