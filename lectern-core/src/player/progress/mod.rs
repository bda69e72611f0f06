pub mod handle;
pub use handle::PlayerProgressHandle;
use lectern_common::Position;
/// State changes broadcast by the lesson player
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerProgress {
    /// A new lecture became current; the sidebar followed it
    PositionChanged {
        position: Position,
        expanded_section: Option<usize>,
    },
    StateChanged {
        is_playing: bool,
    },
    /// Media clock moved
    TimeUpdate {
        elapsed_seconds: f64,
        progress_ratio: f64,
    },
    /// Metadata for the current source loaded
    DurationChanged {
        duration_seconds: f64,
    },
    Seeked {
        position_seconds: f64,
    },
    /// Seek arrived before the duration was known
    SeekIgnored {
        requested_seconds: f64,
    },
    VolumeChanged {
        volume: f32,
    },
    /// Sidebar browsed independently of the position
    ExpandedSectionChanged {
        expanded_section: Option<usize>,
    },
    ControlsVisibilityChanged {
        visible: bool,
    },
    FullscreenChanged {
        is_fullscreen: bool,
    },
    /// Platform refused a fullscreen request; state unchanged
    FullscreenDenied {
        reason: String,
    },
    /// "Next" pressed (or media ended) on the final lecture
    CourseCompleted,
    /// "Previous" pressed on the first lecture
    AtBeginning,
    /// Selection named a lecture that does not exist
    InvalidSelection {
        section_index: usize,
        lecture_index: usize,
    },
    /// Media element refused to play
    PlaybackError {
        message: String,
    },
}
