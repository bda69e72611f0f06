//! Player error types
use lectern_common::Position;
use thiserror::Error;
/// Errors surfaced by player operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// Explicit selection named a lecture that does not exist
    #[error("Lecture {lecture} of section {section} does not exist")]
    LectureOutOfRange { section: usize, lecture: usize },
    /// Command loop has exited (shutdown or every handle dropped)
    #[error("Lesson player has stopped")]
    ServiceStopped,
}
impl PlayerError {
    pub fn out_of_range(pos: Position) -> Self {
        Self::LectureOutOfRange {
            section: pos.section_index,
            lecture: pos.lecture_index,
        }
    }
}
/// Refusals reported by the platform media element
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// Platform refused to start playback (e.g. autoplay policy)
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),
    /// Platform refused to enter or leave fullscreen
    #[error("Fullscreen denied: {0}")]
    FullscreenDenied(String),
}
impl MediaError {
    pub fn rejected(reason: impl std::fmt::Display) -> Self {
        Self::PlaybackRejected(reason.to_string())
    }
    pub fn fullscreen(reason: impl std::fmt::Display) -> Self {
        Self::FullscreenDenied(reason.to_string())
    }
}
