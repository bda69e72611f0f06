use lectern_common::Position;

use super::NavigationController;

/// Everything the presentation layer needs to render one frame of the player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Option<Position>,
    /// Section open in the sidebar (may differ from the playing section)
    pub expanded_section: Option<usize>,
    pub is_playing: bool,
    pub volume: f32,
    pub is_muted: bool,
    pub elapsed_seconds: f64,
    pub duration_seconds: Option<f64>,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
    pub progress_ratio: f64,
    pub elapsed_label: String,
    /// Placeholder until metadata loads
    pub duration_label: String,
    pub current_lecture_title: Option<String>,
    /// None once the course is complete
    pub next_lecture_title: Option<String>,
    /// 1-based number of the current lecture across the whole curriculum
    pub lecture_number: Option<usize>,
    pub lecture_count: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PlayerSnapshot {
    pub fn capture(nav: &NavigationController, controls_visible: bool) -> Self {
        let playback = nav.playback();
        let index = nav.index();
        Self {
            position: nav.position(),
            expanded_section: nav.expanded_section(),
            is_playing: playback.is_playing(),
            volume: playback.volume(),
            is_muted: playback.is_muted(),
            elapsed_seconds: playback.elapsed_seconds(),
            duration_seconds: playback.duration_seconds(),
            is_fullscreen: playback.is_fullscreen(),
            controls_visible,
            progress_ratio: playback.progress_ratio(),
            elapsed_label: playback.elapsed_label(),
            duration_label: playback.duration_label(),
            current_lecture_title: nav.current_lecture().map(|l| l.title.clone()),
            next_lecture_title: nav.next_lecture().map(|l| l.title.clone()),
            lecture_number: nav
                .position()
                .and_then(|pos| index.absolute_index(pos))
                .map(|i| i + 1),
            lecture_count: index.lecture_count(),
            has_next: nav.has_next(),
            has_prev: nav.has_prev(),
        }
    }

    /// Whether the learner is on the final lecture
    pub fn is_final_lecture(&self) -> bool {
        self.position.is_some() && !self.has_next
    }
}
