//! Curriculum position and everything that must follow it

use lectern_common::{CurriculumIndex, Lecture, Position};
use tracing::{info, warn};

use super::{PlaybackState, PlayerError};

/// What happened on "next lecture"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLecture {
    /// Moved to the contained position
    Moved(Position),
    /// Already at the final lecture (or nothing to play), nothing changed
    CourseCompleted,
}

/// What happened on "previous lecture"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousLecture {
    /// Moved to the contained position
    Moved(Position),
    /// Already at the first lecture (or nothing to play), nothing changed
    AtBeginning,
}

/// Owns the current position, the sidebar's expanded section, and the
/// playback state that has to be reset whenever the position moves.
///
/// All moves go through a single transition so the sidebar and the media
/// clock can never disagree with the position. Expanding or collapsing a
/// section in the sidebar never moves the position.
#[derive(Debug, Clone)]
pub struct NavigationController {
    index: CurriculumIndex,
    /// None only when the curriculum has no lectures
    position: Option<Position>,
    expanded_section: Option<usize>,
    playback: PlaybackState,
}

impl NavigationController {
    /// Start a session at `requested`, clamped into the curriculum.
    pub fn new(index: CurriculumIndex, requested: Position, playback: PlaybackState) -> Self {
        let position = index.clamp(requested);
        match position {
            Some(pos) if pos != requested => {
                warn!(
                    "Initial position {:?} is outside the curriculum, using {:?}",
                    requested, pos
                );
            }
            Some(_) => {}
            None => warn!("Curriculum has no playable lectures"),
        }
        Self {
            expanded_section: position.map(|p| p.section_index),
            index,
            position,
            playback,
        }
    }

    pub fn index(&self) -> &CurriculumIndex {
        &self.index
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn expanded_section(&self) -> Option<usize> {
        self.expanded_section
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackState {
        &mut self.playback
    }

    pub fn current_lecture(&self) -> Option<&Lecture> {
        self.index.lecture(self.position?)
    }

    /// The lecture "Up next" would show; None at the end of the course.
    pub fn next_lecture(&self) -> Option<&Lecture> {
        let next = self.index.next_position(self.position?)?;
        self.index.lecture(next)
    }

    pub fn has_next(&self) -> bool {
        self.position
            .and_then(|pos| self.index.next_position(pos))
            .is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.position
            .and_then(|pos| self.index.prev_position(pos))
            .is_some()
    }

    pub fn go_next(&mut self) -> NextLecture {
        match self.position.and_then(|pos| self.index.next_position(pos)) {
            Some(next) => {
                self.apply_position(next);
                NextLecture::Moved(next)
            }
            None => NextLecture::CourseCompleted,
        }
    }

    pub fn go_prev(&mut self) -> PreviousLecture {
        match self.position.and_then(|pos| self.index.prev_position(pos)) {
            Some(prev) => {
                self.apply_position(prev);
                PreviousLecture::Moved(prev)
            }
            None => PreviousLecture::AtBeginning,
        }
    }

    /// Jump straight to a lecture picked in the sidebar.
    ///
    /// Indices that don't name an existing lecture are rejected without
    /// touching any state.
    pub fn select_lecture(
        &mut self,
        section_index: usize,
        lecture_index: usize,
    ) -> Result<Position, PlayerError> {
        let pos = Position::new(section_index, lecture_index);
        if !self.index.contains(pos) {
            warn!("Rejected selection of missing lecture {:?}", pos);
            return Err(PlayerError::out_of_range(pos));
        }
        self.apply_position(pos);
        Ok(pos)
    }

    /// Expand a section in the sidebar, or collapse it if it is already the
    /// expanded one. Returns the new expanded section.
    pub fn toggle_expanded_section(&mut self, section_index: usize) -> Option<usize> {
        if self.index.section(section_index).is_none() {
            warn!("Ignoring toggle of missing section {}", section_index);
            return self.expanded_section;
        }
        self.expanded_section = if self.expanded_section == Some(section_index) {
            None
        } else {
            Some(section_index)
        };
        self.expanded_section
    }

    fn apply_position(&mut self, pos: Position) {
        self.position = Some(pos);
        self.expanded_section = Some(pos.section_index);
        self.playback.reset_for_new_source();
        if let Some(lecture) = self.index.lecture(pos) {
            info!(
                "Lecture {}.{}: {}",
                pos.section_index + 1,
                pos.lecture_index + 1,
                lecture.title
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_common::{Curriculum, Section};

    fn controller_with_counts(counts: &[usize], start: Position) -> NavigationController {
        let sections = counts
            .iter()
            .enumerate()
            .map(|(s, &n)| {
                let lectures = (0..n)
                    .map(|l| Lecture::new(format!("Lecture {}.{}", s + 1, l + 1)))
                    .collect();
                Section::new(format!("Section {}", s + 1), lectures)
            })
            .collect();
        let index = CurriculumIndex::new(Curriculum::new(sections));
        NavigationController::new(index, start, PlaybackState::default())
    }

    #[test]
    fn test_ten_steps_through_three_four_three() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(0, 0));
        let expected = [
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 0),
            (2, 1),
            (2, 2),
        ];
        for (s, l) in expected {
            assert_eq!(nav.go_next(), NextLecture::Moved(Position::new(s, l)));
            assert_eq!(nav.expanded_section(), Some(s));
        }
        // Tenth call is already past the final lecture
        assert_eq!(nav.go_next(), NextLecture::CourseCompleted);
        assert_eq!(nav.go_next(), NextLecture::CourseCompleted);
        assert_eq!(nav.position(), Some(Position::new(2, 2)));
        assert!(!nav.has_next());
        assert!(nav.next_lecture().is_none());
    }

    #[test]
    fn test_go_prev_at_beginning_is_noop() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(0, 0));
        nav.toggle_expanded_section(2);
        assert_eq!(nav.go_prev(), PreviousLecture::AtBeginning);
        assert_eq!(nav.position(), Some(Position::new(0, 0)));
        assert_eq!(nav.expanded_section(), Some(2));
    }

    #[test]
    fn test_go_prev_crosses_section() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(1, 0));
        assert_eq!(
            nav.go_prev(),
            PreviousLecture::Moved(Position::new(0, 2))
        );
        assert_eq!(nav.expanded_section(), Some(0));
    }

    #[test]
    fn test_navigation_resets_media_clock() {
        let mut nav = controller_with_counts(&[2, 2], Position::new(0, 0));
        nav.playback_mut().play();
        nav.playback_mut().on_metadata_loaded(90.0);
        nav.playback_mut().on_time_update(42.0);

        nav.go_next();
        assert_eq!(nav.playback().elapsed_seconds(), 0.0);
        assert_eq!(nav.playback().duration_seconds(), None);
        assert!(nav.playback().is_playing());
    }

    #[test]
    fn test_select_lecture_syncs_sidebar() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(0, 0));
        nav.toggle_expanded_section(0);
        assert_eq!(nav.expanded_section(), None);
        assert_eq!(nav.select_lecture(1, 3), Ok(Position::new(1, 3)));
        assert_eq!(nav.expanded_section(), Some(1));
    }

    #[test]
    fn test_select_out_of_range_leaves_state_untouched() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(1, 1));
        nav.playback_mut().on_metadata_loaded(90.0);
        nav.playback_mut().on_time_update(10.0);
        nav.toggle_expanded_section(2);

        assert_eq!(
            nav.select_lecture(1, 4),
            Err(PlayerError::LectureOutOfRange {
                section: 1,
                lecture: 4
            })
        );
        assert!(nav.select_lecture(7, 0).is_err());
        assert_eq!(nav.position(), Some(Position::new(1, 1)));
        assert_eq!(nav.expanded_section(), Some(2));
        assert_eq!(nav.playback().elapsed_seconds(), 10.0);
    }

    #[test]
    fn test_toggle_expanded_never_moves_position() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(0, 1));
        assert_eq!(nav.toggle_expanded_section(2), Some(2));
        assert_eq!(nav.toggle_expanded_section(1), Some(1));
        assert_eq!(nav.toggle_expanded_section(1), None);
        assert_eq!(nav.toggle_expanded_section(9), None);
        assert_eq!(nav.position(), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_navigation_after_browsing_ahead_re_syncs_sidebar() {
        let mut nav = controller_with_counts(&[3, 4, 3], Position::new(0, 0));
        nav.toggle_expanded_section(2);
        nav.go_next();
        assert_eq!(nav.expanded_section(), Some(0));
    }

    #[test]
    fn test_initial_position_is_clamped() {
        let nav = controller_with_counts(&[3, 4, 3], Position::new(8, 8));
        assert_eq!(nav.position(), Some(Position::new(2, 2)));
        assert_eq!(nav.expanded_section(), Some(2));
    }

    #[test]
    fn test_empty_curriculum_is_terminal() {
        let mut nav = controller_with_counts(&[], Position::new(0, 0));
        assert_eq!(nav.position(), None);
        assert_eq!(nav.expanded_section(), None);
        assert!(nav.current_lecture().is_none());
        assert_eq!(nav.go_next(), NextLecture::CourseCompleted);
        assert_eq!(nav.go_prev(), PreviousLecture::AtBeginning);
        assert!(nav.select_lecture(0, 0).is_err());
    }

    #[test]
    fn test_empty_sections_are_stepped_over() {
        let mut nav = controller_with_counts(&[1, 0, 2], Position::new(0, 0));
        assert_eq!(nav.go_next(), NextLecture::Moved(Position::new(2, 0)));
        assert_eq!(nav.expanded_section(), Some(2));
        assert_eq!(nav.go_prev(), PreviousLecture::Moved(Position::new(0, 0)));
    }
}
