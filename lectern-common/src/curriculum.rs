use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single playable lecture within a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub title: String,
    #[serde(default)]
    pub duration_label: String,
    /// Whether the lecture can be watched without enrolment
    #[serde(default)]
    pub is_previewable: bool,
    /// Media URL handed to the player when this lecture becomes current
    #[serde(default)]
    pub source: Option<String>,
}

impl Lecture {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration_label: String::new(),
            is_previewable: false,
            source: None,
        }
    }
}

/// An ordered group of lectures shown as one collapsible entry in the sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub total_duration_label: String,
    #[serde(default)]
    pub lectures: Vec<Lecture>,
}

impl Section {
    pub fn new(title: impl Into<String>, lectures: Vec<Lecture>) -> Self {
        Self {
            title: title.into(),
            total_duration_label: String::new(),
            lectures,
        }
    }
}

/// The full ordered catalog of sections for one lesson session.
///
/// Section and lecture order is significant: it defines what "next" and
/// "previous" mean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Curriculum {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }
}

/// The currently selected (section, lecture) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub section_index: usize,
    pub lecture_index: usize,
}

impl Position {
    pub const fn new(section_index: usize, lecture_index: usize) -> Self {
        Self {
            section_index,
            lecture_index,
        }
    }

    /// Build a position from raw route parameters.
    ///
    /// Absent or non-numeric parameters become `0`. The result is not
    /// bounds-checked; pass it through [`CurriculumIndex::clamp`] before use.
    pub fn from_route_params(section: Option<&str>, lecture: Option<&str>) -> Self {
        Self::new(parse_route_index(section), parse_route_index(lecture))
    }
}

fn parse_route_index(param: Option<&str>) -> usize {
    param
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(0)
}

/// Read-only queries over an immutable curriculum.
///
/// Sections without lectures are skipped by every navigation query, so a
/// returned position always names an existing lecture.
#[derive(Debug, Clone)]
pub struct CurriculumIndex {
    curriculum: Arc<Curriculum>,
}

impl CurriculumIndex {
    pub fn new(curriculum: impl Into<Arc<Curriculum>>) -> Self {
        Self {
            curriculum: curriculum.into(),
        }
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn sections(&self) -> &[Section] {
        &self.curriculum.sections
    }

    pub fn section(&self, section_index: usize) -> Option<&Section> {
        self.curriculum.sections.get(section_index)
    }

    pub fn lecture(&self, pos: Position) -> Option<&Lecture> {
        self.section(pos.section_index)?
            .lectures
            .get(pos.lecture_index)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.lecture(pos).is_some()
    }

    /// Total number of lectures across all sections.
    pub fn lecture_count(&self) -> usize {
        self.sections().iter().map(|s| s.lectures.len()).sum()
    }

    /// Whether the curriculum has no playable content at all.
    pub fn is_empty(&self) -> bool {
        self.lecture_count() == 0
    }

    pub fn first_position(&self) -> Option<Position> {
        self.first_lecture_from(0)
    }

    pub fn last_position(&self) -> Option<Position> {
        self.last_lecture_before(self.sections().len())
    }

    /// The lecture after `pos`, crossing into the next non-empty section when
    /// `pos` is the last lecture of its section. `None` at the end of the
    /// curriculum; there is no wraparound.
    pub fn next_position(&self, pos: Position) -> Option<Position> {
        let section = self.section(pos.section_index)?;
        if pos.lecture_index + 1 < section.lectures.len() {
            return Some(Position::new(pos.section_index, pos.lecture_index + 1));
        }
        self.first_lecture_from(pos.section_index + 1)
    }

    /// The lecture before `pos`, landing on the *last* lecture of the previous
    /// non-empty section when `pos` is first in its section. `None` at the
    /// start of the curriculum.
    pub fn prev_position(&self, pos: Position) -> Option<Position> {
        let section = self.section(pos.section_index)?;
        if pos.lecture_index > 0 && !section.lectures.is_empty() {
            let lecture_index = (pos.lecture_index - 1).min(section.lectures.len() - 1);
            return Some(Position::new(pos.section_index, lecture_index));
        }
        self.last_lecture_before(pos.section_index)
    }

    /// Pull an unvalidated position into range.
    ///
    /// The section index is clamped to the last section; if that section is
    /// empty the nearest non-empty section is used instead (searching forward
    /// first). The lecture index is clamped to the last lecture of the chosen
    /// section. Returns `None` only when the curriculum has no lectures.
    pub fn clamp(&self, requested: Position) -> Option<Position> {
        let sections = self.sections();
        let section_index = requested.section_index.min(sections.len().checked_sub(1)?);
        let lectures = &sections[section_index].lectures;
        if !lectures.is_empty() {
            let lecture_index = requested.lecture_index.min(lectures.len() - 1);
            return Some(Position::new(section_index, lecture_index));
        }
        self.first_lecture_from(section_index + 1)
            .or_else(|| self.last_lecture_before(section_index))
    }

    /// 0-based ordinal of `pos` across the whole curriculum.
    pub fn absolute_index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let before: usize = self.sections()[..pos.section_index]
            .iter()
            .map(|s| s.lectures.len())
            .sum();
        Some(before + pos.lecture_index)
    }

    fn first_lecture_from(&self, start: usize) -> Option<Position> {
        self.sections()
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, section)| !section.lectures.is_empty())
            .map(|(i, _)| Position::new(i, 0))
    }

    fn last_lecture_before(&self, end: usize) -> Option<Position> {
        let end = end.min(self.sections().len());
        self.sections()[..end]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, section)| !section.lectures.is_empty())
            .map(|(i, section)| Position::new(i, section.lectures.len() - 1))
    }
}
