//! Text rendering of the player for a terminal

use lectern_common::Curriculum;
use lectern_core::player::{PlayerProgress, PlayerSnapshot};
use std::fmt::Write;

const PROGRESS_BAR_WIDTH: usize = 20;

/// Sidebar outline, transport line and the up-next footer
pub fn player_view(curriculum: &Curriculum, snapshot: &PlayerSnapshot) -> String {
    let mut out = String::new();
    for (section_index, section) in curriculum.sections.iter().enumerate() {
        let expanded = snapshot.expanded_section == Some(section_index);
        let _ = write!(
            out,
            "{} {}. {}",
            if expanded { "[-]" } else { "[+]" },
            section_index + 1,
            section.title
        );
        if !section.total_duration_label.is_empty() {
            let _ = write!(out, " ({})", section.total_duration_label);
        }
        out.push('\n');
        if !expanded {
            continue;
        }
        for (lecture_index, lecture) in section.lectures.iter().enumerate() {
            let current = snapshot.position.is_some_and(|pos| {
                pos.section_index == section_index && pos.lecture_index == lecture_index
            });
            let _ = write!(
                out,
                "    {} {}.{} {}",
                if current { ">" } else { " " },
                section_index + 1,
                lecture_index + 1,
                lecture.title
            );
            if !lecture.duration_label.is_empty() {
                let _ = write!(out, "  {}", lecture.duration_label);
            }
            if lecture.is_previewable {
                out.push_str("  [preview]");
            }
            out.push('\n');
        }
    }
    out.push('\n');
    out.push_str(&transport_line(snapshot));
    out.push('\n');
    out.push_str(&up_next_line(snapshot));
    out
}

/// Play state, clock, progress bar, volume and overlay flags
pub fn transport_line(snapshot: &PlayerSnapshot) -> String {
    let filled = ((snapshot.progress_ratio * PROGRESS_BAR_WIDTH as f64).round() as usize)
        .min(PROGRESS_BAR_WIDTH);
    let mut line = format!(
        "{} {} / {} [{}{}] vol {}",
        if snapshot.is_playing { "||" } else { "|>" },
        snapshot.elapsed_label,
        snapshot.duration_label,
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        if snapshot.is_muted {
            "muted".to_string()
        } else {
            format!("{:.0}%", snapshot.volume * 100.0)
        }
    );
    if snapshot.is_fullscreen {
        line.push_str(" [fullscreen]");
    }
    if !snapshot.controls_visible {
        line.push_str(" (controls hidden)");
    }
    line
}

/// Footer under the player: the next lecture, or completion once at the end
pub fn up_next_line(snapshot: &PlayerSnapshot) -> String {
    let position = match (snapshot.lecture_number, snapshot.current_lecture_title.as_deref()) {
        (Some(number), Some(title)) => {
            format!("Lecture {} of {}: {}", number, snapshot.lecture_count, title)
        }
        _ => "No lectures".to_string(),
    };
    match &snapshot.next_lecture_title {
        Some(next) => format!("{}  |  Up next: {}", position, next),
        None if snapshot.is_final_lecture() => format!("{}  |  Course Completed", position),
        None => position,
    }
}

/// One-line notice for events worth surfacing between snapshots
pub fn notice(progress: &PlayerProgress) -> Option<String> {
    match progress {
        PlayerProgress::CourseCompleted => Some("Course Completed".to_string()),
        PlayerProgress::AtBeginning => Some("Already at the first lecture".to_string()),
        PlayerProgress::InvalidSelection {
            section_index,
            lecture_index,
        } => Some(format!(
            "No lecture {} in section {}",
            lecture_index, section_index
        )),
        PlayerProgress::SeekIgnored { requested_seconds } => Some(format!(
            "Seek to {}s ignored until the duration is known",
            requested_seconds
        )),
        PlayerProgress::FullscreenDenied { reason } => Some(reason.clone()),
        PlayerProgress::PlaybackError { message } => Some(message.clone()),
        PlayerProgress::ControlsVisibilityChanged { visible: false } => {
            Some("Controls hidden".to_string())
        }
        _ => None,
    }
}
