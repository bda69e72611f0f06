mod curriculum;
mod time_format;

pub use curriculum::{Curriculum, CurriculumIndex, Lecture, Position, Section};
pub use time_format::{format_time, progress_ratio, DURATION_PLACEHOLDER};
