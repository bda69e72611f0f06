use lectern_common::Curriculum;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CurriculumLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid curriculum JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid curriculum YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported curriculum format {0:?} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),
}

/// Read a curriculum, picking the parser from the file extension
pub fn load_curriculum(path: &Path) -> Result<Curriculum, CurriculumLoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let curriculum: Curriculum = match extension.as_str() {
        "json" => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        "yaml" | "yml" => serde_yaml::from_str(&std::fs::read_to_string(path)?)?,
        _ => return Err(CurriculumLoadError::UnsupportedFormat(extension)),
    };

    let lectures: usize = curriculum.sections.iter().map(|s| s.lectures.len()).sum();
    info!(
        "Loaded curriculum from {}: {} sections, {} lectures",
        path.display(),
        curriculum.sections.len(),
        lectures
    );
    if lectures == 0 {
        warn!("Curriculum has no lectures; nothing will play");
    }
    Ok(curriculum)
}
