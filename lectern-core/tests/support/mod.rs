use lectern_common::{Curriculum, Lecture, Section};
use lectern_core::player::{MediaElement, MediaError};
use std::sync::{Arc, Mutex};

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Curriculum whose sections hold the given number of lectures. Every lecture
/// has a source of the form `/media/{section}-{lecture}.mp4`.
#[allow(dead_code)]
pub fn curriculum_with_counts(counts: &[usize]) -> Curriculum {
    let sections = counts
        .iter()
        .enumerate()
        .map(|(s, &n)| {
            let lectures = (0..n)
                .map(|l| Lecture {
                    source: Some(format!("/media/{}-{}.mp4", s, l)),
                    ..Lecture::new(format!("Lecture {}.{}", s + 1, l + 1))
                })
                .collect();
            Section::new(format!("Section {}", s + 1), lectures)
        })
        .collect();
    Curriculum::new(sections)
}

/// One imperative call made on the media element
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    SetSource(Option<String>),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetVolume(f32),
    RequestFullscreen,
    ExitFullscreen,
}

/// Media element fake that records every call and can be told to refuse
#[derive(Clone, Default)]
pub struct RecordingMedia {
    calls: Arc<Mutex<Vec<MediaCall>>>,
    deny_fullscreen: bool,
    reject_play: bool,
}

#[allow(dead_code)]
impl RecordingMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform refuses every fullscreen request
    pub fn with_fullscreen_denied(mut self) -> Self {
        self.deny_fullscreen = true;
        self
    }

    /// Platform refuses to start playback (autoplay policy)
    pub fn with_play_rejected(mut self) -> Self {
        self.reject_play = true;
        self
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sources(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::SetSource(src) => Some(src),
                _ => None,
            })
            .collect()
    }

    pub fn boxed(&self) -> Box<dyn MediaElement> {
        Box::new(self.clone())
    }

    fn record(&self, call: MediaCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaElement for RecordingMedia {
    fn set_source(&mut self, src: Option<&str>) {
        self.record(MediaCall::SetSource(src.map(str::to_string)));
    }

    fn play(&mut self) -> Result<(), MediaError> {
        self.record(MediaCall::Play);
        if self.reject_play {
            return Err(MediaError::rejected("autoplay blocked"));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.record(MediaCall::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.record(MediaCall::SetCurrentTime(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        self.record(MediaCall::SetVolume(volume));
    }

    fn request_fullscreen(&mut self) -> Result<(), MediaError> {
        self.record(MediaCall::RequestFullscreen);
        if self.deny_fullscreen {
            return Err(MediaError::fullscreen("not allowed by platform"));
        }
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), MediaError> {
        self.record(MediaCall::ExitFullscreen);
        Ok(())
    }
}
