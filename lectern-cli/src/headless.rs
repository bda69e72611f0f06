use lectern_core::player::{MediaElement, MediaError};
use tracing::{debug, info};

/// Media element with no output device. Logs what a real player would do.
pub struct HeadlessMedia {
    deny_fullscreen: bool,
}

impl HeadlessMedia {
    pub fn new(deny_fullscreen: bool) -> Self {
        Self { deny_fullscreen }
    }
}

impl MediaElement for HeadlessMedia {
    fn set_source(&mut self, src: Option<&str>) {
        match src {
            Some(src) => info!("Media source: {}", src),
            None => info!("Media source cleared"),
        }
    }

    fn play(&mut self) -> Result<(), MediaError> {
        debug!("Media play");
        Ok(())
    }

    fn pause(&mut self) {
        debug!("Media pause");
    }

    fn set_current_time(&mut self, seconds: f64) {
        debug!("Media seek to {:.1}s", seconds);
    }

    fn set_volume(&mut self, volume: f32) {
        debug!("Media volume {:.2}", volume);
    }

    fn request_fullscreen(&mut self) -> Result<(), MediaError> {
        if self.deny_fullscreen {
            return Err(MediaError::fullscreen("disabled with --deny-fullscreen"));
        }
        debug!("Media fullscreen requested");
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), MediaError> {
        debug!("Media fullscreen exit requested");
        Ok(())
    }
}
