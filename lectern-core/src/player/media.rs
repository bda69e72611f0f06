use super::MediaError;

/// Imperative handle to the platform media element (a `<video>` tag or a
/// native player surface).
///
/// Every call is fire-and-forget. Fullscreen state is never assumed from a
/// successful request; the platform reports it back through
/// `LessonPlayerHandle::on_fullscreen_change`.
pub trait MediaElement: Send {
    /// Load a new source. Supersedes whatever was loading or playing.
    fn set_source(&mut self, src: Option<&str>);
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    fn request_fullscreen(&mut self) -> Result<(), MediaError>;
    fn exit_fullscreen(&mut self) -> Result<(), MediaError>;
}
