//! Parsing of the line-oriented command language read from stdin

use thiserror::Error;

/// One learner intent or simulated media event
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Next,
    Prev,
    Select { section: usize, lecture: usize },
    ToggleSection(usize),
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
    Mute,
    Fullscreen,
    /// Platform reported a fullscreen transition
    FullscreenChange(bool),
    TimeUpdate(f64),
    MetadataLoaded(f64),
    Ended,
    /// Pointer moved over the player
    Activity,
    PointerLeave,
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum IntentError {
    #[error("Unknown command {0:?} (try \"help\")")]
    Unknown(String),
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("{command}: invalid {argument} {value:?}")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
}

pub const HELP: &str = "\
commands:
  next | prev              move through the course
  select S L               jump to lecture L of section S (0-based)
  toggle S                 expand or collapse section S in the sidebar
  play | pause
  seek SECS                jump within the current lecture
  volume V                 set volume (0.0 - 1.0)
  mute                     toggle mute
  fullscreen               request or exit fullscreen
media events:
  fs-change on|off         platform entered or left fullscreen
  time SECS                playback clock tick
  meta SECS                metadata loaded with the given duration
  ended                    current lecture finished
  move | leave             pointer activity over the player
other:
  show | help | quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Intent>, IntentError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let intent = match command.to_ascii_lowercase().as_str() {
        "next" | "n" => Intent::Next,
        "prev" | "p" => Intent::Prev,
        "select" => Intent::Select {
            section: arg(&mut words, "select", "section")?,
            lecture: arg(&mut words, "select", "lecture")?,
        },
        "toggle" => Intent::ToggleSection(arg(&mut words, "toggle", "section")?),
        "play" => Intent::Play,
        "pause" => Intent::Pause,
        "seek" => Intent::Seek(arg(&mut words, "seek", "seconds")?),
        "volume" | "vol" => Intent::Volume(arg(&mut words, "volume", "level")?),
        "mute" => Intent::Mute,
        "fullscreen" | "fs" => Intent::Fullscreen,
        "fs-change" => {
            let raw = words.next().ok_or(IntentError::MissingArgument {
                command: "fs-change",
                argument: "on|off",
            })?;
            match raw.to_ascii_lowercase().as_str() {
                "on" => Intent::FullscreenChange(true),
                "off" => Intent::FullscreenChange(false),
                _ => {
                    return Err(IntentError::InvalidArgument {
                        command: "fs-change",
                        argument: "on|off",
                        value: raw.to_string(),
                    })
                }
            }
        }
        "time" => Intent::TimeUpdate(arg(&mut words, "time", "seconds")?),
        "meta" => Intent::MetadataLoaded(arg(&mut words, "meta", "seconds")?),
        "ended" => Intent::Ended,
        "move" => Intent::Activity,
        "leave" => Intent::PointerLeave,
        "show" => Intent::Show,
        "help" | "?" => Intent::Help,
        "quit" | "exit" | "q" => Intent::Quit,
        _ => return Err(IntentError::Unknown(command.to_string())),
    };
    Ok(Some(intent))
}

fn arg<'a, T: std::str::FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, IntentError> {
    let raw = words.next().ok_or(IntentError::MissingArgument { command, argument })?;
    raw.parse().map_err(|_| IntentError::InvalidArgument {
        command,
        argument,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("next"), Ok(Some(Intent::Next)));
        assert_eq!(parse("  PREV "), Ok(Some(Intent::Prev)));
        assert_eq!(parse("move"), Ok(Some(Intent::Activity)));
        assert_eq!(parse("q"), Ok(Some(Intent::Quit)));
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            parse("select 1 3"),
            Ok(Some(Intent::Select {
                section: 1,
                lecture: 3
            }))
        );
        assert_eq!(parse("toggle 2"), Ok(Some(Intent::ToggleSection(2))));
        assert_eq!(parse("seek 42.5"), Ok(Some(Intent::Seek(42.5))));
        assert_eq!(parse("volume 0.3"), Ok(Some(Intent::Volume(0.3))));
        assert_eq!(parse("fs-change off"), Ok(Some(Intent::FullscreenChange(false))));
        assert_eq!(parse("meta 120"), Ok(Some(Intent::MetadataLoaded(120.0))));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("# walk the course"), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("rewind"), Err(IntentError::Unknown("rewind".to_string())));
        assert_eq!(
            parse("select 1"),
            Err(IntentError::MissingArgument {
                command: "select",
                argument: "lecture"
            })
        );
        assert_eq!(
            parse("select -1 0"),
            Err(IntentError::InvalidArgument {
                command: "select",
                argument: "section",
                value: "-1".to_string()
            })
        );
        assert!(matches!(
            parse("fs-change maybe"),
            Err(IntentError::InvalidArgument { .. })
        ));
    }
}
