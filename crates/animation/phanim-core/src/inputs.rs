//! Driver commands.
//!
//! Frontends (window loop, tooling) translate key presses or UI actions into
//! these and hand them to `Engine::apply` between frames.

use serde::{Deserialize, Serialize};

use crate::value::Color;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlaybackCommand {
    Pause,
    Resume,
    TogglePause,
    /// Rewind the timeline and restore objects to their creation state.
    Reset,
    SetBackground { color: Color },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_deserialize_from_json() {
        let cmds: Vec<PlaybackCommand> =
            serde_json::from_str(r#"["TogglePause", {"SetBackground": {"color": {"r": 1, "g": 2, "b": 3, "a": 255}}}]"#)
                .unwrap();
        assert_eq!(
            cmds,
            vec![
                PlaybackCommand::TogglePause,
                PlaybackCommand::SetBackground {
                    color: Color::rgba(1, 2, 3, 255)
                }
            ]
        );
    }
}
