//! Timed player commands for scripted runs.
//!
//! A script is a JSON array of `{ "frame": n, "command": { ... } }` entries.
//! Frames count loop iterations, not sim ticks, so a script can unpause a
//! paused simulation.

use serde::{Deserialize, Serialize};

use rampart_core::commands::PlayerCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub frame: u64,
    pub command: PlayerCommand,
}

/// Commands ordered by frame, handed out as their frame comes due.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ScheduledCommand>", into = "Vec<ScheduledCommand>")]
pub struct CommandScript {
    entries: Vec<ScheduledCommand>,
    cursor: usize,
}

impl From<Vec<ScheduledCommand>> for CommandScript {
    fn from(mut entries: Vec<ScheduledCommand>) -> Self {
        // Stable, so same-frame commands keep file order.
        entries.sort_by_key(|entry| entry.frame);
        Self { entries, cursor: 0 }
    }
}

impl From<CommandScript> for Vec<ScheduledCommand> {
    fn from(script: CommandScript) -> Self {
        script.entries
    }
}

impl CommandScript {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take every command scheduled at or before `frame`.
    pub fn take_due(&mut self, frame: u64) -> Vec<PlayerCommand> {
        let start = self.cursor;
        while self
            .entries
            .get(self.cursor)
            .is_some_and(|entry| entry.frame <= frame)
        {
            self.cursor += 1;
        }
        self.entries[start..self.cursor]
            .iter()
            .map(|entry| entry.command.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::enums::TowerKind;

    #[test]
    fn parses_and_orders_by_frame() {
        let json = r#"[
            { "frame": 30, "command": { "type": "StartWave" } },
            { "frame": 0, "command": { "type": "PlaceTower", "x": 4, "y": 5, "kind": "Sniper" } },
            { "frame": 0, "command": { "type": "SetRunning", "running": true } }
        ]"#;
        let mut script: CommandScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.len(), 3);

        assert_eq!(
            script.take_due(0),
            vec![
                PlayerCommand::PlaceTower {
                    x: 4,
                    y: 5,
                    kind: Some(TowerKind::Sniper)
                },
                PlayerCommand::SetRunning { running: true },
            ]
        );
        assert!(script.take_due(29).is_empty());
        assert_eq!(script.take_due(100), vec![PlayerCommand::StartWave]);
        assert!(script.take_due(200).is_empty());
    }
}
