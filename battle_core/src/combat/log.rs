//! Append-only combat log read by the presentation layer

use crate::unit::Side;
use bestiary_core::ActionCategory;
use serde::Serialize;
use std::fmt::Write;

/// What a log line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    Turn,
    Damage,
    Critical,
    Status,
    Heal,
    Control,
    Action,
    System,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatLogEntry {
    pub turn: u32,
    pub message: String,
    pub category: LogCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Side>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionCategory>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        turn: u32,
        category: LogCategory,
        actor: Option<Side>,
        action: Option<ActionCategory>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        tracing::debug!(turn, ?category, ?actor, "{}", message);
        self.entries.push(CombatLogEntry {
            turn,
            message,
            category,
            actor,
            action,
        });
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.last()
    }

    /// Entries recorded during one turn
    pub fn turn_entries(&self, turn: u32) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Render as markdown, one section per turn
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Combat Log\n");

        let mut current_turn = None;
        for entry in &self.entries {
            if current_turn != Some(entry.turn) {
                current_turn = Some(entry.turn);
                if entry.turn == 0 {
                    let _ = write!(md, "\n## Setup\n\n");
                } else {
                    let _ = write!(md, "\n## Turn {}\n\n", entry.turn);
                }
            }
            match entry.category {
                LogCategory::Turn => {}
                LogCategory::Outcome => {
                    let _ = writeln!(md, "**{}**", entry.message);
                }
                _ => {
                    let _ = writeln!(md, "- {}", entry.message);
                }
            }
        }
        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> CombatLog {
        let mut log = CombatLog::new();
        log.push(1, LogCategory::Turn, None, None, "--- Turn 1 ---");
        log.push(1, LogCategory::Damage, Some(Side::Player), None, "Hero hits Goblin for 12");
        log.push(
            2,
            LogCategory::Action,
            Some(Side::Enemy),
            Some(ActionCategory::Defend),
            "Goblin raises its guard",
        );
        log.push(2, LogCategory::Outcome, None, None, "Victory!");
        log
    }

    #[test]
    fn test_push_and_filter() {
        let log = setup();
        assert_eq!(log.len(), 4);
        assert_eq!(log.turn_entries(2).count(), 2);
        assert_eq!(log.last().unwrap().category, LogCategory::Outcome);
    }

    #[test]
    fn test_json_export() {
        let log = setup();
        let json = log.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[2]["action"], "defend");
        assert_eq!(value[2]["actor"], "enemy");
        assert!(value[0].get("actor").is_none());
    }

    #[test]
    fn test_markdown_export() {
        let md = setup().to_markdown();
        assert!(md.contains("## Turn 1"));
        assert!(md.contains("- Hero hits Goblin for 12"));
        assert!(md.contains("**Victory!**"));
        assert!(!md.contains("--- Turn 1 ---"));
    }
}
