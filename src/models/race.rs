use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::session::SessionLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    Conventional,
    Sprint,
    SprintShootout,
    SprintQualifying,
    Testing,
}

impl EventFormat {
    /// Fixed slot layout used to pair a session label with its scheduled time.
    pub fn slot_order(&self) -> [SessionLabel; 5] {
        match self {
            EventFormat::SprintShootout => [
                SessionLabel::Practice1,
                SessionLabel::Qualifying,
                SessionLabel::SprintShootout,
                SessionLabel::Sprint,
                SessionLabel::Race,
            ],
            _ => [
                SessionLabel::Practice1,
                SessionLabel::Practice2,
                SessionLabel::Practice3,
                SessionLabel::Qualifying,
                SessionLabel::Race,
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSlot {
    pub label: Option<SessionLabel>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl SessionSlot {
    pub fn new(label: SessionLabel, scheduled_at: Option<DateTime<Utc>>) -> Self {
        Self {
            label: Some(label),
            scheduled_at,
        }
    }
}

/// One calendar entry of a season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub round: u32,
    pub format: EventFormat,
    pub slots: Vec<SessionSlot>,
}

impl Event {
    fn filled_slots(&self) -> impl Iterator<Item = (SessionLabel, DateTime<Utc>)> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| Some((slot.label?, slot.scheduled_at?)))
    }

    pub fn session_labels(&self) -> Vec<SessionLabel> {
        self.filled_slots().map(|(label, _)| label).collect()
    }

    pub fn session_times(&self) -> Vec<DateTime<Utc>> {
        self.filled_slots().map(|(_, time)| time).collect()
    }

    pub fn slot_for(&self, label: SessionLabel) -> Option<&SessionSlot> {
        self.slots.iter().find(|slot| slot.label == Some(label))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub name: String,
    pub round: u32,
    pub format: EventFormat,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            round: event.round,
            format: event.format,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub label: SessionLabel,
    pub scheduled_at: DateTime<Utc>,
}
