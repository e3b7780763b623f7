use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionLabel {
    #[serde(rename = "Practice 1")]
    Practice1,
    #[serde(rename = "Practice 2")]
    Practice2,
    #[serde(rename = "Practice 3")]
    Practice3,
    #[serde(rename = "Qualifying")]
    Qualifying,
    #[serde(rename = "Sprint Shootout")]
    SprintShootout,
    #[serde(rename = "Sprint Qualifying")]
    SprintQualifying,
    #[serde(rename = "Sprint")]
    Sprint,
    #[serde(rename = "Race")]
    Race,
}

/// Decides which columns a session's table keeps and how its position
/// column is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCategory {
    Practice,
    Qualifying,
    Race,
}

impl SessionLabel {
    pub const ALL: [SessionLabel; 8] = [
        SessionLabel::Practice1,
        SessionLabel::Practice2,
        SessionLabel::Practice3,
        SessionLabel::Qualifying,
        SessionLabel::SprintShootout,
        SessionLabel::SprintQualifying,
        SessionLabel::Sprint,
        SessionLabel::Race,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionLabel::Practice1 => "Practice 1",
            SessionLabel::Practice2 => "Practice 2",
            SessionLabel::Practice3 => "Practice 3",
            SessionLabel::Qualifying => "Qualifying",
            SessionLabel::SprintShootout => "Sprint Shootout",
            SessionLabel::SprintQualifying => "Sprint Qualifying",
            SessionLabel::Sprint => "Sprint",
            SessionLabel::Race => "Race",
        }
    }

    pub fn category(&self) -> SessionCategory {
        match self {
            SessionLabel::Practice1 | SessionLabel::Practice2 | SessionLabel::Practice3 => {
                SessionCategory::Practice
            }
            SessionLabel::Qualifying
            | SessionLabel::SprintShootout
            | SessionLabel::SprintQualifying => SessionCategory::Qualifying,
            SessionLabel::Sprint | SessionLabel::Race => SessionCategory::Race,
        }
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    pub year: i32,
    pub event_name: String,
    pub label: SessionLabel,
}

impl SessionRef {
    pub fn new(year: i32, event_name: impl Into<String>, label: SessionLabel) -> Self {
        Self {
            year,
            event_name: event_name.into(),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_serialize_with_display_names() {
        for label in SessionLabel::ALL {
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
        let parsed: SessionLabel = serde_json::from_str("\"Sprint Shootout\"").unwrap();
        assert_eq!(parsed, SessionLabel::SprintShootout);
    }

    #[test]
    fn categories_follow_session_kind() {
        assert_eq!(SessionLabel::Practice2.category(), SessionCategory::Practice);
        assert_eq!(SessionLabel::SprintShootout.category(), SessionCategory::Qualifying);
        assert_eq!(SessionLabel::SprintQualifying.category(), SessionCategory::Qualifying);
        assert_eq!(SessionLabel::Sprint.category(), SessionCategory::Race);
        assert_eq!(SessionLabel::Race.category(), SessionCategory::Race);
    }
}
