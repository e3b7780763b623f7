use crate::models::session::SessionLabel;

/// Maps an OpenF1 `session_name` onto the dashboard's session labels.
pub fn map_session_name(external: &str) -> Option<SessionLabel> {
    match external {
        "Practice 1" => Some(SessionLabel::Practice1),
        "Practice 2" => Some(SessionLabel::Practice2),
        "Practice 3" => Some(SessionLabel::Practice3),
        "Qualifying" => Some(SessionLabel::Qualifying),
        "Sprint Shootout" => Some(SessionLabel::SprintShootout),
        "Sprint Qualifying" => Some(SessionLabel::SprintQualifying),
        "Sprint" => Some(SessionLabel::Sprint),
        "Race" => Some(SessionLabel::Race),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_label_back_to_itself() {
        for label in SessionLabel::ALL {
            assert_eq!(map_session_name(label.as_str()), Some(label));
        }
        assert_eq!(map_session_name("Day 1"), None);
    }
}
