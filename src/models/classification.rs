use chrono::TimeDelta;

/// One participant's result in a session, as delivered by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRow {
    /// Provider classification: a number, or a letter such as `R` or `D`.
    pub classified_position: String,
    pub headshot_url: Option<String>,
    pub full_name: String,
    pub abbreviation: String,
    pub driver_number: String,
    pub team_name: String,
    pub grid_position: Option<u32>,
    pub q1: Option<TimeDelta>,
    pub q2: Option<TimeDelta>,
    pub q3: Option<TimeDelta>,
    /// Total time for the leader, gap to the leader for everyone else.
    pub time: Option<TimeDelta>,
    pub status: Option<String>,
    pub points: Option<f64>,
}
