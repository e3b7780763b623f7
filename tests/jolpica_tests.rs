use chrono::{TimeDelta, TimeZone, Utc};

use session_viewer::models::race::EventFormat;
use session_viewer::models::session::SessionLabel;
use session_viewer::provider::jolpica::{
    events_from_schedule, finishing_rows, first_race, qualifying_rows, ResultsResponse,
    ScheduleResponse,
};
use session_viewer::provider::ProviderError;
use session_viewer::utils::selector::resolve_scheduled_time;

fn schedule(body: &str) -> ScheduleResponse {
    serde_json::from_str(body).expect("schedule fixture")
}

fn results(body: &str) -> ResultsResponse {
    serde_json::from_str(body).expect("results fixture")
}

#[test]
fn builds_events_with_formats_and_chronological_slots() {
    let events = events_from_schedule(schedule(include_str!("fixtures/schedule_2023.json")));
    // The entry with an unparseable round is skipped.
    assert_eq!(events.len(), 2);

    let baku = &events[0];
    assert_eq!(baku.name, "Azerbaijan Grand Prix");
    assert_eq!(baku.round, 4);
    assert_eq!(baku.format, EventFormat::SprintShootout);
    assert_eq!(
        baku.session_labels(),
        EventFormat::SprintShootout.slot_order().to_vec()
    );

    let monaco = &events[1];
    assert_eq!(monaco.format, EventFormat::Conventional);
    assert_eq!(
        monaco.session_labels(),
        EventFormat::Conventional.slot_order().to_vec()
    );
    assert_eq!(
        monaco.session_times().last().copied(),
        Some(Utc.with_ymd_and_hms(2023, 5, 28, 13, 0, 0).unwrap())
    );
}

#[test]
fn sprint_shootout_weekend_resolves_each_label() {
    let events = events_from_schedule(schedule(include_str!("fixtures/schedule_2023.json")));
    let baku = &events[0];
    let expected = [
        (SessionLabel::Practice1, Utc.with_ymd_and_hms(2023, 4, 28, 9, 30, 0).unwrap()),
        (SessionLabel::Qualifying, Utc.with_ymd_and_hms(2023, 4, 28, 13, 0, 0).unwrap()),
        (SessionLabel::SprintShootout, Utc.with_ymd_and_hms(2023, 4, 29, 8, 30, 0).unwrap()),
        (SessionLabel::Sprint, Utc.with_ymd_and_hms(2023, 4, 29, 12, 30, 0).unwrap()),
        (SessionLabel::Race, Utc.with_ymd_and_hms(2023, 4, 30, 11, 0, 0).unwrap()),
    ];
    for (label, time) in expected {
        assert_eq!(resolve_scheduled_time(baku, label).unwrap(), time, "{label}");
    }
}

#[test]
fn sprint_qualifying_weekend_is_detected() {
    let events =
        events_from_schedule(schedule(include_str!("fixtures/schedule_2024_sprint.json")));
    let shanghai = &events[0];
    assert_eq!(shanghai.format, EventFormat::SprintQualifying);
    assert_eq!(
        shanghai.session_labels(),
        vec![
            SessionLabel::Practice1,
            SessionLabel::SprintQualifying,
            SessionLabel::Sprint,
            SessionLabel::Qualifying,
            SessionLabel::Race,
        ]
    );
}

#[test]
fn race_rows_carry_leader_time_and_gaps() {
    let race = first_race(results(include_str!("fixtures/monaco_2023_results.json"))).unwrap();
    let rows = finishing_rows(race.results, "Results").unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].classified_position, "1");
    assert_eq!(rows[0].full_name, "Max Verstappen");
    assert_eq!(rows[0].abbreviation, "VER");
    assert_eq!(rows[0].team_name, "Red Bull");
    assert_eq!(rows[0].grid_position, Some(1));
    assert_eq!(rows[0].points, Some(25.0));
    assert_eq!(rows[0].time, TimeDelta::try_milliseconds(6_928_922));

    assert_eq!(rows[1].time, TimeDelta::try_milliseconds(27_921));

    // Retired without a code: short code falls back to the family name.
    assert_eq!(rows[2].classified_position, "R");
    assert_eq!(rows[2].abbreviation, "SAR");
    assert_eq!(rows[2].time, None);
    assert_eq!(rows[2].status.as_deref(), Some("Retired"));
}

#[test]
fn qualifying_rows_parse_segment_times() {
    let race =
        first_race(results(include_str!("fixtures/monaco_2023_qualifying.json"))).unwrap();
    let rows = qualifying_rows(race.qualifying_results).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].q1, TimeDelta::try_milliseconds(72_386));
    assert_eq!(rows[0].q3, TimeDelta::try_milliseconds(71_365));
    assert_eq!(rows[1].q2, None);
    assert_eq!(rows[1].points, None);
}

#[test]
fn future_event_has_no_classification() {
    let err = first_race(results(include_str!("fixtures/future_results.json"))).unwrap_err();
    assert!(matches!(err, ProviderError::LookupMiss { .. }));
}

#[test]
fn race_table_without_race_results_is_a_lookup_miss() {
    let race =
        first_race(results(include_str!("fixtures/monaco_2023_qualifying.json"))).unwrap();
    let err = finishing_rows(race.results, "Results").unwrap_err();
    assert_eq!(err.to_string(), "Field not found: Results");
}
