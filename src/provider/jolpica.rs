//! Jolpica (Ergast-compatible) schedule and classification client.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::{
    models::{
        classification::ClassificationRow,
        race::{Event, EventFormat, SessionSlot},
        session::SessionLabel,
    },
    provider::{fetch_json, ProviderError},
    utils::rate_limiter::RateLimiter,
};

#[derive(Debug, Deserialize)]
pub struct Response<T> {
    #[serde(rename = "MRData")]
    pub mr_data: RaceTableData<T>,
}

#[derive(Debug, Deserialize)]
pub struct RaceTableData<T> {
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable<T>,
}

#[derive(Debug, Deserialize)]
pub struct RaceTable<T> {
    #[serde(rename = "Races", default = "Vec::new")]
    pub races: Vec<T>,
}

impl<T> Response<T> {
    fn into_races(self) -> Vec<T> {
        self.mr_data.race_table.races
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotDate {
    pub date: String,
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRace {
    pub round: String,
    #[serde(rename = "raceName")]
    pub race_name: String,
    pub date: String,
    pub time: Option<String>,
    #[serde(rename = "FirstPractice")]
    pub first_practice: Option<SlotDate>,
    #[serde(rename = "SecondPractice")]
    pub second_practice: Option<SlotDate>,
    #[serde(rename = "ThirdPractice")]
    pub third_practice: Option<SlotDate>,
    #[serde(rename = "Qualifying")]
    pub qualifying: Option<SlotDate>,
    #[serde(rename = "SprintShootout")]
    pub sprint_shootout: Option<SlotDate>,
    #[serde(rename = "SprintQualifying")]
    pub sprint_qualifying: Option<SlotDate>,
    #[serde(rename = "Sprint")]
    pub sprint: Option<SlotDate>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsRace {
    #[serde(rename = "Results", default)]
    pub results: Vec<ResultEntry>,
    #[serde(rename = "SprintResults", default)]
    pub sprint_results: Vec<ResultEntry>,
    #[serde(rename = "QualifyingResults", default)]
    pub qualifying_results: Vec<QualifyingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DriverRef {
    pub code: Option<String>,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ConstructorRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FinishTime {
    pub millis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResultEntry {
    pub number: String,
    #[serde(rename = "positionText")]
    pub position_text: String,
    pub points: Option<String>,
    #[serde(rename = "Driver")]
    pub driver: DriverRef,
    #[serde(rename = "Constructor")]
    pub constructor: ConstructorRef,
    pub grid: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<FinishTime>,
}

#[derive(Debug, Deserialize)]
pub struct QualifyingEntry {
    pub number: String,
    pub position: String,
    #[serde(rename = "Driver")]
    pub driver: DriverRef,
    #[serde(rename = "Constructor")]
    pub constructor: ConstructorRef,
    #[serde(rename = "Q1")]
    pub q1: Option<String>,
    #[serde(rename = "Q2")]
    pub q2: Option<String>,
    #[serde(rename = "Q3")]
    pub q3: Option<String>,
}

pub type ScheduleResponse = Response<ScheduleRace>;
pub type ResultsResponse = Response<ResultsRace>;

pub struct JolpicaClient {
    http_client: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl JolpicaClient {
    pub fn new(http_client: Client, base_url: &str) -> Self {
        JolpicaClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            // Jolpica allows four requests a second.
            limiter: RateLimiter::new(1, 250),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn season_schedule(&self, year: i32) -> Result<Vec<Event>, ProviderError> {
        let url = format!("{}/{year}.json", self.base_url);
        let response: ScheduleResponse =
            fetch_json(&self.http_client, &self.limiter, url, &limit()).await?;
        Ok(events_from_schedule(response))
    }

    pub async fn race_results(
        &self,
        year: i32,
        round: u32,
    ) -> Result<Vec<ClassificationRow>, ProviderError> {
        let race = self.fetch_results(year, round, "results").await?;
        finishing_rows(race.results, "Results")
    }

    pub async fn sprint_results(
        &self,
        year: i32,
        round: u32,
    ) -> Result<Vec<ClassificationRow>, ProviderError> {
        let race = self.fetch_results(year, round, "sprint").await?;
        finishing_rows(race.sprint_results, "SprintResults")
    }

    pub async fn qualifying_results(
        &self,
        year: i32,
        round: u32,
    ) -> Result<Vec<ClassificationRow>, ProviderError> {
        let race = self.fetch_results(year, round, "qualifying").await?;
        qualifying_rows(race.qualifying_results)
    }

    async fn fetch_results(
        &self,
        year: i32,
        round: u32,
        table: &str,
    ) -> Result<ResultsRace, ProviderError> {
        let url = format!("{}/{year}/{round}/{table}.json", self.base_url);
        let response: ResultsResponse =
            fetch_json(&self.http_client, &self.limiter, url, &limit()).await?;
        first_race(response)
    }
}

fn limit() -> [(&'static str, String); 1] {
    [("limit", "100".to_string())]
}

pub fn first_race(response: ResultsResponse) -> Result<ResultsRace, ProviderError> {
    response
        .into_races()
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::lookup_miss("RaceTable"))
}

pub fn events_from_schedule(response: ScheduleResponse) -> Vec<Event> {
    response
        .into_races()
        .into_iter()
        .filter_map(|race| {
            let Ok(round) = race.round.parse::<u32>() else {
                warn!(round = %race.round, event = %race.race_name, "skipping event with bad round");
                return None;
            };
            Some(event_from_race(race, round))
        })
        .collect()
}

fn event_from_race(race: ScheduleRace, round: u32) -> Event {
    let format = match (&race.sprint, &race.sprint_shootout, &race.sprint_qualifying) {
        (Some(_), Some(_), _) => EventFormat::SprintShootout,
        (Some(_), None, Some(_)) => EventFormat::SprintQualifying,
        (Some(_), None, None) => EventFormat::Sprint,
        (None, _, _) => EventFormat::Conventional,
    };

    let mut slots: Vec<SessionSlot> = [
        (SessionLabel::Practice1, &race.first_practice),
        (SessionLabel::Practice2, &race.second_practice),
        (SessionLabel::Practice3, &race.third_practice),
        (SessionLabel::Qualifying, &race.qualifying),
        (SessionLabel::SprintShootout, &race.sprint_shootout),
        (SessionLabel::SprintQualifying, &race.sprint_qualifying),
        (SessionLabel::Sprint, &race.sprint),
    ]
    .into_iter()
    .filter_map(|(label, slot)| {
        let slot = slot.as_ref()?;
        Some(SessionSlot::new(
            label,
            parse_schedule_time(&slot.date, slot.time.as_deref()),
        ))
    })
    .collect();
    slots.push(SessionSlot::new(
        SessionLabel::Race,
        parse_schedule_time(&race.date, race.time.as_deref()),
    ));
    // Undated slots sort last; the sort is stable for equal keys.
    slots.sort_by_key(|slot| (slot.scheduled_at.is_none(), slot.scheduled_at));

    Event {
        name: race.race_name,
        round,
        format,
        slots,
    }
}

/// `2023-05-28` plus an optional `13:00:00Z`; a missing time means midnight UTC.
pub fn parse_schedule_time(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = match time {
        Some(time) => NaiveTime::parse_from_str(time.trim_end_matches('Z'), "%H:%M:%S").ok()?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time).and_utc())
}

/// Parses Ergast lap times such as `1:12.386`, `59.9` or `1:48:51.980`.
pub fn parse_lap_time(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (clock, fraction) = text.split_once('.').unwrap_or((text, "0"));
    if !is_digits(fraction) {
        return None;
    }
    let mut seconds: i64 = 0;
    for part in clock.split(':') {
        if !is_digits(part) {
            return None;
        }
        seconds = seconds.checked_mul(60)?.checked_add(part.parse().ok()?)?;
    }
    let fraction: String = fraction.chars().take(3).collect();
    let millis: i64 = format!("{fraction:0<3}").parse().ok()?;
    TimeDelta::try_milliseconds(seconds.checked_mul(1000)?.checked_add(millis)?)
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

fn full_name(driver: &DriverRef) -> String {
    format!("{} {}", driver.given_name, driver.family_name)
}

fn abbreviation(driver: &DriverRef) -> String {
    driver.code.clone().unwrap_or_else(|| {
        driver
            .family_name
            .chars()
            .take(3)
            .collect::<String>()
            .to_uppercase()
    })
}

/// Race and sprint rows. The leader keeps the total time, everyone else gets
/// the gap to the leader.
pub fn finishing_rows(
    entries: Vec<ResultEntry>,
    field: &str,
) -> Result<Vec<ClassificationRow>, ProviderError> {
    if entries.is_empty() {
        return Err(ProviderError::lookup_miss(field));
    }
    let millis = |entry: &ResultEntry| {
        entry
            .time
            .as_ref()
            .and_then(|time| time.millis.as_deref())
            .and_then(|millis| millis.parse::<i64>().ok())
    };
    let leader_millis = entries.first().and_then(millis);

    let rows = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let time = match (millis(entry), leader_millis) {
                (Some(total), _) if index == 0 => TimeDelta::try_milliseconds(total),
                (Some(total), Some(leader)) => TimeDelta::try_milliseconds(total - leader),
                _ => None,
            };
            ClassificationRow {
                classified_position: entry.position_text.clone(),
                headshot_url: None,
                full_name: full_name(&entry.driver),
                abbreviation: abbreviation(&entry.driver),
                driver_number: entry.number.clone(),
                team_name: entry.constructor.name.clone(),
                grid_position: entry.grid.as_deref().and_then(|grid| grid.parse().ok()),
                q1: None,
                q2: None,
                q3: None,
                time,
                status: entry.status.clone(),
                points: entry.points.as_deref().and_then(|points| points.parse().ok()),
            }
        })
        .collect();
    Ok(rows)
}

pub fn qualifying_rows(
    entries: Vec<QualifyingEntry>,
) -> Result<Vec<ClassificationRow>, ProviderError> {
    if entries.is_empty() {
        return Err(ProviderError::lookup_miss("QualifyingResults"));
    }
    let lap = |time: &Option<String>| time.as_deref().and_then(parse_lap_time);
    Ok(entries
        .into_iter()
        .map(|entry| ClassificationRow {
            classified_position: entry.position.clone(),
            headshot_url: None,
            full_name: full_name(&entry.driver),
            abbreviation: abbreviation(&entry.driver),
            driver_number: entry.number.clone(),
            team_name: entry.constructor.name.clone(),
            grid_position: None,
            q1: lap(&entry.q1),
            q2: lap(&entry.q2),
            q3: lap(&entry.q3),
            time: None,
            status: None,
            points: None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lap_times_of_every_shape() {
        assert_eq!(parse_lap_time("1:12.386"), TimeDelta::try_milliseconds(72_386));
        assert_eq!(parse_lap_time("59.9"), TimeDelta::try_milliseconds(59_900));
        assert_eq!(
            parse_lap_time("1:48:51.980"),
            TimeDelta::try_milliseconds(6_531_980)
        );
        assert_eq!(parse_lap_time(""), None);
        assert_eq!(parse_lap_time("DNF"), None);
        assert_eq!(parse_lap_time("1:12.38\u{e9}"), None);
        assert_eq!(parse_lap_time("1:\u{e9}2.386"), None);
        assert_eq!(parse_lap_time("1:12.-5"), None);
        assert_eq!(parse_lap_time("-1:12.000"), None);
        assert_eq!(parse_lap_time("1:12."), None);
        assert_eq!(parse_lap_time("1::12.386"), None);
    }

    #[test]
    fn schedule_time_defaults_to_midnight() {
        let with_time = parse_schedule_time("2023-05-28", Some("13:00:00Z")).unwrap();
        assert_eq!(with_time.to_rfc3339(), "2023-05-28T13:00:00+00:00");
        let without_time = parse_schedule_time("2021-03-26", None).unwrap();
        assert_eq!(without_time.to_rfc3339(), "2021-03-26T00:00:00+00:00");
        assert!(parse_schedule_time("tbc", None).is_none());
    }

    #[test]
    fn empty_classification_is_a_lookup_miss() {
        let err = finishing_rows(Vec::new(), "Results").unwrap_err();
        assert!(matches!(err, ProviderError::LookupMiss { field } if field == "Results"));
    }
}
