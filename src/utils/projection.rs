//! Turns a provider classification into the table the dashboard shows.

use chrono::TimeDelta;

use crate::models::{
    classification::ClassificationRow,
    display::{Cell, Column, ColumnKey, DisplayTable},
    session::{SessionCategory, SessionLabel},
};

/// `H:MM:SS.mmm`. A missing time renders exactly like a zero duration.
pub fn format_duration(value: Option<TimeDelta>) -> String {
    let total = value.unwrap_or_else(TimeDelta::zero).num_milliseconds();
    let (sign, total) = if total < 0 { ("-", -total) } else { ("", total) };
    let hours = total / 3_600_000;
    let minutes = total / 60_000 % 60;
    let seconds = total / 1000 % 60;
    let millis = total % 1000;
    format!("{sign}{hours}:{minutes:02}:{seconds:02}.{millis:03}")
}

fn removed_columns(category: SessionCategory) -> &'static [ColumnKey] {
    match category {
        SessionCategory::Practice => &[
            ColumnKey::GridPosition,
            ColumnKey::Q1,
            ColumnKey::Q2,
            ColumnKey::Q3,
            ColumnKey::Time,
            ColumnKey::Status,
            ColumnKey::Points,
        ],
        SessionCategory::Qualifying => &[
            ColumnKey::GridPosition,
            ColumnKey::Time,
            ColumnKey::Status,
            ColumnKey::Points,
        ],
        SessionCategory::Race => &[ColumnKey::Q1, ColumnKey::Q2, ColumnKey::Q3],
    }
}

pub fn visible_columns(category: SessionCategory) -> Vec<ColumnKey> {
    let removed = removed_columns(category);
    ColumnKey::ALL
        .into_iter()
        .filter(|key| !removed.contains(key))
        .collect()
}

fn text(value: &Option<String>) -> Cell {
    value.clone().map(Cell::Text).unwrap_or(Cell::Empty)
}

fn cell(row: &ClassificationRow, rank: usize, category: SessionCategory, key: ColumnKey) -> Cell {
    match key {
        ColumnKey::ClassifiedPosition => match category {
            SessionCategory::Race => Cell::Text(row.classified_position.clone()),
            SessionCategory::Practice | SessionCategory::Qualifying => {
                Cell::Text(rank.to_string())
            }
        },
        ColumnKey::HeadshotUrl => text(&row.headshot_url),
        ColumnKey::FullName => Cell::Text(row.full_name.clone()),
        ColumnKey::Abbreviation => Cell::Text(row.abbreviation.clone()),
        ColumnKey::DriverNumber => Cell::Text(row.driver_number.clone()),
        ColumnKey::TeamName => Cell::Text(row.team_name.clone()),
        ColumnKey::GridPosition => row.grid_position.map(Cell::Integer).unwrap_or(Cell::Empty),
        ColumnKey::Q1 => Cell::Text(format_duration(row.q1)),
        ColumnKey::Q2 => Cell::Text(format_duration(row.q2)),
        ColumnKey::Q3 => Cell::Text(format_duration(row.q3)),
        ColumnKey::Time => Cell::Text(format_duration(row.time)),
        ColumnKey::Status => text(&row.status),
        ColumnKey::Points => row.points.map(Cell::Number).unwrap_or(Cell::Empty),
    }
}

/// Keeps the provider's row order; practice and qualifying positions are
/// the 1-based row rank.
pub fn project(rows: &[ClassificationRow], label: SessionLabel) -> DisplayTable {
    let category = label.category();
    let keys = visible_columns(category);
    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            keys.iter()
                .map(|key| cell(row, index + 1, category, *key))
                .collect()
        })
        .collect();

    DisplayTable {
        columns: keys.into_iter().map(Column::from).collect(),
        rows,
    }
}

pub fn session_note(label: SessionLabel) -> &'static str {
    match label.category() {
        SessionCategory::Practice => "Practice sessions do not include times.",
        SessionCategory::Qualifying | SessionCategory::Race => {
            "Times after the first row is the gap from the session leader."
        }
    }
}
