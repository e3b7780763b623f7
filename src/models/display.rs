use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKey {
    ClassifiedPosition,
    HeadshotUrl,
    FullName,
    Abbreviation,
    DriverNumber,
    TeamName,
    GridPosition,
    Q1,
    Q2,
    Q3,
    Time,
    Status,
    Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Image,
    Number,
}

impl ColumnKey {
    /// Provider field order.
    pub const ALL: [ColumnKey; 13] = [
        ColumnKey::ClassifiedPosition,
        ColumnKey::HeadshotUrl,
        ColumnKey::FullName,
        ColumnKey::Abbreviation,
        ColumnKey::DriverNumber,
        ColumnKey::TeamName,
        ColumnKey::GridPosition,
        ColumnKey::Q1,
        ColumnKey::Q2,
        ColumnKey::Q3,
        ColumnKey::Time,
        ColumnKey::Status,
        ColumnKey::Points,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnKey::ClassifiedPosition => "Pos.",
            ColumnKey::HeadshotUrl => "Driver",
            ColumnKey::FullName => "Name",
            ColumnKey::Abbreviation => "Abbrv.",
            ColumnKey::DriverNumber => "Driver No.",
            ColumnKey::TeamName => "Constructor",
            ColumnKey::GridPosition => "Grid Pos.",
            ColumnKey::Q1 => "Q1",
            ColumnKey::Q2 => "Q2",
            ColumnKey::Q3 => "Q3",
            ColumnKey::Time => "Time",
            ColumnKey::Status => "Status",
            ColumnKey::Points => "Points",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnKey::HeadshotUrl => ColumnKind::Image,
            ColumnKey::GridPosition | ColumnKey::Points => ColumnKind::Number,
            _ => ColumnKind::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub key: ColumnKey,
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl From<ColumnKey> for Column {
    fn from(key: ColumnKey) -> Self {
        Self {
            key,
            label: key.label(),
            kind: key.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u32),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Column-filtered, time-formatted classification ready for the grid.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

impl DisplayTable {
    pub fn has_column(&self, key: ColumnKey) -> bool {
        self.columns.iter().any(|column| column.key == key)
    }

    pub fn column_keys(&self) -> Vec<ColumnKey> {
        self.columns.iter().map(|column| column.key).collect()
    }

    pub fn cell(&self, row: usize, key: ColumnKey) -> Option<&Cell> {
        let index = self.columns.iter().position(|column| column.key == key)?;
        self.rows.get(row)?.get(index)
    }
}

/// Everything the page needs to render one selected session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub heading: String,
    pub scheduled_at: String,
    pub note: &'static str,
    pub table: DisplayTable,
}
