use tracing::warn;

pub const DEFAULT_SEASONS: [i32; 4] = [2024, 2023, 2022, 2021];

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub jolpica_base_url: String,
    pub openf1_base_url: String,
    pub seasons: Vec<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1:3000".to_string(),
            jolpica_base_url: "https://api.jolpi.ca/ergast/f1".to_string(),
            openf1_base_url: "https://api.openf1.org/v1".to_string(),
            seasons: DEFAULT_SEASONS.to_vec(),
        }
    }
}

impl Config {
    pub fn init() -> Self {
        let defaults = Config::default();
        Config {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            jolpica_base_url: std::env::var("JOLPICA_BASE_URL")
                .unwrap_or(defaults.jolpica_base_url),
            openf1_base_url: std::env::var("OPENF1_BASE_URL").unwrap_or(defaults.openf1_base_url),
            seasons: std::env::var("SEASONS")
                .ok()
                .map(|raw| parse_seasons(&raw))
                .filter(|seasons| !seasons.is_empty())
                .unwrap_or(defaults.seasons),
        }
    }
}

/// Comma separated years; entries that are not years are skipped.
pub fn parse_seasons(raw: &str) -> Vec<i32> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.parse::<i32>() {
            Ok(year) => Some(year),
            Err(_) => {
                warn!(entry, "ignoring invalid SEASONS entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_season_list() {
        assert_eq!(parse_seasons("2024, 2023,,2022"), vec![2024, 2023, 2022]);
        assert_eq!(parse_seasons("2024,latest"), vec![2024]);
        assert!(parse_seasons("").is_empty());
    }
}
