use crate::error::AppError;
use crate::roster::stats::DEFAULT_WINDOW;
use std::env;
use std::path::PathBuf;

const DEFAULT_ROSTER_FILE: &str = "roster.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub roster_file: String,
    pub stats_window: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let data_dir = match env::var("ROSTER_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".league_roster"),
        };

        let roster_file = env::var("ROSTER_FILE").unwrap_or_else(|_| DEFAULT_ROSTER_FILE.to_string());

        let stats_window = match env::var("ROSTER_STATS_WINDOW") {
            Ok(raw) => parse_window(&raw)?,
            Err(_) => DEFAULT_WINDOW,
        };

        Ok(Config {
            data_dir,
            roster_file,
            stats_window,
        })
    }

    pub fn roster_path(&self) -> PathBuf {
        self.data_dir.join(&self.roster_file)
    }
}

fn parse_window(raw: &str) -> Result<usize, AppError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::ConfigError(format!(
            "ROSTER_STATS_WINDOW must be a positive integer, got `{}`",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_must_be_positive() {
        assert_eq!(parse_window(" 10 ").unwrap(), 10);
        assert!(parse_window("0").is_err());
        assert!(parse_window("ten").is_err());
    }

    #[test]
    fn roster_path_joins_dir_and_file() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/roster"),
            roster_file: "team.json".to_string(),
            stats_window: DEFAULT_WINDOW,
        };
        assert_eq!(config.roster_path(), PathBuf::from("/tmp/roster/team.json"));
    }
}
