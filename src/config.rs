use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_TOP_N: usize = 5;

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding per_game.csv and standings.csv.
    pub data_dir: PathBuf,
    /// Season assumed when a question names none. Unset means "most recent
    /// season in the loaded data".
    pub default_season: Option<String>,
    /// Ranking size when a question gives no count.
    pub default_top_n: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let data_dir = env::var("HOOPDESK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let default_season = env::var("HOOPDESK_DEFAULT_SEASON")
            .ok()
            .filter(|s| crate::utils::is_season_token(s));
        let default_top_n = env::var("HOOPDESK_TOP_N")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOP_N);
        Self {
            data_dir,
            default_season,
            default_top_n,
        }
    }

    pub fn player_csv(&self) -> PathBuf {
        self.data_dir.join("per_game.csv")
    }

    pub fn standings_csv(&self) -> PathBuf {
        self.data_dir.join("standings.csv")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            default_season: None,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}
