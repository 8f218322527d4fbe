pub mod loader;
pub mod teams;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;

use crate::models::{Conference, PlayerSeasonRecord, RankedPlayer, StatKey, StatRank, TeamStandingRecord};

/// Ranking queries only consider players with at least this share of the
/// season's maximum games played.
pub const MIN_GAMES_RATIO: f64 = 0.5;

const RANKING_CACHE_CAP: usize = 128;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {path}")]
    FileNotFound { path: String },
    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },
    #[error("{path} is missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },
}

type RankingKey = (String, StatKey, usize);

/// Immutable snapshot of both tables plus the derived name indexes. Built
/// once at startup; a reload builds a whole new store, so the ranking cache
/// can never survive a reload.
#[derive(Debug, Default)]
pub struct DataStore {
    players: Vec<PlayerSeasonRecord>,
    standings: Vec<TeamStandingRecord>,
    player_names: Vec<String>,
    // (lowercased, display) pairs ordered longest name first, so "Campbell"
    // wins over "Bell" on containment
    name_index: Vec<(String, String)>,
    ranking_cache: Mutex<HashMap<RankingKey, Vec<RankedPlayer>>>,
}

impl DataStore {
    pub fn load(player_path: &Path, standings_path: &Path) -> Result<Self, LoadError> {
        let (players, standings) = loader::load_tables(player_path, standings_path)?;
        Ok(Self::from_rows(players, standings))
    }

    pub fn from_rows(players: Vec<PlayerSeasonRecord>, standings: Vec<TeamStandingRecord>) -> Self {
        let mut player_names: Vec<String> = players
            .iter()
            .filter(|r| !r.player.trim().is_empty())
            .map(|r| r.player.clone())
            .collect();
        player_names.sort();
        player_names.dedup();

        let mut name_index: Vec<(String, String)> = player_names
            .iter()
            .map(|name| (name.to_lowercase(), name.clone()))
            .collect();
        name_index.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });

        Self {
            players,
            standings,
            player_names,
            name_index,
            ranking_cache: Mutex::new(HashMap::new()),
        }
    }

    /// The degraded state used when loading fails: every query against it
    /// reports data-unavailable instead of raising.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.standings.is_empty()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn standing_count(&self) -> usize {
        self.standings.len()
    }

    /// Sorted, deduplicated player names.
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Most recent season present in either table; the "YYYY-YY" shape makes
    /// lexicographic max correct.
    pub fn latest_season(&self) -> Option<&str> {
        self.players
            .iter()
            .map(|r| r.season.as_str())
            .chain(self.standings.iter().map(|r| r.season.as_str()))
            .max()
    }

    /// Longest-first containment scan of the known player list against
    /// already-lowercased query text.
    pub fn match_player(&self, text: &str) -> Option<&str> {
        self.name_index
            .iter()
            .find(|(lower, _)| text.contains(lower.as_str()))
            .map(|(_, display)| display.as_str())
    }

    /// Case-insensitive substring match on player name, exact season match.
    /// Mid-season trades produce several rows; the one with the most games
    /// played is the canonical record.
    pub fn find_player_season(&self, name: &str, season: &str) -> Option<&PlayerSeasonRecord> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.players
            .iter()
            .filter(|r| r.season == season && r.player.to_lowercase().contains(&wanted))
            .max_by_key(|r| r.games)
    }

    /// Top-n rows for a stat within a season, ranked 1-based by position.
    /// Results are cached by the exact parameter tuple.
    pub fn top_n_by_season(&self, season: &str, stat: StatKey, n: usize) -> Vec<RankedPlayer> {
        let key: RankingKey = (season.to_string(), stat, n);
        if let Ok(cache) = self.ranking_cache.lock() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }

        let mut rows = self.qualified(season);
        rows.sort_by(|a, b| {
            stat.value_of(b)
                .partial_cmp(&stat.value_of(a))
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.games.cmp(&a.games))
        });
        let entries: Vec<RankedPlayer> = rows
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, r)| RankedPlayer {
                rank: i as u32 + 1,
                player: r.player.clone(),
                team: r.team.clone(),
                value: stat.value_of(r),
            })
            .collect();

        if let Ok(mut cache) = self.ranking_cache.lock() {
            if cache.len() >= RANKING_CACHE_CAP {
                cache.clear();
            }
            cache.insert(key, entries.clone());
        }
        entries
    }

    /// Dense rank of one player for a stat: tied values share a rank and the
    /// next distinct value takes the following integer.
    pub fn rank_of_player(&self, name: &str, season: &str, stat: StatKey) -> Option<StatRank> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        let qualified = self.qualified(season);
        let target = qualified
            .iter()
            .filter(|r| r.player.to_lowercase().contains(&wanted))
            .max_by_key(|r| r.games)?;
        let value = stat.value_of(target);

        let mut higher: Vec<f64> = qualified
            .iter()
            .map(|r| stat.value_of(r))
            .filter(|v| *v > value)
            .collect();
        higher.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        higher.dedup();

        Some(StatRank {
            player: target.player.clone(),
            team: target.team.clone(),
            value,
            rank: higher.len() as u32 + 1,
        })
    }

    /// Exact match on all three standing keys.
    pub fn standing_at(
        &self,
        season: &str,
        conference: Conference,
        rank: u32,
    ) -> Option<&TeamStandingRecord> {
        self.standings
            .iter()
            .find(|r| r.season == season && r.conference == conference && r.rank == rank)
    }

    /// Players on one team in one season, highest scorers first.
    pub fn roster(&self, team_abbr: &str, season: &str) -> Vec<&PlayerSeasonRecord> {
        let mut rows: Vec<&PlayerSeasonRecord> = self
            .players
            .iter()
            .filter(|r| r.season == season && r.team.eq_ignore_ascii_case(team_abbr))
            .collect();
        rows.sort_by(|a, b| b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal));
        rows
    }

    /// Season rows passing the minimum-games threshold (half the season's
    /// maximum games played), which keeps small-sample outliers out of
    /// ranking queries.
    fn qualified(&self, season: &str) -> Vec<&PlayerSeasonRecord> {
        let max_games = self
            .players
            .iter()
            .filter(|r| r.season == season)
            .map(|r| r.games)
            .max();
        let threshold = match max_games {
            Some(max) => f64::from(max) * MIN_GAMES_RATIO,
            None => return Vec::new(),
        };
        self.players
            .iter()
            .filter(|r| r.season == season && f64::from(r.games) >= threshold)
            .collect()
    }
}

/// Load both tables, falling back to the explicit empty state so the process
/// keeps serving (and reporting data-unavailable) when a source is missing.
pub fn load_or_empty(player_path: &Path, standings_path: &Path) -> DataStore {
    match DataStore::load(player_path, standings_path) {
        Ok(store) => {
            tracing::info!(
                players = store.player_count(),
                standings = store.standing_count(),
                "data loaded"
            );
            store
        }
        Err(e) => {
            tracing::error!("failed to load data: {}", e);
            DataStore::empty()
        }
    }
}
