use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the per-game table: a player's averages for a single season.
/// A player traded mid-season appears once per team; lookups pick the row
/// with the most games played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonRecord {
    pub player: String,
    pub team: String,
    pub season: String, // "2023-24"
    pub games: u32,
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub fg_pct: f64,
    pub three_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStandingRecord {
    pub team: String,
    pub abbreviation: String,
    pub season: String,
    pub conference: Conference,
    pub rank: u32, // unique within (season, conference)
    pub wins: u32,
    pub losses: u32,
    pub win_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    East,
    West,
}

impl Conference {
    /// Scan free text for a conference keyword.
    pub fn from_text(text: &str) -> Option<Self> {
        const EAST: &[&str] = &["동부", "이스트", "east"];
        const WEST: &[&str] = &["서부", "웨스트", "west"];
        if EAST.iter().any(|w| text.contains(w)) {
            Some(Conference::East)
        } else if WEST.iter().any(|w| text.contains(w)) {
            Some(Conference::West)
        } else {
            None
        }
    }

    /// Parse a standings-table column value ("East", "Eastern Conference", ...).
    pub fn from_column(value: &str) -> Option<Self> {
        let v = value.trim().to_lowercase();
        if v.starts_with("east") || v.contains("동부") {
            Some(Conference::East)
        } else if v.starts_with("west") || v.contains("서부") {
            Some(Conference::West)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Conference::East => "동부",
            Conference::West => "서부",
        }
    }
}

/// Canonical identifier for a per-game statistic column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    FgPct,
    ThreePct,
}

/// Domain-language labels mapped to stat columns, scanned in declaration
/// order by the resolver. Containment-matched, so only unambiguous labels
/// belong here; short aliases live in `from_label`.
const STAT_LABELS: &[(&str, StatKey)] = &[
    ("득점", StatKey::Points),
    ("points", StatKey::Points),
    ("리바운드", StatKey::Rebounds),
    ("rebounds", StatKey::Rebounds),
    ("어시스트", StatKey::Assists),
    ("assists", StatKey::Assists),
    ("스틸", StatKey::Steals),
    ("steals", StatKey::Steals),
    ("블록", StatKey::Blocks),
    ("블락", StatKey::Blocks),
    ("blocks", StatKey::Blocks),
    ("야투", StatKey::FgPct),
    ("3점", StatKey::ThreePct),
    ("3p", StatKey::ThreePct),
];

impl StatKey {
    /// Find a stat label anywhere in (lowercased) query text.
    pub fn from_text(text: &str) -> Option<Self> {
        STAT_LABELS
            .iter()
            .find(|(label, _)| text.contains(label))
            .map(|(_, key)| *key)
    }

    /// Exact-match lookup for CLI arguments, with short column aliases.
    pub fn from_label(label: &str) -> Option<Self> {
        let l = label.trim().to_lowercase();
        if let Some((_, key)) = STAT_LABELS.iter().find(|(s, _)| l == *s) {
            return Some(*key);
        }
        match l.as_str() {
            "pts" => Some(StatKey::Points),
            "trb" | "reb" => Some(StatKey::Rebounds),
            "ast" => Some(StatKey::Assists),
            "stl" => Some(StatKey::Steals),
            "blk" => Some(StatKey::Blocks),
            "fg" | "fg%" => Some(StatKey::FgPct),
            "3p%" => Some(StatKey::ThreePct),
            _ => None,
        }
    }

    pub fn value_of(&self, record: &PlayerSeasonRecord) -> f64 {
        match self {
            StatKey::Points => record.points,
            StatKey::Rebounds => record.rebounds,
            StatKey::Assists => record.assists,
            StatKey::Steals => record.steals,
            StatKey::Blocks => record.blocks,
            StatKey::FgPct => record.fg_pct,
            StatKey::ThreePct => record.three_pct,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Points => "득점",
            StatKey::Rebounds => "리바운드",
            StatKey::Assists => "어시스트",
            StatKey::Steals => "스틸",
            StatKey::Blocks => "블록",
            StatKey::FgPct => "야투율",
            StatKey::ThreePct => "3점 성공률",
        }
    }

    /// Counting stats render with one decimal, shooting percentages with two.
    pub fn format(&self, value: f64) -> String {
        match self {
            StatKey::FgPct | StatKey::ThreePct => format!("{:.2}", value),
            _ => format!("{:.1}", value),
        }
    }
}

/// What the parser extracted from one question. Created fresh per request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    pub intent: Intent,
    pub season: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Full stat line for one player.
    PlayerStat { player: String },
    /// League-wide top-N for one stat. `count` is None when the question
    /// did not name a size.
    Ranking { stat: StatKey, count: Option<usize> },
    /// One player's rank for one stat.
    PlayerRank { player: String, stat: StatKey },
    /// Team at a given rank within a conference.
    TeamStanding { conference: Conference, rank: u32 },
    /// Players on one team.
    Roster { team: String, team_name: String },
    Unrecognized,
}

/// One row of a ranking answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub rank: u32,
    pub player: String,
    pub team: String,
    pub value: f64,
}

/// A player's position in a season-wide dense ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRank {
    pub player: String,
    pub team: String,
    pub value: f64,
    pub rank: u32,
}

/// The total outcome of resolving one question. Success variants carry the
/// structured payload; the three failure variants are distinct so callers
/// branch on kind instead of sniffing strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    PlayerStat {
        record: PlayerSeasonRecord,
    },
    Ranking {
        season: String,
        stat: StatKey,
        entries: Vec<RankedPlayer>,
    },
    PlayerRank {
        season: String,
        stat: StatKey,
        result: StatRank,
    },
    TeamStanding {
        record: TeamStandingRecord,
    },
    Roster {
        season: String,
        team: String,
        team_name: String,
        players: Vec<PlayerSeasonRecord>,
    },
    /// Intent recognized, but no matching row. The message names the target.
    NotFound { message: String },
    /// No intent pattern matched.
    Unrecognized { message: String },
    /// Source tables never loaded; retry after a reload.
    DataUnavailable { message: String },
}

impl Answer {
    /// Render the fixed textual template for this answer.
    pub fn render(&self) -> String {
        match self {
            Answer::PlayerStat { record } => format!(
                "👤 {} 선수 기록 ({} 시즌 기준):\n\
                 \x20 - 소속 팀: {}\n\
                 \x20 - 출전 경기: {}경기 (평균 {:.1}분)\n\
                 \x20 - 평균 득점 (PTS): {:.1}\n\
                 \x20 - 평균 리바운드 (TRB): {:.1}\n\
                 \x20 - 평균 어시스트 (AST): {:.1}\n\
                 \x20 - 평균 스틸 (STL): {:.1}\n\
                 \x20 - 평균 블록 (BLK): {:.1}\n\
                 \x20 - 야투율 (FG%): {:.2}\n\
                 \x20 - 3점 성공률 (3P%): {:.2}",
                record.player,
                record.season,
                record.team,
                record.games,
                record.minutes,
                record.points,
                record.rebounds,
                record.assists,
                record.steals,
                record.blocks,
                record.fg_pct,
                record.three_pct,
            ),
            Answer::Ranking { season, stat, entries } => {
                let mut out = format!("🏆 {} 시즌 {} TOP {}:", season, stat.label(), entries.len());
                for entry in entries {
                    out.push_str(&format!(
                        "\n{}. {} ({}) | {} {}",
                        entry.rank,
                        entry.player,
                        entry.team,
                        stat.label(),
                        stat.format(entry.value),
                    ));
                }
                out
            }
            Answer::PlayerRank { season, stat, result } => format!(
                "📈 {} 선수는 {} 시즌 {} {}위입니다 ({} {}, 소속 {}).",
                result.player,
                season,
                stat.label(),
                result.rank,
                stat.label(),
                stat.format(result.value),
                result.team,
            ),
            Answer::TeamStanding { record } => format!(
                "🏀 {} 시즌 {} {}위: {} ({}) | {}승 {}패 (승률 {:.3})",
                record.season,
                record.conference.label(),
                record.rank,
                record.team,
                record.abbreviation,
                record.wins,
                record.losses,
                record.win_ratio,
            ),
            Answer::Roster { season, team, team_name, players } => {
                let mut out = format!(
                    "📋 {} 시즌 {} ({}) 선수 명단 ({}명):",
                    season,
                    team_name,
                    team,
                    players.len()
                );
                for record in players {
                    out.push_str(&format!(
                        "\n - {} (평균 득점 {:.1})",
                        record.player, record.points
                    ));
                }
                out
            }
            Answer::NotFound { message }
            | Answer::Unrecognized { message }
            | Answer::DataUnavailable { message } => message.clone(),
        }
    }
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}
