//! CSV ingestion for the two source tables. Header variants across exports
//! are normalized to the canonical columns here; everything downstream sees
//! only `PlayerSeasonRecord` and `TeamStandingRecord`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::models::{Conference, PlayerSeasonRecord, TeamStandingRecord};
use crate::utils;

use super::teams;
use super::LoadError;

pub fn load_tables(
    player_path: &Path,
    standings_path: &Path,
) -> Result<(Vec<PlayerSeasonRecord>, Vec<TeamStandingRecord>), LoadError> {
    let players = read_players(open(player_path)?, &player_path.display().to_string())?;
    let standings = read_standings(open(standings_path)?, &standings_path.display().to_string())?;
    Ok((players, standings))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LoadError::Parse {
            path: path.display().to_string(),
            detail: e.to_string(),
        },
    })
}

pub fn read_players<R: Read>(reader: R, path: &str) -> Result<Vec<PlayerSeasonRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = headers(&mut csv_reader, path)?;

    let player = required_column(&headers, &["Player", "Name", "선수"], path, "player")?;
    let team = required_column(&headers, &["Tm", "Team", "팀"], path, "team")?;
    let season = required_column(&headers, &["Season", "Year", "시즌"], path, "season")?;
    let games = required_column(&headers, &["G", "GP", "Games"], path, "games")?;
    let minutes = required_column(&headers, &["MP", "MIN", "Minutes"], path, "minutes")?;
    let points = required_column(&headers, &["PTS", "Points"], path, "points")?;
    let rebounds = required_column(&headers, &["TRB", "REB", "Rebounds"], path, "rebounds")?;
    let assists = required_column(&headers, &["AST", "Assists"], path, "assists")?;
    let steals = required_column(&headers, &["STL", "Steals"], path, "steals")?;
    let blocks = required_column(&headers, &["BLK", "Blocks"], path, "blocks")?;
    let fg_pct = required_column(&headers, &["FG%", "FG_PCT", "FgPct"], path, "fg_pct")?;
    let three_pct = required_column(&headers, &["3P%", "3P_PCT", "ThreePct"], path, "three_pct")?;

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::Parse {
            path: path.to_string(),
            detail: e.to_string(),
        })?;
        let line = index + 2; // header is line 1
        let season_token = field(&record, season);
        if !utils::is_season_token(season_token) {
            return Err(LoadError::Parse {
                path: path.to_string(),
                detail: format!("line {}: malformed season token '{}'", line, season_token),
            });
        }
        rows.push(PlayerSeasonRecord {
            player: field(&record, player).to_string(),
            team: field(&record, team).to_string(),
            season: season_token.to_string(),
            games: parse_u32(&record, games, path, line)?,
            minutes: parse_f64(&record, minutes, path, line)?,
            points: parse_f64(&record, points, path, line)?,
            rebounds: parse_f64(&record, rebounds, path, line)?,
            assists: parse_f64(&record, assists, path, line)?,
            steals: parse_f64(&record, steals, path, line)?,
            blocks: parse_f64(&record, blocks, path, line)?,
            fg_pct: parse_f64(&record, fg_pct, path, line)?,
            three_pct: parse_f64(&record, three_pct, path, line)?,
        });
    }
    Ok(rows)
}

pub fn read_standings<R: Read>(
    reader: R,
    path: &str,
) -> Result<Vec<TeamStandingRecord>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = headers(&mut csv_reader, path)?;

    let team = required_column(&headers, &["Team", "Tm", "팀"], path, "team")?;
    let season = required_column(&headers, &["Season", "Year", "시즌"], path, "season")?;
    let conference = required_column(&headers, &["Conference", "Conf"], path, "conference")?;
    let rank = required_column(&headers, &["Rk", "Rank", "Seed"], path, "rank")?;
    let wins = required_column(&headers, &["W", "Wins"], path, "wins")?;
    let losses = required_column(&headers, &["L", "Losses"], path, "losses")?;
    // ratio is derivable, so the column is optional
    let win_ratio = find_column(&headers, &["W/L%", "WinPct", "PCT", "Win%"]);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::Parse {
            path: path.to_string(),
            detail: e.to_string(),
        })?;
        let line = index + 2;
        let season_token = field(&record, season);
        if !utils::is_season_token(season_token) {
            return Err(LoadError::Parse {
                path: path.to_string(),
                detail: format!("line {}: malformed season token '{}'", line, season_token),
            });
        }
        // playoff exports mark qualified teams with a trailing asterisk
        let name = field(&record, team).trim_end_matches('*').trim().to_string();
        let conference_value = field(&record, conference);
        let conference = Conference::from_column(conference_value).ok_or_else(|| LoadError::Parse {
            path: path.to_string(),
            detail: format!("line {}: unknown conference '{}'", line, conference_value),
        })?;
        let wins = parse_u32(&record, wins, path, line)?;
        let losses = parse_u32(&record, losses, path, line)?;
        let win_ratio = match win_ratio {
            Some(column) => parse_f64(&record, column, path, line)?,
            None if wins + losses > 0 => f64::from(wins) / f64::from(wins + losses),
            None => 0.0,
        };
        rows.push(TeamStandingRecord {
            abbreviation: teams::abbreviation_for(&name).unwrap_or(&name).to_string(),
            team: name,
            season: season_token.to_string(),
            conference,
            rank: parse_u32(&record, rank, path, line)?,
            wins,
            losses,
            win_ratio,
        });
    }
    Ok(rows)
}

fn headers(
    reader: &mut csv::Reader<impl Read>,
    path: &str,
) -> Result<csv::StringRecord, LoadError> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|e| LoadError::Parse {
            path: path.to_string(),
            detail: e.to_string(),
        })
}

fn find_column(headers: &csv::StringRecord, variants: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| variants.iter().any(|v| h.trim().eq_ignore_ascii_case(v)))
}

fn required_column(
    headers: &csv::StringRecord,
    variants: &[&str],
    path: &str,
    canonical: &'static str,
) -> Result<usize, LoadError> {
    find_column(headers, variants).ok_or(LoadError::MissingColumn {
        path: path.to_string(),
        column: canonical,
    })
}

fn field<'r>(record: &'r csv::StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("").trim()
}

/// Empty cells read as zero; some exports leave 3P% blank for non-shooters.
fn parse_f64(
    record: &csv::StringRecord,
    index: usize,
    path: &str,
    line: usize,
) -> Result<f64, LoadError> {
    let raw = field(record, index);
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse().map_err(|_| LoadError::Parse {
        path: path.to_string(),
        detail: format!("line {}: invalid number '{}'", line, raw),
    })
}

fn parse_u32(
    record: &csv::StringRecord,
    index: usize,
    path: &str,
    line: usize,
) -> Result<u32, LoadError> {
    let raw = field(record, index);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| LoadError::Parse {
        path: path.to_string(),
        detail: format!("line {}: invalid integer '{}'", line, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYERS_CSV: &str = "\
Player,Team,Season,GP,MIN,PTS,REB,AST,STL,BLK,FG_PCT,3P_PCT
Luka Doncic,DAL,2023-24,70,37.5,33.9,9.2,9.8,1.4,0.5,0.487,0.382
Stephen Curry,GSW,2023-24,74,32.7,26.4,4.5,5.1,0.7,0.4,0.450,0.408
";

    const STANDINGS_CSV: &str = "\
Team,Season,Conference,Rk,W,L
Boston Celtics*,2023-24,East,1,64,18
Some Expansion Team,2023-24,West,15,10,72
";

    #[test]
    fn player_header_variants_normalize() {
        let rows = read_players(PLAYERS_CSV.as_bytes(), "per_game.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Luka Doncic");
        assert_eq!(rows[0].games, 70);
        assert_eq!(rows[0].rebounds, 9.2);
        assert_eq!(rows[1].three_pct, 0.408);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_players("Player,Season\nA,2023-24\n".as_bytes(), "per_game.csv").unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "team"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_season_is_a_parse_error() {
        let csv = "Player,Team,Season,GP,MIN,PTS,REB,AST,STL,BLK,FG_PCT,3P_PCT\n\
                   A,DAL,2023/24,1,1,1,1,1,1,1,0.5,0.4\n";
        assert!(matches!(
            read_players(csv.as_bytes(), "per_game.csv"),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn standings_derive_abbreviation_and_ratio() {
        let rows = read_standings(STANDINGS_CSV.as_bytes(), "standings.csv").unwrap();
        assert_eq!(rows[0].team, "Boston Celtics");
        assert_eq!(rows[0].abbreviation, "BOS");
        assert_eq!(rows[0].conference, Conference::East);
        assert!((rows[0].win_ratio - 64.0 / 82.0).abs() < 1e-9);
        // unmapped names fall back to the raw name
        assert_eq!(rows[1].abbreviation, "Some Expansion Team");
    }
}
