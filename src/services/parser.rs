//! Query-text parsing: one ordered rule table, first match wins. Every rule
//! sees the same normalized input, so the precedence between overlapping
//! patterns is explicit here instead of buried in nested conditionals.

use crate::models::{Conference, Intent, ParsedQuery, StatKey};
use crate::store::{teams, DataStore};
use crate::utils;

const RANKING_WORDS: &[&str] = &["순위", "랭킹", "탑", "top", "상위"];
const RANK_WORDS: &[&str] = &["순위", "랭킹", "rank", "몇위", "몇 위"];
const STAT_LINE_WORDS: &[&str] = &["기록", "스탯", "성적"];
const ROSTER_WORDS: &[&str] = &["명단", "멤버", "선수 목록", "로스터"];

pub struct RuleInput<'a> {
    /// Lowercased, trimmed query text.
    pub text: &'a str,
    /// Known player name found in the text, longest name first.
    pub player: Option<&'a str>,
}

type Rule = fn(&RuleInput) -> Option<Intent>;

/// Priority order. A question can contain both a stat keyword and a rank
/// phrase, so league-wide rankings are tried before player-specific ones,
/// and anything naming a known player skips the ranking rule.
const RULES: &[(&str, Rule)] = &[
    ("ranking", match_ranking),
    ("player_rank", match_player_rank),
    ("player_stat", match_player_stat),
    ("roster", match_roster),
    ("team_standing", match_team_standing),
];

pub fn parse(text: &str, store: &DataStore, default_season: &str) -> ParsedQuery {
    let normalized = text.trim().to_lowercase();
    let season =
        utils::extract_season_token(&normalized).unwrap_or_else(|| default_season.to_string());
    let input = RuleInput {
        text: &normalized,
        player: store.match_player(&normalized),
    };
    for (name, rule) in RULES {
        if let Some(intent) = rule(&input) {
            tracing::debug!(rule = %name, season = %season, "intent rule matched");
            return ParsedQuery { intent, season };
        }
    }
    ParsedQuery {
        intent: Intent::Unrecognized,
        season,
    }
}

fn match_ranking(input: &RuleInput) -> Option<Intent> {
    if input.player.is_some() {
        return None;
    }
    let stat = StatKey::from_text(input.text)?;
    if !utils::contains_any(input.text, RANKING_WORDS) && utils::extract_ordinal(input.text).is_none()
    {
        return None;
    }
    Some(Intent::Ranking {
        stat,
        count: ranking_count(input.text),
    })
}

/// "top 3" style phrases win over bare ordinals ("1위").
fn ranking_count(text: &str) -> Option<usize> {
    for keyword in ["top", "탑", "상위"] {
        if let Some(n) = utils::number_after(text, keyword) {
            return Some(n);
        }
    }
    utils::extract_ordinal(text).map(|n| n as usize)
}

fn match_player_rank(input: &RuleInput) -> Option<Intent> {
    let player = input.player?;
    let stat = StatKey::from_text(input.text)?;
    if !utils::contains_any(input.text, RANK_WORDS) && utils::extract_ordinal(input.text).is_none() {
        return None;
    }
    Some(Intent::PlayerRank {
        player: player.to_string(),
        stat,
    })
}

fn match_player_stat(input: &RuleInput) -> Option<Intent> {
    if let Some(player) = input.player {
        return Some(Intent::PlayerStat {
            player: player.to_string(),
        });
    }
    // No known player, but stat-line language present: treat the residual
    // tokens as the requested name so the lookup can report it as missing.
    if !utils::contains_any(input.text, STAT_LINE_WORDS) {
        return None;
    }
    candidate_name(input.text).map(|player| Intent::PlayerStat { player })
}

fn candidate_name(text: &str) -> Option<String> {
    const NOISE: &[&str] = &[
        "시즌", "기록", "스탯", "성적", "주요", "알려줘", "보여줘", "누구", "top", "탑", "상위",
    ];
    let kept: Vec<&str> = text
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|token| {
            !token.is_empty()
                && !utils::is_season_token(token)
                && !NOISE.iter().any(|w| token.contains(w))
        })
        .collect();
    let candidate = kept.join(" ");
    if candidate.is_empty() {
        None
    } else {
        Some(candidate)
    }
}

fn match_roster(input: &RuleInput) -> Option<Intent> {
    if !utils::contains_any(input.text, ROSTER_WORDS) {
        return None;
    }
    let (abbr, name) = teams::find_in_text(input.text)?;
    Some(Intent::Roster {
        team: abbr.to_string(),
        team_name: name.to_string(),
    })
}

fn match_team_standing(input: &RuleInput) -> Option<Intent> {
    let conference = Conference::from_text(input.text)?;
    let rank = utils::extract_ordinal(input.text)?;
    Some(Intent::TeamStanding { conference, rank })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerSeasonRecord;

    fn player(name: &str) -> PlayerSeasonRecord {
        PlayerSeasonRecord {
            player: name.to_string(),
            team: "BOS".to_string(),
            season: "2023-24".to_string(),
            games: 70,
            minutes: 30.0,
            points: 20.0,
            rebounds: 5.0,
            assists: 4.0,
            steals: 1.0,
            blocks: 0.5,
            fg_pct: 0.5,
            three_pct: 0.35,
        }
    }

    fn store() -> DataStore {
        DataStore::from_rows(vec![player("Bell"), player("Campbell")], vec![])
    }

    #[test]
    fn season_token_overrides_default() {
        let parsed = parse("2022-23 시즌 득점 top 3", &store(), "2023-24");
        assert_eq!(parsed.season, "2022-23");
        let parsed = parse("득점 top 3", &store(), "2023-24");
        assert_eq!(parsed.season, "2023-24");
    }

    #[test]
    fn ranking_query_with_count() {
        let parsed = parse("2023-24 시즌 득점 TOP 3 선수는?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::Ranking { stat: StatKey::Points, count: Some(3) }
        );
    }

    #[test]
    fn ranking_without_count_leaves_default_to_caller() {
        let parsed = parse("어시스트 순위 알려줘", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::Ranking { stat: StatKey::Assists, count: None }
        );
    }

    #[test]
    fn leader_query_is_a_ranking_of_one() {
        let parsed = parse("리바운드 1위는 누구?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::Ranking { stat: StatKey::Rebounds, count: Some(1) }
        );
    }

    #[test]
    fn longest_player_name_wins_containment() {
        let parsed = parse("campbell 기록 알려줘", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::PlayerStat { player: "Campbell".to_string() }
        );
    }

    #[test]
    fn player_rank_needs_stat_and_rank_language() {
        let parsed = parse("bell 득점 순위는?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::PlayerRank { player: "Bell".to_string(), stat: StatKey::Points }
        );
        // without rank language it stays a stat-line question
        let parsed = parse("bell 득점 기록은?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::PlayerStat { player: "Bell".to_string() }
        );
    }

    #[test]
    fn unknown_player_with_stat_line_words_keeps_the_name() {
        let parsed = parse("2023-24 시즌 없는선수 주요 기록은?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::PlayerStat { player: "없는선수".to_string() }
        );
    }

    #[test]
    fn roster_query_maps_team_keyword() {
        let parsed = parse("레이커스 선수 명단 보여줘", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::Roster {
                team: "LAL".to_string(),
                team_name: "Los Angeles Lakers".to_string()
            }
        );
    }

    #[test]
    fn standing_query_needs_conference_and_ordinal() {
        let parsed = parse("2023-24 시즌 동부 1위 팀은?", &store(), "2023-24");
        assert_eq!(
            parsed.intent,
            Intent::TeamStanding { conference: Conference::East, rank: 1 }
        );
        let parsed = parse("동부 팀 어때?", &store(), "2023-24");
        assert_eq!(parsed.intent, Intent::Unrecognized);
    }

    #[test]
    fn gibberish_is_unrecognized() {
        let parsed = parse("오늘 날씨 어때?", &store(), "2023-24");
        assert_eq!(parsed.intent, Intent::Unrecognized);
    }
}
