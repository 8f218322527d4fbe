//! Intent dispatch and answer building. `resolve` is total: every lookup
//! failure becomes a `NotFound`, `Unrecognized`, or `DataUnavailable`
//! answer, never an error.

use crate::config::Config;
use crate::models::{Answer, Intent, ParsedQuery};
use crate::services::parser;
use crate::store::DataStore;

pub const DATA_UNAVAILABLE_MESSAGE: &str =
    "데이터가 로드되지 않았습니다. 잠시 후 다시 시도해주세요.";

const FALLBACK_SEASON: &str = "2023-24";

pub struct QueryEngine {
    default_season: Option<String>,
    default_top_n: usize,
}

impl QueryEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            default_season: config.default_season.clone(),
            default_top_n: config.default_top_n,
        }
    }

    /// Resolve one question against the given store snapshot. Pure in
    /// (text, store): identical inputs yield identical answers.
    pub fn resolve(&self, store: &DataStore, text: &str) -> Answer {
        if store.is_empty() {
            return Answer::DataUnavailable {
                message: DATA_UNAVAILABLE_MESSAGE.to_string(),
            };
        }
        let default_season = self.default_season(store);
        let ParsedQuery { intent, season } = parser::parse(text, store, &default_season);
        tracing::debug!(?intent, season = %season, "resolved query");
        self.answer(store, intent, season)
    }

    fn default_season(&self, store: &DataStore) -> String {
        self.default_season
            .clone()
            .or_else(|| store.latest_season().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_SEASON.to_string())
    }

    fn answer(&self, store: &DataStore, intent: Intent, season: String) -> Answer {
        match intent {
            Intent::PlayerStat { player } => match store.find_player_season(&player, &season) {
                Some(record) => Answer::PlayerStat {
                    record: record.clone(),
                },
                None => Answer::NotFound {
                    message: format!(
                        "'{}' 선수의 {} 시즌 기록을 찾을 수 없습니다. 이름이 정확한지 확인해주세요.",
                        player, season
                    ),
                },
            },
            Intent::Ranking { stat, count } => {
                let n = count.unwrap_or(self.default_top_n).max(1);
                let entries = store.top_n_by_season(&season, stat, n);
                if entries.is_empty() {
                    Answer::NotFound {
                        message: format!(
                            "{} 시즌 {} 순위를 계산할 데이터가 없습니다.",
                            season,
                            stat.label()
                        ),
                    }
                } else {
                    Answer::Ranking { season, stat, entries }
                }
            }
            Intent::PlayerRank { player, stat } => {
                match store.rank_of_player(&player, &season, stat) {
                    Some(result) => Answer::PlayerRank { season, stat, result },
                    None => Answer::NotFound {
                        message: format!(
                            "'{}' 선수의 {} 시즌 {} 순위를 찾을 수 없습니다.",
                            player,
                            season,
                            stat.label()
                        ),
                    },
                }
            }
            Intent::TeamStanding { conference, rank } => {
                match store.standing_at(&season, conference, rank) {
                    Some(record) => Answer::TeamStanding {
                        record: record.clone(),
                    },
                    None => Answer::NotFound {
                        message: format!(
                            "{} 시즌 {} {}위 팀을 찾을 수 없습니다.",
                            season,
                            conference.label(),
                            rank
                        ),
                    },
                }
            }
            Intent::Roster { team, team_name } => {
                let players = store.roster(&team, &season);
                if players.is_empty() {
                    Answer::NotFound {
                        message: format!(
                            "{} 시즌 {} ({}) 선수 명단을 찾을 수 없습니다.",
                            season, team_name, team
                        ),
                    }
                } else {
                    Answer::Roster {
                        season,
                        team,
                        team_name,
                        players: players.into_iter().cloned().collect(),
                    }
                }
            }
            Intent::Unrecognized => Answer::Unrecognized {
                message: "🤔 질문을 이해하지 못했습니다. 이런 질문을 해보세요:\n\
                          \x20 - 2023-24 시즌 득점 TOP 3 선수는?\n\
                          \x20 - Stephen Curry 주요 기록은?\n\
                          \x20 - 동부 1위 팀은?"
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conference, PlayerSeasonRecord, StatKey, TeamStandingRecord};

    fn player(name: &str, team: &str, games: u32, points: f64) -> PlayerSeasonRecord {
        PlayerSeasonRecord {
            player: name.to_string(),
            team: team.to_string(),
            season: "2023-24".to_string(),
            games,
            minutes: 34.2,
            points,
            rebounds: 7.5,
            assists: 6.1,
            steals: 1.2,
            blocks: 0.8,
            fg_pct: 0.512,
            three_pct: 0.376,
        }
    }

    fn fixture() -> DataStore {
        DataStore::from_rows(
            vec![
                player("Campbell", "BOS", 70, 30.0),
                player("Bell", "LAL", 68, 28.5),
                player("Archer", "DEN", 66, 27.1),
            ],
            vec![TeamStandingRecord {
                team: "Boston Celtics".to_string(),
                abbreviation: "BOS".to_string(),
                season: "2023-24".to_string(),
                conference: Conference::East,
                rank: 1,
                wins: 64,
                losses: 18,
                win_ratio: 64.0 / 82.0,
            }],
        )
    }

    fn engine() -> QueryEngine {
        QueryEngine::new(&Config::default())
    }

    #[test]
    fn scoring_top_three_in_order() {
        let answer = engine().resolve(&fixture(), "2023-24 시즌 득점 TOP 3 선수는?");
        match answer {
            Answer::Ranking { season, stat, entries } => {
                assert_eq!(season, "2023-24");
                assert_eq!(stat, StatKey::Points);
                assert_eq!(
                    entries.iter().map(|e| e.player.as_str()).collect::<Vec<_>>(),
                    vec!["Campbell", "Bell", "Archer"]
                );
                assert_eq!(entries.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
            }
            other => panic!("expected ranking answer, got {other:?}"),
        }
    }

    #[test]
    fn missing_player_is_not_found_not_unrecognized() {
        let answer = engine().resolve(&fixture(), "2023-24 시즌 없는선수 주요 기록은?");
        match answer {
            Answer::NotFound { message } => assert!(message.contains("없는선수")),
            other => panic!("expected not-found answer, got {other:?}"),
        }
    }

    #[test]
    fn gibberish_is_unrecognized() {
        let answer = engine().resolve(&fixture(), "오늘 저녁 뭐 먹지?");
        assert!(matches!(answer, Answer::Unrecognized { .. }));
    }

    #[test]
    fn empty_store_always_reports_data_unavailable() {
        let store = DataStore::empty();
        let engine = engine();
        for question in ["득점 top 3", "campbell 기록", "동부 1위 팀은?", "아무말"] {
            let answer = engine.resolve(&store, question);
            assert_eq!(
                answer,
                Answer::DataUnavailable {
                    message: DATA_UNAVAILABLE_MESSAGE.to_string()
                }
            );
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let store = fixture();
        let engine = engine();
        let first = engine.resolve(&store, "2023-24 시즌 득점 TOP 3 선수는?");
        let second = engine.resolve(&store, "2023-24 시즌 득점 TOP 3 선수는?");
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn player_stat_line_renders_fixed_precision() {
        let answer = engine().resolve(&fixture(), "campbell 기록 알려줘");
        let text = answer.render();
        assert!(text.contains("Campbell"));
        assert!(text.contains("평균 득점 (PTS): 30.0"));
        assert!(text.contains("야투율 (FG%): 0.51"));
    }

    #[test]
    fn player_rank_uses_dense_ranking() {
        let answer = engine().resolve(&fixture(), "bell 득점 순위는?");
        match answer {
            Answer::PlayerRank { result, .. } => {
                assert_eq!(result.player, "Bell");
                assert_eq!(result.rank, 2);
            }
            other => panic!("expected player-rank answer, got {other:?}"),
        }
    }

    #[test]
    fn east_leader_lookup() {
        let answer = engine().resolve(&fixture(), "2023-24 시즌 동부 1위 팀은?");
        match answer {
            Answer::TeamStanding { record } => assert_eq!(record.abbreviation, "BOS"),
            other => panic!("expected standing answer, got {other:?}"),
        }
        let answer = engine().resolve(&fixture(), "서부 1위 팀은?");
        assert!(matches!(answer, Answer::NotFound { .. }));
    }

    #[test]
    fn roster_answer_lists_team_players() {
        let answer = engine().resolve(&fixture(), "보스턴 선수 명단 알려줘");
        match answer {
            Answer::Roster { team, players, .. } => {
                assert_eq!(team, "BOS");
                assert_eq!(players.len(), 1);
                assert_eq!(players[0].player, "Campbell");
            }
            other => panic!("expected roster answer, got {other:?}"),
        }
    }

    #[test]
    fn ranking_defaults_to_configured_top_n() {
        let store = DataStore::from_rows(
            (0..8)
                .map(|i| player(&format!("Player{i}"), "BOS", 70, 20.0 + i as f64))
                .collect(),
            vec![],
        );
        let answer = engine().resolve(&store, "득점 순위 알려줘");
        match answer {
            Answer::Ranking { entries, .. } => assert_eq!(entries.len(), 5),
            other => panic!("expected ranking answer, got {other:?}"),
        }
    }
}
