use anyhow::Result;

use crate::config::Config;
use crate::models::StatKey;
use crate::services::QueryEngine;
use crate::store::{self, DataStore};

fn load_store(config: &Config) -> DataStore {
    store::load_or_empty(&config.player_csv(), &config.standings_csv())
}

pub fn ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let store = load_store(config);
    let engine = QueryEngine::new(config);

    let answer = engine.resolve(&store, question);
    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("❓ {}", question);
        println!();
        println!("{}", answer.render());
    }

    Ok(())
}

pub fn list_players(config: &Config) -> Result<()> {
    let store = load_store(config);

    if store.player_names().is_empty() {
        println!("📭 선수 데이터가 없습니다. data 폴더의 per_game.csv를 확인해주세요.");
        return Ok(());
    }

    println!("📋 등록된 선수 ({}명):", store.player_names().len());
    for name in store.player_names() {
        println!("   • {}", name);
    }

    Ok(())
}

pub fn show_ranking(
    config: &Config,
    stat_label: &str,
    season: Option<&str>,
    count: usize,
) -> Result<()> {
    let store = load_store(config);

    let stat = match StatKey::from_label(stat_label) {
        Some(stat) => stat,
        None => {
            println!(
                "❌ 알 수 없는 스탯입니다: '{}'. 득점/리바운드/어시스트/스틸/블록/야투/3점 중 하나를 사용하세요.",
                stat_label
            );
            return Ok(());
        }
    };

    let season = match season {
        Some(s) => s.to_string(),
        None => match store.latest_season() {
            Some(s) => s.to_string(),
            None => {
                println!("📭 데이터가 로드되지 않았습니다.");
                return Ok(());
            }
        },
    };

    let entries = store.top_n_by_season(&season, stat, count.max(1));
    if entries.is_empty() {
        println!("📭 {} 시즌 {} 순위를 계산할 데이터가 없습니다.", season, stat.label());
        return Ok(());
    }

    println!("🏆 {} 시즌 {} TOP {}:", season, stat.label(), entries.len());
    for entry in &entries {
        println!(
            "{}. {} ({}) | {} {}",
            entry.rank,
            entry.player,
            entry.team,
            stat.label(),
            stat.format(entry.value)
        );
    }

    Ok(())
}
