//! Static franchise table: full names, abbreviations, and the query-text
//! keywords (Korean nicknames plus lowercase English) that map to each team.

pub struct TeamEntry {
    pub name: &'static str,
    pub abbr: &'static str,
    pub keywords: &'static [&'static str],
}

pub static NBA_TEAMS: &[TeamEntry] = &[
    TeamEntry { name: "Atlanta Hawks", abbr: "ATL", keywords: &["애틀랜타", "호크스", "hawks"] },
    TeamEntry { name: "Boston Celtics", abbr: "BOS", keywords: &["보스턴", "셀틱스", "celtics"] },
    TeamEntry { name: "Brooklyn Nets", abbr: "BRK", keywords: &["브루클린", "네츠", "nets"] },
    TeamEntry { name: "Charlotte Hornets", abbr: "CHO", keywords: &["샬럿", "호네츠", "hornets"] },
    TeamEntry { name: "Chicago Bulls", abbr: "CHI", keywords: &["시카고", "불스", "bulls"] },
    TeamEntry { name: "Cleveland Cavaliers", abbr: "CLE", keywords: &["클리블랜드", "캐벌리어스", "cavaliers"] },
    TeamEntry { name: "Dallas Mavericks", abbr: "DAL", keywords: &["댈러스", "매버릭스", "mavericks"] },
    TeamEntry { name: "Denver Nuggets", abbr: "DEN", keywords: &["덴버", "너기츠", "nuggets"] },
    TeamEntry { name: "Detroit Pistons", abbr: "DET", keywords: &["디트로이트", "피스톤스", "pistons"] },
    TeamEntry { name: "Golden State Warriors", abbr: "GSW", keywords: &["골든스테이트", "워리어스", "warriors"] },
    TeamEntry { name: "Houston Rockets", abbr: "HOU", keywords: &["휴스턴", "로케츠", "rockets"] },
    TeamEntry { name: "Indiana Pacers", abbr: "IND", keywords: &["인디애나", "페이서스", "pacers"] },
    TeamEntry { name: "Los Angeles Clippers", abbr: "LAC", keywords: &["클리퍼스", "clippers"] },
    TeamEntry { name: "Los Angeles Lakers", abbr: "LAL", keywords: &["레이커스", "lakers"] },
    TeamEntry { name: "Memphis Grizzlies", abbr: "MEM", keywords: &["멤피스", "그리즐리스", "grizzlies"] },
    TeamEntry { name: "Miami Heat", abbr: "MIA", keywords: &["마이애미", "히트", "heat"] },
    TeamEntry { name: "Milwaukee Bucks", abbr: "MIL", keywords: &["밀워키", "벅스", "bucks"] },
    TeamEntry { name: "Minnesota Timberwolves", abbr: "MIN", keywords: &["미네소타", "팀버울브스", "timberwolves"] },
    TeamEntry { name: "New Orleans Pelicans", abbr: "NOP", keywords: &["뉴올리언스", "펠리컨스", "pelicans"] },
    TeamEntry { name: "New York Knicks", abbr: "NYK", keywords: &["뉴욕", "닉스", "knicks"] },
    TeamEntry { name: "Oklahoma City Thunder", abbr: "OKC", keywords: &["오클라호마", "썬더", "thunder"] },
    TeamEntry { name: "Orlando Magic", abbr: "ORL", keywords: &["올랜도", "매직", "magic"] },
    TeamEntry { name: "Philadelphia 76ers", abbr: "PHI", keywords: &["필라델피아", "세븐티식서스", "76ers"] },
    TeamEntry { name: "Phoenix Suns", abbr: "PHO", keywords: &["피닉스", "선즈", "suns"] },
    TeamEntry { name: "Portland Trail Blazers", abbr: "POR", keywords: &["포틀랜드", "블레이저스", "blazers"] },
    TeamEntry { name: "Sacramento Kings", abbr: "SAC", keywords: &["새크라멘토", "킹스", "kings"] },
    TeamEntry { name: "San Antonio Spurs", abbr: "SAS", keywords: &["샌안토니오", "스퍼스", "spurs"] },
    TeamEntry { name: "Toronto Raptors", abbr: "TOR", keywords: &["토론토", "랩터스", "raptors"] },
    TeamEntry { name: "Utah Jazz", abbr: "UTA", keywords: &["유타", "재즈", "jazz"] },
    TeamEntry { name: "Washington Wizards", abbr: "WAS", keywords: &["워싱턴", "위저즈", "wizards"] },
];

/// Abbreviation for a full franchise name, case-insensitive.
pub fn abbreviation_for(name: &str) -> Option<&'static str> {
    let wanted = name.trim();
    NBA_TEAMS
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(wanted))
        .map(|entry| entry.abbr)
}

/// Find a team keyword inside (lowercased) query text.
pub fn find_in_text(text: &str) -> Option<(&'static str, &'static str)> {
    NBA_TEAMS
        .iter()
        .find(|entry| entry.keywords.iter().any(|kw| text.contains(kw)))
        .map(|entry| (entry.abbr, entry.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_thirty_franchises() {
        assert_eq!(NBA_TEAMS.len(), 30);
    }

    #[test]
    fn abbreviation_lookup() {
        assert_eq!(abbreviation_for("Boston Celtics"), Some("BOS"));
        assert_eq!(abbreviation_for("los angeles lakers"), Some("LAL"));
        assert_eq!(abbreviation_for("Seoul SK Knights"), None);
    }

    #[test]
    fn keyword_lookup_in_text() {
        assert_eq!(find_in_text("레이커스 선수 명단 알려줘"), Some(("LAL", "Los Angeles Lakers")));
        assert_eq!(find_in_text("celtics roster"), Some(("BOS", "Boston Celtics")));
        assert_eq!(find_in_text("우리 동네 농구팀"), None);
    }
}
