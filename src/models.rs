use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Upstream API types. The shapes are owned by the league API, not by us; we
// only type the fields the templates actually read. Everything else stays an
// opaque `Value` and is passed straight through to the page.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub team_name: String,
    pub owner: String,
    pub rank: Option<i32>,
    pub wins: i32,
    pub losses: i32,
    #[serde(default)]
    pub ties: i32,
    pub points_for: f64,
    pub points_against: f64,
    pub season_year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Champion {
    pub year: i32,
    pub team: String,
    pub owner: String,
    pub record: String,
    pub points_for: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manager {
    pub name: String,
    pub all_time_record: String,
    pub total_wins: i32,
    pub total_losses: i32,
    pub championships: i32,
    pub playoff_appearances: i32,
    pub avg_points_for: f64,
    pub seasons_played: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagerProfile {
    pub name: String,
    pub all_time_record: String,
    pub total_wins: i32,
    pub total_losses: i32,
    pub championships: i32,
    pub playoff_appearances: i32,
    pub avg_points_for: f64,
    pub seasons_played: i32,
    #[serde(default)]
    pub season_history: Vec<ManagerSeason>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagerSeason {
    pub season_year: i32,
    pub team_name: String,
    pub rank: Option<i32>,
    pub wins: i32,
    pub losses: i32,
    pub points_for: f64,
    pub points_against: f64,
}

/// All-time record entry. `year` is free text upstream ("2023", "2019, 2021",
/// "All-Time"), so it stays a string.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueRecord {
    pub category: String,
    pub value: String,
    pub holder: String,
    pub year: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Matchup {
    pub week: i32,
    pub home_team: String,
    pub home_score: f64,
    pub away_team: String,
    pub away_score: f64,
    pub bracket_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Response envelopes: every endpoint wraps its payload in a single named
// field.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SeasonsEnvelope {
    pub seasons: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct TeamsEnvelope {
    pub teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
pub struct ChampionsEnvelope {
    pub champions: Vec<Champion>,
}

#[derive(Debug, Deserialize)]
pub struct ManagersEnvelope {
    pub managers: Vec<Manager>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsEnvelope {
    pub records: Vec<LeagueRecord>,
}

#[derive(Debug, Deserialize)]
pub struct MatchupsEnvelope {
    pub year: i32,
    pub week: Option<i32>,
    #[serde(default)]
    pub max_week: i32,
    pub matchups: Vec<Matchup>,
}

#[derive(Debug, Deserialize)]
pub struct RivalriesEnvelope {
    #[serde(default)]
    pub rivalries: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WeeklyResultsEnvelope {
    #[serde(default)]
    pub weekly_results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct LuckEnvelope {
    #[serde(default)]
    pub luck_rankings: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Legacy D/ST stats payload: per-week lines plus per-season totals, keyed by
// season year. Stat fields default to zero when absent.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DstStats {
    pub viewing_season: Option<i32>,
    #[serde(default)]
    pub seasons_data: BTreeMap<i32, Vec<DstWeekLine>>,
    #[serde(default)]
    pub season_totals: BTreeMap<i32, DstSeasonTotals>,
    #[serde(default)]
    pub weekly_stats: Vec<DstWeekLine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DstWeekLine {
    #[serde(default)]
    pub week: i32,
    pub opponent_team: Option<String>,
    #[serde(default)]
    pub def_sacks: f64,
    #[serde(default)]
    pub def_interceptions: f64,
    #[serde(default)]
    pub def_fumbles_recovered: f64,
    #[serde(default)]
    pub def_fumbles_forced: f64,
    #[serde(default)]
    pub def_touchdowns: f64,
    #[serde(default)]
    pub special_teams_tds: f64,
    #[serde(default)]
    pub def_safeties: f64,
    #[serde(default)]
    pub points_allowed: f64,
    #[serde(default)]
    pub fantasy_points_ppr: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DstSeasonTotals {
    #[serde(default)]
    pub games: i32,
    #[serde(default)]
    pub def_sacks: f64,
    #[serde(default)]
    pub def_interceptions: f64,
    #[serde(default)]
    pub def_fumbles_recovered: f64,
    #[serde(default)]
    pub def_touchdowns: f64,
    #[serde(default)]
    pub special_teams_tds: f64,
    #[serde(default)]
    pub def_safeties: f64,
    #[serde(default)]
    pub points_allowed: f64,
    #[serde(default)]
    pub avg_points_allowed: f64,
    #[serde(default)]
    pub fantasy_points_ppr: f64,
}

// ---------------------------------------------------------------------------
// Page data: what each loader hands to its template. The Default impls double
// as the fallback shape when the upstream fetch fails.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub seasons: Vec<i32>,
    pub champions: Vec<Champion>,
    pub managers: Vec<Manager>,
    pub latest_standings: Vec<Team>,
    pub latest_year: i32,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryPage {
    pub years: Vec<i32>,
    pub standings: Vec<Team>,
    pub selected_year: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ChampionsPage {
    pub champions: Vec<Champion>,
}

#[derive(Debug, Clone, Default)]
pub struct ManagersPage {
    pub managers: Vec<Manager>,
}

#[derive(Debug, Clone, Default)]
pub struct ManagerPage {
    pub manager: Option<ManagerProfile>,
    pub rivalries: Vec<Value>,
    pub weekly_results: Vec<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TidbitsPage {
    pub luck: Vec<Value>,
    pub records: Vec<LeagueRecord>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordsPage {
    pub records: Vec<LeagueRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchupsPage {
    pub year: i32,
    pub week: Option<i32>,
    pub max_week: i32,
    pub matchups: Vec<Matchup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_ties_default_to_zero() {
        let team: Team = serde_json::from_value(serde_json::json!({
            "team_name": "Inferno",
            "owner": "Blaze Runner",
            "rank": 1,
            "wins": 10,
            "losses": 4,
            "points_for": 1543.2,
            "points_against": 1320.8,
            "season_year": 2024
        }))
        .unwrap();
        assert_eq!(team.ties, 0);
        assert_eq!(team.rank, Some(1));
    }

    #[test]
    fn dst_stats_season_keys_parse_from_strings() {
        let stats: DstStats = serde_json::from_value(serde_json::json!({
            "viewing_season": 2022,
            "seasons_data": {
                "2022": [{"week": 3, "points_allowed": 17}]
            },
            "season_totals": {
                "2022": {"games": 1, "def_sacks": 2.0}
            },
            "weekly_stats": [{"week": 3}]
        }))
        .unwrap();
        let lines = stats.seasons_data.get(&2022).unwrap();
        assert_eq!(lines[0].week, 3);
        assert_eq!(lines[0].points_allowed, 17.0);
        assert_eq!(lines[0].def_sacks, 0.0);
        assert_eq!(stats.season_totals.get(&2022).unwrap().games, 1);
    }
}
