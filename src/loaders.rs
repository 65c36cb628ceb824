use crate::client::{ApiClient, FetchError};
use crate::models::{
    ChampionsEnvelope, ChampionsPage, DstStats, HistoryPage, HomePage, LuckEnvelope,
    ManagerPage, ManagerProfile, ManagersEnvelope, ManagersPage, MatchupsEnvelope, MatchupsPage,
    RecordsEnvelope, RecordsPage, RivalriesEnvelope, SeasonsEnvelope, TeamsEnvelope,
    TidbitsPage, WeeklyResultsEnvelope,
};
use tracing::warn;

/// Season used when the upstream can't tell us which year is current.
pub const FALLBACK_SEASON: i32 = 2024;

// Every loader follows the same contract: fetch what the page needs (in
// parallel where the requests are independent), reshape, and on ANY failure
// log and hand back the default shape. Pages render; they never 500 because
// the stats API was down.

pub async fn load_home(api: &ApiClient) -> HomePage {
    match try_load_home(api).await {
        Ok(page) => page,
        Err(err) => {
            warn!("home loader failed: {err}");
            HomePage {
                latest_year: FALLBACK_SEASON,
                ..HomePage::default()
            }
        }
    }
}

async fn try_load_home(api: &ApiClient) -> Result<HomePage, FetchError> {
    let (seasons, champions, managers) = tokio::join!(
        api.get_json::<SeasonsEnvelope>(&["seasons"], &[]),
        api.get_json::<ChampionsEnvelope>(&["champions"], &[]),
        api.get_json::<ManagersEnvelope>(&["managers"], &[]),
    );
    let seasons = seasons?.seasons;
    let champions = champions?.champions;
    let managers = managers?.managers;

    // Seasons arrive newest-first; the head is the season to show standings for.
    let latest_year = seasons.first().copied().unwrap_or(FALLBACK_SEASON);
    let latest_standings = api
        .get_json::<TeamsEnvelope>(&["teams"], &[("year", latest_year.to_string())])
        .await?
        .teams;

    Ok(HomePage {
        seasons,
        champions,
        managers,
        latest_standings,
        latest_year,
    })
}

pub async fn load_history(api: &ApiClient, season: Option<i32>) -> HistoryPage {
    let selected_year = season.unwrap_or(FALLBACK_SEASON);
    let teams_query = [("year", selected_year.to_string())];
    let (seasons, teams) = tokio::join!(
        api.get_json::<SeasonsEnvelope>(&["seasons"], &[]),
        api.get_json::<TeamsEnvelope>(&["teams"], &teams_query),
    );

    match (seasons, teams) {
        (Ok(seasons), Ok(teams)) => HistoryPage {
            years: seasons.seasons,
            standings: teams.teams,
            selected_year,
        },
        (seasons, teams) => {
            if let Some(err) = seasons.err().or_else(|| teams.err()) {
                warn!("history loader failed: {err}");
            }
            HistoryPage {
                selected_year,
                ..HistoryPage::default()
            }
        }
    }
}

pub async fn load_champions(api: &ApiClient) -> ChampionsPage {
    match api.get_json::<ChampionsEnvelope>(&["champions"], &[]).await {
        Ok(envelope) => ChampionsPage {
            champions: envelope.champions,
        },
        Err(err) => {
            warn!("champions loader failed: {err}");
            ChampionsPage::default()
        }
    }
}

pub async fn load_managers(api: &ApiClient) -> ManagersPage {
    match api.get_json::<ManagersEnvelope>(&["managers"], &[]).await {
        Ok(envelope) => ManagersPage {
            managers: envelope.managers,
        },
        Err(err) => {
            warn!("managers loader failed: {err}");
            ManagersPage::default()
        }
    }
}

/// Manager detail: the profile decides the page; rivalry and weekly-result
/// fetches degrade to empty lists on their own.
pub async fn load_manager(api: &ApiClient, name: &str) -> ManagerPage {
    let manager_seg = ["manager", name];
    let rivalries_seg = ["rivalries", name];
    let weekly_seg = ["weekly-results", name];
    let (profile, rivalries, weekly) = tokio::join!(
        api.get_json::<ManagerProfile>(&manager_seg, &[]),
        api.get_json::<RivalriesEnvelope>(&rivalries_seg, &[]),
        api.get_json::<WeeklyResultsEnvelope>(&weekly_seg, &[]),
    );

    let profile = match profile {
        Ok(profile) => profile,
        Err(err) if err.is_not_found() => {
            return ManagerPage {
                error: Some("Manager not found".to_string()),
                ..ManagerPage::default()
            };
        }
        Err(err) => {
            warn!("manager loader failed for {name:?}: {err}");
            return ManagerPage {
                error: Some("Failed to load manager data".to_string()),
                ..ManagerPage::default()
            };
        }
    };

    ManagerPage {
        manager: Some(profile),
        rivalries: rivalries.map(|r| r.rivalries).unwrap_or_default(),
        weekly_results: weekly.map(|w| w.weekly_results).unwrap_or_default(),
        error: None,
    }
}

pub async fn load_tidbits(api: &ApiClient) -> TidbitsPage {
    let (luck, records) = tokio::join!(
        api.get_json::<LuckEnvelope>(&["luck"], &[]),
        api.get_json::<RecordsEnvelope>(&["records"], &[]),
    );

    let both_failed = luck.is_err() && records.is_err();
    if let Err(err) = &luck {
        warn!("luck fetch failed: {err}");
    }
    if let Err(err) = &records {
        warn!("records fetch failed: {err}");
    }

    TidbitsPage {
        luck: luck.map(|l| l.luck_rankings).unwrap_or_default(),
        records: records.map(|r| r.records).unwrap_or_default(),
        error: both_failed.then(|| "Failed to load data".to_string()),
    }
}

pub async fn load_records(api: &ApiClient) -> RecordsPage {
    match api.get_json::<RecordsEnvelope>(&["records"], &[]).await {
        Ok(envelope) => RecordsPage {
            records: envelope.records,
        },
        Err(err) => {
            warn!("records loader failed: {err}");
            RecordsPage::default()
        }
    }
}

pub async fn load_matchups(api: &ApiClient, year: Option<i32>, week: Option<i32>) -> MatchupsPage {
    let year = year.unwrap_or(FALLBACK_SEASON);
    let mut query = vec![("year", year.to_string())];
    if let Some(week) = week {
        query.push(("week", week.to_string()));
    }

    match api
        .get_json::<MatchupsEnvelope>(&["matchups"], &query)
        .await
    {
        Ok(envelope) => MatchupsPage {
            year: envelope.year,
            week: envelope.week,
            max_week: envelope.max_week,
            matchups: envelope.matchups,
        },
        Err(err) => {
            warn!("matchups loader failed: {err}");
            MatchupsPage {
                year,
                week,
                ..MatchupsPage::default()
            }
        }
    }
}

/// Feeds the legacy D/ST dashboard. The empty shape renders as "no data".
pub async fn load_dst_stats(api: &ApiClient, team: &str, season: Option<i32>) -> DstStats {
    let mut query = Vec::new();
    if let Some(season) = season {
        query.push(("season", season.to_string()));
    }

    match api
        .get_json::<DstStats>(&["player-stats", team], &query)
        .await
    {
        Ok(stats) => stats,
        Err(err) => {
            warn!("dst stats loader failed for {team:?}: {err}");
            DstStats::default()
        }
    }
}
