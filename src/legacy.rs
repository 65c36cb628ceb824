//! Legacy D/ST dashboard tables, kept for the old stats pages: pre-aggregated
//! defense/special-teams JSON in, HTML strings out.

use crate::models::{DstSeasonTotals, DstStats};
use crate::ui::escape;
use std::fmt::Write as _;

/// Current-season view: a totals summary strip followed by one row per week,
/// sorted by week ascending.
pub fn render_current_season(stats: &DstStats, default_season: i32) -> String {
    let season = stats.viewing_season.unwrap_or(default_season);
    let mut lines = stats.seasons_data.get(&season).cloned().unwrap_or_default();

    if lines.is_empty() {
        return format!(
            r#"<div class="no-data-message">No stats available for {season} season</div>"#
        );
    }

    let totals = stats.season_totals.get(&season).cloned().unwrap_or_default();

    let mut html = String::from(r#"<div class="season-summary">"#);
    for (label, value) in summary_items(&totals) {
        let _ = write!(
            html,
            r#"<div class="season-summary-item"><div class="season-summary-label">{label}</div><div class="season-summary-value">{value}</div></div>"#
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<table class="stats-table"><thead><tr>"#);
    html.push_str(
        "<th>Week</th><th>Opp</th><th>Sacks</th><th>INTs</th><th>Fum Rec</th>\
         <th>Fum Forced</th><th>Def TDs</th><th>ST TDs</th><th>Safeties</th>\
         <th>Pts Allowed</th><th>Fant Pts</th>",
    );
    html.push_str("</tr></thead><tbody>");

    lines.sort_by_key(|line| line.week);
    for line in &lines {
        let opponent = line
            .opponent_team
            .as_deref()
            .map(escape)
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            html,
            "<tr><td><strong>{week}</strong></td><td>{opponent}</td><td>{sacks}</td>\
             <td>{ints}</td><td>{fum_rec}</td><td>{fum_forced}</td><td>{def_tds}</td>\
             <td>{st_tds}</td><td>{safeties}</td><td>{pts_allowed}</td>\
             <td><strong>{fantasy:.1}</strong></td></tr>",
            week = line.week,
            sacks = line.def_sacks,
            ints = line.def_interceptions,
            fum_rec = line.def_fumbles_recovered,
            fum_forced = line.def_fumbles_forced,
            def_tds = line.def_touchdowns,
            st_tds = line.special_teams_tds,
            safeties = line.def_safeties,
            pts_allowed = line.points_allowed,
            fantasy = line.fantasy_points_ppr,
        );
    }

    html.push_str("</tbody></table>");
    html
}

/// Career view: one row per season, newest season first.
pub fn render_career(stats: &DstStats) -> String {
    if stats.weekly_stats.is_empty() {
        return r#"<div class="no-data-message">No career stats available</div>"#.to_string();
    }

    let mut html =
        String::from(r#"<div class="career-heading"><h3>Career Summary by Season</h3></div>"#);
    html.push_str(r#"<table class="stats-table"><thead><tr>"#);
    html.push_str(
        "<th>Season</th><th>Games</th><th>Sacks</th><th>INTs</th><th>Fum Rec</th>\
         <th>Def TDs</th><th>ST TDs</th><th>Safeties</th><th>Pts Allowed</th>\
         <th>Fant Pts (PPR)</th>",
    );
    html.push_str("</tr></thead><tbody>");

    for (season, totals) in stats.season_totals.iter().rev() {
        let _ = write!(
            html,
            "<tr><td><strong>{season}</strong></td><td>{games}</td><td>{sacks}</td>\
             <td>{ints}</td><td>{fum_rec}</td><td>{def_tds}</td><td>{st_tds}</td>\
             <td>{safeties}</td><td>{pts_allowed} ({avg:.1} avg)</td>\
             <td><strong>{fantasy:.1}</strong></td></tr>",
            games = totals.games,
            sacks = totals.def_sacks,
            ints = totals.def_interceptions,
            fum_rec = totals.def_fumbles_recovered,
            def_tds = totals.def_touchdowns,
            st_tds = totals.special_teams_tds,
            safeties = totals.def_safeties,
            pts_allowed = totals.points_allowed,
            avg = totals.avg_points_allowed,
            fantasy = totals.fantasy_points_ppr,
        );
    }

    html.push_str("</tbody></table>");
    html
}

fn summary_items(totals: &DstSeasonTotals) -> [(&'static str, String); 7] {
    [
        ("Games", totals.games.to_string()),
        ("Sacks", totals.def_sacks.to_string()),
        ("INTs", totals.def_interceptions.to_string()),
        ("Fumbles Rec", totals.def_fumbles_recovered.to_string()),
        ("Def TDs", totals.def_touchdowns.to_string()),
        ("ST TDs", totals.special_teams_tds.to_string()),
        ("Pts Allowed", totals.points_allowed.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DstWeekLine;

    fn week(week: i32, fantasy: f64) -> DstWeekLine {
        DstWeekLine {
            week,
            opponent_team: Some(format!("OPP{week}")),
            fantasy_points_ppr: fantasy,
            ..DstWeekLine::default()
        }
    }

    #[test]
    fn empty_season_renders_no_data_message() {
        let html = render_current_season(&DstStats::default(), 2024);
        assert!(html.contains("No stats available for 2024 season"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn current_season_rows_sorted_by_week_ascending() {
        let mut stats = DstStats {
            viewing_season: Some(2022),
            ..DstStats::default()
        };
        stats
            .seasons_data
            .insert(2022, vec![week(9, 12.0), week(2, 4.5), week(5, 8.0)]);

        let html = render_current_season(&stats, 2024);
        let pos2 = html.find("<strong>2</strong>").unwrap();
        let pos5 = html.find("<strong>5</strong>").unwrap();
        let pos9 = html.find("<strong>9</strong>").unwrap();
        assert!(pos2 < pos5 && pos5 < pos9);
        assert_eq!(html.matches("<tr>").count(), 1 + 3); // header + 3 weeks
    }

    #[test]
    fn current_season_formats_fantasy_points_to_one_decimal() {
        let mut stats = DstStats {
            viewing_season: Some(2022),
            ..DstStats::default()
        };
        stats.seasons_data.insert(2022, vec![week(1, 7.0)]);

        let html = render_current_season(&stats, 2024);
        assert!(html.contains("<strong>7.0</strong>"));
    }

    #[test]
    fn career_rows_sorted_by_season_descending() {
        let mut stats = DstStats {
            weekly_stats: vec![week(1, 3.0)],
            ..DstStats::default()
        };
        for year in [2020, 2022, 2021] {
            stats.season_totals.insert(
                year,
                DstSeasonTotals {
                    games: 17,
                    avg_points_allowed: 20.25,
                    ..DstSeasonTotals::default()
                },
            );
        }

        let html = render_career(&stats);
        let pos22 = html.find("<strong>2022</strong>").unwrap();
        let pos21 = html.find("<strong>2021</strong>").unwrap();
        let pos20 = html.find("<strong>2020</strong>").unwrap();
        assert!(pos22 < pos21 && pos21 < pos20);
        assert!(html.contains("(20.2 avg)") || html.contains("(20.3 avg)"));
    }

    #[test]
    fn career_without_weekly_stats_renders_no_data_message() {
        let html = render_career(&DstStats::default());
        assert!(html.contains("No career stats available"));
    }
}
