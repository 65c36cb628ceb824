use crate::effects::{float, ripple, spark, StyleRegistry};
use crate::models::{
    Champion, ChampionsPage, HistoryPage, HomePage, LeagueRecord, ManagerPage, ManagersPage,
    MatchupsPage, RecordsPage, Team, TidbitsPage,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use std::fmt::Write as _;

const NAV_ITEMS: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/history", "History"),
    ("/champions", "Champions"),
    ("/managers", "Managers"),
    ("/matchups", "Matchups"),
    ("/records", "Records"),
    ("/tidbits", "Tidbits"),
];

/// Characters that must not appear raw in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

fn manager_href(name: &str) -> String {
    escape(&format!("/manager/{}", encode_segment(name)))
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

fn effect_styles() -> String {
    let defaults = float::FloatOptions::default();
    let mut styles = StyleRegistry::new();
    styles.insert(float::STYLE_ID, &float::keyframes(defaults));
    styles.insert(
        "float-binding",
        &format!(".float {{ animation: {}; }}", float::animation(defaults)),
    );
    styles.insert(ripple::STYLE_ID, ripple::KEYFRAMES);
    styles.insert(
        "ripple-binding",
        &format!(
            ".ripple-host {{ position: relative; overflow: hidden; }}\n\
             .ripple {{ position: absolute; border-radius: 50%; transform: scale(0); \
             background: radial-gradient(circle, rgba(79, 172, 254, 0.4) 0%, transparent 70%); \
             animation: ripple-effect {}ms ease-out forwards; pointer-events: none; z-index: 1; }}",
            ripple::DURATION_MS
        ),
    );
    styles.insert(spark::OVERLAY_STYLE_ID, spark::OVERLAY_CSS);
    styles.css().to_string()
}

fn nav(active: &str) -> String {
    let mut html = String::new();
    for (href, label) in NAV_ITEMS {
        let class = if href == active {
            "ripple-host active"
        } else {
            "ripple-host"
        };
        let _ = write!(html, r#"<a class="{class}" href="{href}">{label}</a>"#);
    }
    html
}

fn page(title: &str, active: &str, content: &str, extra_css: &str) -> String {
    SHELL
        .replace("{{TITLE}}", &escape(title))
        .replace("{{NAV}}", &nav(active))
        .replace("{{EFFECT_CSS}}", &format!("{}\n{extra_css}", effect_styles()))
        .replace("{{CONTENT}}", content)
}

fn no_data(message: &str) -> String {
    format!(r#"<div class="no-data-message">{}</div>"#, escape(message))
}

fn error_banner(error: Option<&str>) -> String {
    match error {
        Some(error) => format!(r#"<div class="error-banner">{}</div>"#, escape(error)),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Shared fragments
// ---------------------------------------------------------------------------

fn standings_table(teams: &[Team]) -> String {
    if teams.is_empty() {
        return no_data("No standings available");
    }

    let mut html = String::from(
        r#"<table class="data-table"><thead><tr><th>Rank</th><th>Team</th><th>Manager</th><th>W</th><th>L</th><th>T</th><th>PF</th><th>PA</th></tr></thead><tbody>"#,
    );
    for team in teams {
        let rank = team
            .rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            html,
            "<tr class=\"ripple-host\"><td>{rank}</td><td>{team}</td>\
             <td><a href=\"{href}\">{owner}</a></td><td>{wins}</td><td>{losses}</td>\
             <td>{ties}</td><td>{pf:.1}</td><td>{pa:.1}</td></tr>",
            team = escape(&team.team_name),
            href = manager_href(&team.owner),
            owner = escape(&team.owner),
            wins = team.wins,
            losses = team.losses,
            ties = team.ties,
            pf = team.points_for,
            pa = team.points_against,
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn champions_table(champions: &[Champion]) -> String {
    if champions.is_empty() {
        return no_data("No champions recorded yet");
    }

    let mut html = String::from(
        r#"<table class="data-table"><thead><tr><th>Year</th><th>Team</th><th>Manager</th><th>Record</th><th>PF</th></tr></thead><tbody>"#,
    );
    for champion in champions {
        let _ = write!(
            html,
            "<tr class=\"ripple-host\"><td><strong>{year}</strong></td><td>{team}</td>\
             <td><a href=\"{href}\">{owner}</a></td><td>{record}</td><td>{pf:.1}</td></tr>",
            year = champion.year,
            team = escape(&champion.team),
            href = manager_href(&champion.owner),
            owner = escape(&champion.owner),
            record = escape(&champion.record),
            pf = champion.points_for,
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn records_table(records: &[LeagueRecord]) -> String {
    if records.is_empty() {
        return no_data("No records available");
    }

    let mut html = String::from(
        r#"<table class="data-table"><thead><tr><th>Record</th><th>Value</th><th>Holder</th><th>Year</th></tr></thead><tbody>"#,
    );
    for record in records {
        let _ = write!(
            html,
            "<tr><td>{category}</td><td><strong>{value}</strong></td><td>{holder}</td><td>{year}</td></tr>",
            category = escape(&record.category),
            value = escape(&record.value),
            holder = escape(&record.holder),
            year = escape(&record.year),
        );
    }
    html.push_str("</tbody></table>");
    html
}

/// Rivalries, weekly results, and luck rankings are opaque upstream shapes;
/// show them as generic fact lists instead of guessing a schema.
fn opaque_list(items: &[Value], empty_message: &str) -> String {
    if items.is_empty() {
        return no_data(empty_message);
    }

    let mut html = String::from(r#"<ul class="fact-list">"#);
    for item in items {
        match item {
            Value::Object(fields) => {
                html.push_str("<li>");
                for (index, (key, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        html.push_str(" &middot; ");
                    }
                    let _ = write!(
                        html,
                        r#"<span class="fact-key">{}</span> {}"#,
                        escape(key),
                        escape(&value_text(value))
                    );
                }
                html.push_str("</li>");
            }
            other => {
                let _ = write!(html, "<li>{}</li>", escape(&value_text(other)));
            }
        }
    }
    html.push_str("</ul>");
    html
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

pub fn render_home(data: &HomePage) -> String {
    let mut content = String::new();

    let reigning = data.champions.first();
    let champion_name = reigning
        .map(|champion| escape(&champion.owner))
        .unwrap_or_else(|| "TBD".to_string());
    let champion_year = reigning
        .map(|champion| champion.year.to_string())
        .unwrap_or_else(|| "-".to_string());

    // The champion card burns: precomputed spark burst, seeded off the year
    // so the markup is stable across reloads.
    let seed = reigning.map(|champion| champion.year as u64).unwrap_or(0);
    let overlay = spark::hover_overlay("champ", 260.0, 110.0, seed);

    let _ = write!(
        content,
        r#"<section class="cards">
<div class="card float spark-host">{overlay_markup}<span class="label">Reigning Champion</span><span class="value">{champion_name}</span><span class="sub">{champion_year}</span></div>
<div class="card float"><span class="label">Seasons Played</span><span class="value">{seasons}</span><span class="sub">since {first_year}</span></div>
<div class="card float"><span class="label">Managers</span><span class="value">{managers}</span><span class="sub">all-time</span></div>
</section>"#,
        overlay_markup = overlay.markup,
        seasons = data.seasons.len(),
        first_year = data
            .seasons
            .last()
            .map(|year| year.to_string())
            .unwrap_or_else(|| "-".to_string()),
        managers = data.managers.len(),
    );

    let _ = write!(
        content,
        r#"<section><h2>{year} Standings</h2>{table}</section>"#,
        year = data.latest_year,
        table = standings_table(&data.latest_standings),
    );

    let _ = write!(
        content,
        r#"<section><h2>Champions</h2>{table}</section>"#,
        table = champions_table(&data.champions),
    );

    page("The Elemental League", "/", &content, &overlay.css)
}

pub fn render_history(data: &HistoryPage) -> String {
    let mut content = String::from(r#"<section><h2>Season History</h2>"#);

    content.push_str(r#"<form class="season-picker" method="get" action="/history">"#);
    content.push_str(r#"<label for="season">Season</label><select id="season" name="season">"#);
    for year in &data.years {
        let selected = if *year == data.selected_year {
            " selected"
        } else {
            ""
        };
        let _ = write!(content, r#"<option value="{year}"{selected}>{year}</option>"#);
    }
    content.push_str(r#"</select><button class="ripple-host" type="submit">View</button></form>"#);

    let _ = write!(
        content,
        "<h3>{year} Standings</h3>{table}</section>",
        year = data.selected_year,
        table = standings_table(&data.standings),
    );

    page("History | The Elemental League", "/history", &content, "")
}

pub fn render_champions(data: &ChampionsPage) -> String {
    let content = format!(
        r#"<section><h2>Hall of Champions</h2>{}</section>"#,
        champions_table(&data.champions)
    );
    page("Champions | The Elemental League", "/champions", &content, "")
}

pub fn render_managers(data: &ManagersPage) -> String {
    let mut content = String::from(r#"<section><h2>Managers</h2>"#);

    if data.managers.is_empty() {
        content.push_str(&no_data("No managers available"));
    } else {
        content.push_str(
            r#"<table class="data-table"><thead><tr><th>Manager</th><th>Record</th><th>Titles</th><th>Playoffs</th><th>Avg PF</th><th>Seasons</th></tr></thead><tbody>"#,
        );
        for manager in &data.managers {
            let _ = write!(
                content,
                "<tr class=\"ripple-host\"><td><a href=\"{href}\">{name}</a></td>\
                 <td>{record}</td><td>{titles}</td><td>{playoffs}</td>\
                 <td>{avg:.1}</td><td>{seasons}</td></tr>",
                href = manager_href(&manager.name),
                name = escape(&manager.name),
                record = escape(&manager.all_time_record),
                titles = manager.championships,
                playoffs = manager.playoff_appearances,
                avg = manager.avg_points_for,
                seasons = manager.seasons_played,
            );
        }
        content.push_str("</tbody></table>");
    }
    content.push_str("</section>");

    page("Managers | The Elemental League", "/managers", &content, "")
}

pub fn render_manager(data: &ManagerPage) -> String {
    let mut content = String::new();
    content.push_str(&error_banner(data.error.as_deref()));

    match &data.manager {
        None => content.push_str(&no_data("Manager data unavailable")),
        Some(profile) => {
            let _ = write!(
                content,
                r#"<section class="cards">
<div class="card float"><span class="label">{name}</span><span class="value">{record}</span><span class="sub">{seasons} seasons</span></div>
<div class="card float"><span class="label">Championships</span><span class="value">{titles}</span><span class="sub">{playoffs} playoff runs</span></div>
<div class="card float"><span class="label">Avg Points For</span><span class="value">{avg:.1}</span><span class="sub">per season</span></div>
</section>"#,
                name = escape(&profile.name),
                record = escape(&profile.all_time_record),
                seasons = profile.seasons_played,
                titles = profile.championships,
                playoffs = profile.playoff_appearances,
                avg = profile.avg_points_for,
            );

            content.push_str(r#"<section><h2>Season History</h2>"#);
            if profile.season_history.is_empty() {
                content.push_str(&no_data("No season history"));
            } else {
                content.push_str(
                    r#"<table class="data-table"><thead><tr><th>Season</th><th>Team</th><th>Finish</th><th>W</th><th>L</th><th>PF</th><th>PA</th></tr></thead><tbody>"#,
                );
                for season in &profile.season_history {
                    let finish = season
                        .rank
                        .map(|rank| format!("#{rank}"))
                        .unwrap_or_else(|| "-".to_string());
                    let _ = write!(
                        content,
                        "<tr><td><strong>{year}</strong></td><td>{team}</td><td>{finish}</td>\
                         <td>{wins}</td><td>{losses}</td><td>{pf:.1}</td><td>{pa:.1}</td></tr>",
                        year = season.season_year,
                        team = escape(&season.team_name),
                        wins = season.wins,
                        losses = season.losses,
                        pf = season.points_for,
                        pa = season.points_against,
                    );
                }
                content.push_str("</tbody></table>");
            }
            content.push_str("</section>");

            let _ = write!(
                content,
                r#"<section><h2>Rivalries</h2>{}</section>"#,
                opaque_list(&data.rivalries, "No rivalry data")
            );
            let _ = write!(
                content,
                r#"<section><h2>Weekly Results</h2>{}</section>"#,
                opaque_list(&data.weekly_results, "No weekly results")
            );
        }
    }

    page("Manager | The Elemental League", "/managers", &content, "")
}

pub fn render_tidbits(data: &TidbitsPage) -> String {
    let mut content = String::new();
    content.push_str(&error_banner(data.error.as_deref()));
    let _ = write!(
        content,
        r#"<section><h2>Luck Rankings</h2>{}</section>"#,
        opaque_list(&data.luck, "No luck rankings")
    );
    let _ = write!(
        content,
        r#"<section><h2>League Records</h2>{}</section>"#,
        records_table(&data.records)
    );
    page("Tidbits | The Elemental League", "/tidbits", &content, "")
}

pub fn render_records(data: &RecordsPage) -> String {
    let content = format!(
        r#"<section><h2>League Records</h2>{}</section>"#,
        records_table(&data.records)
    );
    page("Records | The Elemental League", "/records", &content, "")
}

pub fn render_matchups(data: &MatchupsPage) -> String {
    let mut content = String::from(r#"<section><h2>Matchups</h2>"#);

    content.push_str(r#"<form class="season-picker" method="get" action="/matchups">"#);
    let _ = write!(
        content,
        r#"<label for="year">Year</label><input id="year" name="year" type="number" value="{}">"#,
        data.year
    );
    let week_value = data
        .week
        .map(|week| week.to_string())
        .unwrap_or_default();
    let _ = write!(
        content,
        r#"<label for="week">Week</label><input id="week" name="week" type="number" min="1" max="{max}" value="{week_value}" placeholder="all">"#,
        max = data.max_week.max(1),
    );
    content.push_str(r#"<button class="ripple-host" type="submit">View</button></form>"#);

    if data.matchups.is_empty() {
        content.push_str(&no_data("No matchups available"));
    } else {
        content.push_str(
            r#"<table class="data-table"><thead><tr><th>Week</th><th>Home</th><th>Score</th><th>Away</th><th>Score</th><th>Bracket</th></tr></thead><tbody>"#,
        );
        for matchup in &data.matchups {
            let bracket = matchup
                .bracket_type
                .as_deref()
                .map(escape)
                .unwrap_or_else(|| "-".to_string());
            let _ = write!(
                content,
                "<tr><td>{week}</td><td>{home}</td><td><strong>{hs:.1}</strong></td>\
                 <td>{away}</td><td><strong>{as_:.1}</strong></td><td>{bracket}</td></tr>",
                week = matchup.week,
                home = escape(&matchup.home_team),
                hs = matchup.home_score,
                away = escape(&matchup.away_team),
                as_ = matchup.away_score,
            );
        }
        content.push_str("</tbody></table>");
    }
    content.push_str("</section>");

    page("Matchups | The Elemental League", "/matchups", &content, "")
}

pub fn render_legacy_dst(team: &str, current_season: &str, career: &str) -> String {
    let content = format!(
        r#"<section><h2>{team} &ndash; D/ST</h2><div id="currentSeasonTab">{current_season}</div></section>
<section><h2>Career</h2><div id="careerStatsTab">{career}</div></section>"#,
        team = escape(team),
    );
    page("D/ST Stats | The Elemental League", "", &content, "")
}

// ---------------------------------------------------------------------------

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #10141d;
      --panel: #1a2030;
      --ink: #e8e6e1;
      --muted: #8b93a7;
      --fire: #ff5a00;
      --water: #4facfe;
      --line: rgba(79, 172, 254, 0.14);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top right, rgba(255, 90, 0, 0.12), transparent 50%),
        radial-gradient(circle at bottom left, rgba(79, 172, 254, 0.1), transparent 55%),
        var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 24px 18px 64px;
    }

    main { width: min(960px, 100%); margin: 0 auto; display: grid; gap: 28px; }

    nav { display: flex; flex-wrap: wrap; gap: 6px; }
    nav a {
      color: var(--muted);
      text-decoration: none;
      padding: 8px 14px;
      border-radius: 999px;
      font-weight: 500;
    }
    nav a.active { color: var(--ink); background: var(--panel); }
    nav a:hover { color: var(--water); }

    h2 { margin: 0 0 12px; font-size: 1.3rem; }
    h3 { margin: 18px 0 10px; font-size: 1.05rem; color: var(--muted); }

    .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; }
    .card {
      background: var(--panel);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 6px;
    }
    .card .label { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.12em; color: var(--muted); }
    .card .value { font-size: 1.6rem; font-weight: 600; color: var(--fire); }
    .card .sub { font-size: 0.9rem; color: var(--muted); }

    .data-table, .stats-table { width: 100%; border-collapse: collapse; background: var(--panel); border-radius: 12px; overflow: hidden; }
    .data-table th, .data-table td, .stats-table th, .stats-table td {
      padding: 10px 12px;
      text-align: left;
      border-bottom: 1px solid var(--line);
      font-size: 0.95rem;
    }
    .data-table th, .stats-table th { color: var(--muted); font-weight: 500; text-transform: uppercase; font-size: 0.75rem; letter-spacing: 0.08em; }
    .data-table a { color: var(--water); text-decoration: none; }

    .season-summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(110px, 1fr)); gap: 10px; margin-bottom: 16px; }
    .season-summary-item { background: var(--panel); border: 1px solid var(--line); border-radius: 12px; padding: 10px; text-align: center; }
    .season-summary-label { font-size: 0.72rem; text-transform: uppercase; color: var(--muted); }
    .season-summary-value { font-size: 1.2rem; font-weight: 600; color: var(--fire); }

    .season-picker { display: flex; flex-wrap: wrap; gap: 10px; align-items: center; margin-bottom: 14px; }
    .season-picker label { color: var(--muted); font-size: 0.9rem; }
    .season-picker select, .season-picker input {
      background: var(--panel); color: var(--ink); border: 1px solid var(--line);
      border-radius: 8px; padding: 7px 10px; font: inherit; width: 110px;
    }
    .season-picker button {
      background: var(--water); color: #0b2239; border: none; border-radius: 999px;
      padding: 8px 18px; font-weight: 600; cursor: pointer;
    }

    .fact-list { list-style: none; margin: 0; padding: 0; display: grid; gap: 8px; }
    .fact-list li { background: var(--panel); border: 1px solid var(--line); border-radius: 10px; padding: 10px 12px; font-size: 0.92rem; }
    .fact-key { color: var(--muted); }

    .no-data-message { background: var(--panel); border: 1px dashed var(--line); border-radius: 12px; padding: 22px; text-align: center; color: var(--muted); }
    .error-banner { background: rgba(255, 90, 0, 0.12); border: 1px solid rgba(255, 90, 0, 0.4); color: #ffb38a; border-radius: 12px; padding: 12px 16px; }

    {{EFFECT_CSS}}
  </style>
</head>
<body>
  <main>
    <header>
      <h1>The Elemental League</h1>
      <nav>{{NAV}}</nav>
    </header>
    {{CONTENT}}
  </main>

  <script>
    // Water ripple on click, mirroring the pulse geometry: a square of the
    // larger host side, centered on the click point.
    document.addEventListener('click', (event) => {
      const host = event.target.closest('.ripple-host');
      if (!host) return;
      const rect = host.getBoundingClientRect();
      const size = Math.max(rect.width, rect.height);
      const span = document.createElement('span');
      span.className = 'ripple';
      span.style.width = span.style.height = size + 'px';
      span.style.left = (event.clientX - rect.left - size / 2) + 'px';
      span.style.top = (event.clientY - rect.top - size / 2) + 'px';
      host.appendChild(span);
      span.addEventListener('animationend', () => span.remove());
    });
  </script>
</body>
</html>
"#;
