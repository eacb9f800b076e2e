use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::data::{RosterSummary, TeamRoster};
use crate::mc::SimulationResult;
use crate::rate::MatchRates;
use crate::scoregrid::{Outcome, Scoregrid, Side};

fn percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn tabulate_outcomes(
    result: &SimulationResult,
    scoregrid: &Scoregrid,
    home: &str,
    away: &str,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Outcome".into(), "Simulated".into(), "Theoretical".into()],
        ));
    for (label, simulated, outcome) in [
        (format!("{home} win"), result.win_prob_home, Outcome::Win(Side::Home)),
        ("Draw".to_string(), result.draw_prob, Outcome::Draw),
        (format!("{away} win"), result.win_prob_away, Outcome::Win(Side::Away)),
    ] {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.into(),
                percent(simulated).into(),
                percent(outcome.gather(scoregrid)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_expected(
    result: &SimulationResult,
    rates: &MatchRates,
    home: &str,
    away: &str,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Team".into(),
                "Rate".into(),
                "Mean".into(),
                "Std dev".into(),
            ],
        ));
    for (label, rate, mean, stddev) in [
        (home, rates.home, result.mean_home_goals, result.stddev_home_goals),
        (away, rates.away, result.mean_away_goals, result.stddev_away_goals),
    ] {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                label.into(),
                format!("{rate:.3}").into(),
                format!("{mean:.3}").into(),
                format!("{stddev:.3}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_top_scores(result: &SimulationResult, scoregrid: &Scoregrid, k: usize) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Rank".into(),
                "Score".into(),
                "Count".into(),
                "Simulated".into(),
                "Theoretical".into(),
            ],
        ));
    for (rank, frequency) in result.top_scores(k).iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", rank + 1).into(),
                frequency.score.to_string().into(),
                frequency.count.to_string().into(),
                percent(frequency.probability).into(),
                percent(scoregrid.probability(&frequency.score)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_teams(roster: &TeamRoster) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(9)).with(Left)),
            Col::new(Styles::default().with(MinWidth(15)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(11)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Team".into(),
                "Season".into(),
                "League".into(),
                "xG".into(),
                "xGA".into(),
                "Record".into(),
            ],
        ));
    for name in roster.names() {
        for team in roster.seasons_of(name) {
            table.push_row(Row::new(
                Styles::default(),
                vec![
                    team.name.clone().into(),
                    team.season.clone().into(),
                    team.league.clone().into(),
                    format!("{:.2}", team.stats.avg_xg_for).into(),
                    format!("{:.2}", team.stats.avg_xg_against).into(),
                    team.stats.record().into(),
                ],
            ));
        }
    }
    table
}

/// One block per team and season, headed by the team's display name, listing every descriptive
/// field the record carries.
pub fn tabulate_team_details(roster: &TeamRoster) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(22)).with(Left)),
        Col::new(Styles::default().with(MinWidth(40)).with(Left)),
    ]);
    for name in roster.names() {
        for team in roster.seasons_of(name) {
            table.push_row(Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                vec![team.display_name().into(), "".into()],
            ));
            for (label, value) in team.details() {
                table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
            }
        }
    }
    table
}

pub fn tabulate_summary(summary: &RosterSummary) -> Table {
    let mut table = Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(25)).with(Left)),
        Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
    ]);
    let correlation = summary
        .xg_goals_correlation
        .map(|correlation| format!("{correlation:.3}"))
        .unwrap_or_else(|| "n/a".into());
    for (label, value) in [
        ("Teams", summary.teams.to_string()),
        ("Mean xG", format!("{:.3}", summary.avg_xg_for)),
        ("Mean xGA", format!("{:.3}", summary.avg_xg_against)),
        ("xG/goals correlation", correlation),
    ] {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;

    const ROSTER_JSON: &str = r#"{"teams": [
        {"name": "Inter", "season": "2009-2010", "league": "Serie A", "coach": "José Mourinho",
         "notable_players": ["Diego Milito", "Wesley Sneijder"], "notes": "Treble winners",
         "stats": {"matches_played": 38, "wins": 24, "draws": 10, "losses": 4, "goals_for": 75,
                   "goals_against": 34, "avg_xg_for": 1.9, "avg_xg_against": 0.9,
                   "xg_efficiency": 1.04, "defensive_efficiency": 0.99, "possession": 54.2}},
        {"name": "Inter", "season": "2023-2024", "league": "Serie A",
         "stats": {"matches_played": 38, "wins": 29, "draws": 7, "losses": 2, "goals_for": 89,
                   "goals_against": 22, "avg_xg_for": 2.3, "avg_xg_against": 0.8}}
    ]}"#;

    fn render(table: &Table) -> String {
        Console::default().render(table)
    }

    #[test]
    fn team_details_show_descriptive_fields() {
        let roster = TeamRoster::from_json_str(ROSTER_JSON).unwrap();
        let rendered = render(&tabulate_team_details(&roster));
        for expected in [
            "Inter (2009-2010)",
            "Inter (2023-2024)",
            "José Mourinho",
            "Diego Milito, Wesley Sneijder",
            "Treble winners",
            "1.90 / 0.90",
            "1.04",
            "0.99",
            "24W-10D-4L (38 matches)",
            "75 scored, 34 conceded",
            "54.2%",
        ] {
            assert!(rendered.contains(expected), "missing {expected} in\n{rendered}");
        }
        assert!(rendered.find("2023-2024") < rendered.find("2009-2010"));
    }

    #[test]
    fn compact_teams_omit_descriptive_fields() {
        let roster = TeamRoster::from_json_str(ROSTER_JSON).unwrap();
        let rendered = render(&tabulate_teams(&roster));
        assert!(rendered.contains("24W-10D-4L"));
        assert!(!rendered.contains("José Mourinho"));
        assert!(!rendered.contains("Treble winners"));
    }
}
