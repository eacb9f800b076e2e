use assert_float_eq::*;

use super::*;

fn create_test_4x4_scoregrid() -> Scoregrid {
    Scoregrid::from_probs(
        vec![
            0.04, 0.03, 0.02, 0.01, //
            0.08, 0.06, 0.04, 0.02, //
            0.12, 0.09, 0.06, 0.03, //
            0.16, 0.12, 0.08, 0.04,
        ],
        3,
    )
}

#[test]
pub fn outcome_win_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.65, Outcome::Win(Side::Home).gather(&scoregrid), 1e-12);
    assert_float_absolute_eq!(0.15, Outcome::Win(Side::Away).gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_draw_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.2, Outcome::Draw.gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_goals_ou_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_float_absolute_eq!(0.35, Outcome::GoalsUnder(3).gather(&scoregrid), 1e-12);
    assert_float_absolute_eq!(0.65, Outcome::GoalsOver(2).gather(&scoregrid), 1e-12);
}

#[test]
pub fn outcome_correct_score_gather() {
    let scoregrid = create_test_4x4_scoregrid();
    assert_eq!(
        0.04,
        Outcome::CorrectScore(Score::new(0, 0)).gather(&scoregrid)
    );
    assert_eq!(
        0.08,
        Outcome::CorrectScore(Score::new(3, 2)).gather(&scoregrid)
    );
    assert_eq!(0.0, scoregrid.probability(&Score::new(4, 0)));
}

#[test]
#[should_panic = "expected a 3x3 grid"]
pub fn from_probs_misaligned_panics() {
    Scoregrid::from_probs(vec![0.25; 4], 2);
}

#[test]
pub fn from_rates() {
    let rates = MatchRates::new(1.70, 1.46).unwrap();
    let scoregrid = Scoregrid::from_rates(&rates, 10);
    assert_eq!(10, scoregrid.max_goals());
    assert_float_relative_eq!(
        poisson::univariate(2, 1.70) * poisson::univariate(1, 1.46),
        scoregrid.probability(&Score::new(2, 1))
    );
    assert!(scoregrid.coverage() > 0.9999 && scoregrid.coverage() <= 1.0);

    let home_win = Outcome::Win(Side::Home).gather(&scoregrid);
    let away_win = Outcome::Win(Side::Away).gather(&scoregrid);
    let draw = Outcome::Draw.gather(&scoregrid);
    assert_float_absolute_eq!(scoregrid.coverage(), home_win + away_win + draw, 1e-12);
    assert!(home_win > away_win);
    assert_eq!(Score::new(1, 1), scoregrid.most_likely());
}

#[test]
pub fn most_likely_tie_break() {
    // (0,1), (1,0) and (1,1) tie; the lowest total wins, then the lowest home score
    let scoregrid = Scoregrid::from_probs(vec![0.1, 0.3, 0.3, 0.3], 1);
    assert_eq!(Score::new(0, 1), scoregrid.most_likely());
}

#[test]
pub fn score_winner() {
    assert_eq!(Some(Side::Home), Score::new(2, 1).winner());
    assert_eq!(Some(Side::Away), Score::new(0, 3).winner());
    assert_eq!(None, Score::new(2, 2).winner());
    assert_eq!("2-1", Score::new(2, 1).to_string());
    assert_eq!(3, Score::new(2, 1).total());
}
