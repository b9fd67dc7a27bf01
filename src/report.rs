use std::fmt;

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::model::condition::Score;
use crate::model::group::Team;
use crate::tally::TeamCounts;

const SPREAD_WEIGHT: f64 = 10.0;
const MEMBER_GAP_WEIGHT: f64 = 5.0;
const GENDER_WEIGHT: f64 = 3.0;

/// How evenly an allocation came out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceReport {
    pub min_total: Score,
    pub max_total: Score,
    /// `max_total - min_total`.
    pub spread: Score,
    /// Difference between the largest and smallest team size.
    pub member_gap: usize,
    /// Sum over non-empty teams of `|male - female| / size`.
    pub gender_imbalance: f64,
    /// Weighted badness, lower is better. Infinite for an empty team list.
    pub balance_score: f64,
    pub averages: Vec<f64>,
    pub totals: TeamCounts,
}

impl BalanceReport {
    pub fn of(teams: &[Team]) -> BalanceReport {
        let (min_total, max_total) = match teams.iter().map(|team| team.total_score).minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(total) => (total, total),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        let member_gap = match teams.iter().map(Team::len).minmax() {
            MinMaxResult::MinMax(min, max) => max - min,
            _ => 0,
        };
        let gender_imbalance = teams
            .iter()
            .filter(|team| !team.is_empty())
            .map(|team| team.counts.males().abs_diff(team.counts.females()) as f64 / team.len() as f64)
            .sum::<f64>();
        let spread = max_total - min_total;

        let balance_score = if teams.is_empty() {
            f64::INFINITY
        } else {
            f64::from(spread) * SPREAD_WEIGHT
                + member_gap as f64 * MEMBER_GAP_WEIGHT
                + gender_imbalance * GENDER_WEIGHT
        };

        BalanceReport {
            min_total,
            max_total,
            spread,
            member_gap,
            gender_imbalance,
            balance_score,
            averages: teams.iter().map(Team::average_score).collect(),
            totals: teams
                .iter()
                .map(|team| team.counts.clone())
                .fold(TeamCounts::default(), |acc, counts| acc + counts),
        }
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Spread: {} pts (min {}, max {}) | member gap: {} | balance score: {:.1}",
            self.spread, self.min_total, self.max_total, self.member_gap, self.balance_score
        )?;
        write!(
            f,
            "Averages: {}",
            self.averages.iter().map(|avg| format!("{avg:.1}")).join(", ")
        )
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
