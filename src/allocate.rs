//! Team allocation.
//!
//! Both policies score every participant fresh, bucket them by exact score
//! and shuffle inside each bucket, then walk the buckets from the highest
//! score down:
//!
//! - [`Policy::Tiered`] fills teams one after another up to their capacity, so
//!   the strongest participants end up together in the first teams.
//! - [`Policy::Balanced`] gives each participant to the team with the lowest
//!   running total, which keeps `max(total) - min(total)` within the largest
//!   single score.
//!
//! The shuffle only decides which same-score participants land together. The
//! per-team score distribution does not depend on it.

use itertools::Itertools;
use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::action::{Action, ActionError, Index};
use crate::error::AllocationError;
use crate::model::condition::{self, Policy, Score};
use crate::model::entity::Participant;
use crate::model::group::{Table, Team, TeamMember};
use crate::report::BalanceReport;

/// Participants grouped by computed score, highest score first.
struct ScoreBuckets {
    buckets: Vec<(Score, Vec<TeamMember>)>,
}

impl ScoreBuckets {
    fn build(participants: &[Participant]) -> ScoreBuckets {
        let buckets = participants
            .iter()
            .map(|participant| TeamMember {
                score: condition::score(participant),
                participant: participant.clone(),
            })
            .into_group_map_by(|member| member.score)
            .into_iter()
            .sorted_by(|a, b| b.0.cmp(&a.0))
            .collect();
        ScoreBuckets { buckets }
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (_, bucket) in self.buckets.iter_mut() {
            bucket.shuffle(rng);
        }
    }

    fn into_members(self) -> impl Iterator<Item = TeamMember> {
        self.buckets.into_iter().flat_map(|(_, bucket)| bucket)
    }
}

/// Member capacity of each team for the tiered fill.
///
/// The first `count % n_teams` teams take `ceil(count / n_teams)`, the rest
/// take the floor, so capacities sum to `count` and differ by at most one.
fn capacities(count: usize, n_teams: usize) -> Vec<usize> {
    let ideal = count.div_ceil(n_teams);
    let floor = count / n_teams;
    let remainder = count % n_teams;
    (0..n_teams)
        .map(|index| if index < remainder { ideal } else { floor })
        .collect()
}

fn fill_tiered(
    table: &mut Table,
    members: impl Iterator<Item = TeamMember>,
    capacities: &[usize],
) -> Result<(), AllocationError> {
    let n_teams = table.teams.len();
    let mut opened = 0;
    let mut current: Option<Index> = None;

    for member in members {
        let team_index = match current {
            Some(index) if table.teams[index].len() < capacities[index] => index,
            _ if opened < n_teams => {
                opened += 1;
                opened - 1
            }
            // Only reached when capacities sum to less than the roster.
            _ => table.least_filled().ok_or(ActionError::EmptyTable)?,
        };
        current = Some(team_index);
        debug!(
            participant = %member.participant.id,
            score = member.score,
            team = team_index + 1,
            "tiered placement"
        );
        table.act(Action::Assign { member, team_index })?;
    }
    Ok(())
}

fn fill_balanced(
    table: &mut Table,
    members: impl Iterator<Item = TeamMember>,
) -> Result<(), AllocationError> {
    for member in members {
        let team_index = table.least_loaded().ok_or(ActionError::EmptyTable)?;
        let participant = member.participant.id.clone();
        let score = member.score;
        let total = table.act(Action::Assign { member, team_index })?;
        debug!(%participant, score, team = team_index + 1, total, "balanced placement");
    }
    Ok(())
}

fn validate(participants: &[Participant], n_teams: usize) -> Result<(), AllocationError> {
    if participants.is_empty() {
        return Err(AllocationError::invalid("participant list is empty"));
    }
    if n_teams < 1 {
        return Err(AllocationError::invalid("number of teams must be at least 1"));
    }
    if let Some(id) = participants.iter().map(|p| &p.id).duplicates().next() {
        return Err(AllocationError::invalid(format!(
            "participant id '{id}' appears more than once"
        )));
    }
    Ok(())
}

/// Team allocator driven by an injectable random source.
pub struct Allocator<R = SmallRng> {
    rng: R,
}

impl Allocator<SmallRng> {
    /// Deterministic allocator: the same seed yields the same partitions.
    pub fn seeded(seed: u64) -> Self {
        Allocator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Allocator {
            rng: SmallRng::from_entropy(),
        }
    }
}

impl<R: Rng> Allocator<R> {
    pub fn new(rng: R) -> Self {
        Allocator { rng }
    }

    /// Partitions `participants` into exactly `n_teams` teams.
    ///
    /// Calling this again on the same allocator draws a new shuffle, which is
    /// how a regeneration is produced.
    pub fn allocate(
        &mut self,
        participants: &[Participant],
        n_teams: usize,
        policy: Policy,
    ) -> Result<Vec<Team>, AllocationError> {
        validate(participants, n_teams)?;

        let mut buckets = ScoreBuckets::build(participants);
        buckets.shuffle(&mut self.rng);

        let mut table = Table::new(n_teams);
        match policy {
            Policy::Tiered => fill_tiered(
                &mut table,
                buckets.into_members(),
                &capacities(participants.len(), n_teams),
            )?,
            Policy::Balanced => fill_balanced(&mut table, buckets.into_members())?,
        }

        let teams = table.into_teams();
        info!(
            %policy,
            participants = participants.len(),
            teams = n_teams,
            totals = ?teams.iter().map(|team| team.total_score).collect_vec(),
            "teams allocated"
        );
        Ok(teams)
    }

    /// Runs `attempts` allocations and keeps the one with the lowest balance score.
    pub fn best_of(
        &mut self,
        participants: &[Participant],
        n_teams: usize,
        policy: Policy,
        attempts: usize,
    ) -> Result<Vec<Team>, AllocationError> {
        if attempts == 0 {
            return Err(AllocationError::invalid("at least one attempt is required"));
        }

        let mut best: Option<(f64, Vec<Team>)> = None;
        for attempt in 0..attempts {
            let teams = self.allocate(participants, n_teams, policy)?;
            let score = BalanceReport::of(&teams).balance_score;
            if best.as_ref().map_or(true, |(best_score, _)| score < *best_score) {
                best = Some((score, teams));
                if score <= 0.0 {
                    debug!(attempt = attempt + 1, "perfect balance found");
                    break;
                }
            }
        }

        best.map(|(_, teams)| teams)
            .ok_or_else(|| AllocationError::invalid("no allocation produced"))
    }
}

/// One-shot allocation. `seed` pins the shuffle; `None` draws from entropy.
pub fn allocate(
    participants: &[Participant],
    n_teams: usize,
    policy: Policy,
    seed: Option<u64>,
) -> Result<Vec<Team>, AllocationError> {
    let mut allocator = match seed {
        Some(seed) => Allocator::seeded(seed),
        None => Allocator::from_entropy(),
    };
    allocator.allocate(participants, n_teams, policy)
}

/// Same participants, team count and policy, fresh shuffle.
pub fn regenerate(
    participants: &[Participant],
    n_teams: usize,
    policy: Policy,
) -> Result<Vec<Team>, AllocationError> {
    allocate(participants, n_teams, policy, None)
}

#[cfg(test)]
#[path = "allocate_tests.rs"]
mod allocate_tests;
