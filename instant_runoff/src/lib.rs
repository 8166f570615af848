//! Instant-runoff election resolution.
//!
//! See the [`manual`] module for a description of the algorithm and of the
//! command line front-end.

pub mod builder;
pub mod manual;
mod model;

use log::{debug, info};

use std::collections::{HashMap, VecDeque};

pub use crate::model::*;

type RoundId = u32;

// Candidate names are interned once at election creation; everything past
// the public boundary works on dense ids instead of name strings.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateId(u32);

// One voter's remaining preferences, most-preferred first. Choices only
// ever leave from the front; an exhausted ballot stays in the election and
// simply carries no vote.
#[derive(Eq, PartialEq, Debug, Clone)]
struct BallotState {
    remaining: VecDeque<CandidateId>,
}

impl BallotState {
    fn current_favorite(&self) -> Option<CandidateId> {
        self.remaining.front().copied()
    }

    fn exhaust_front_preference(&mut self) {
        self.remaining.pop_front();
    }

    fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// A single election being resolved.
///
/// Owns the full ballot set for the duration of the run. The voter count is
/// fixed at creation: the majority threshold never shrinks as ballots become
/// exhausted in later rounds.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    ballots: Vec<BallotState>,
    candidate_names: Vec<String>,
    total_voters: u64,
}

impl Election {
    /// Creates an election from validated ballots.
    ///
    /// Fails with [`ElectionError::EmptyElection`] when no ballots are
    /// supplied. Candidates are registered in first-seen order.
    pub fn new(ballots: &[Ballot]) -> Result<Election, ElectionError> {
        if ballots.is_empty() {
            return Err(ElectionError::EmptyElection);
        }
        let mut ids: HashMap<String, CandidateId> = HashMap::new();
        let mut candidate_names: Vec<String> = Vec::new();
        let mut states: Vec<BallotState> = Vec::with_capacity(ballots.len());
        for ballot in ballots {
            let remaining = ballot
                .choices()
                .iter()
                .map(|name| {
                    *ids.entry(name.clone()).or_insert_with(|| {
                        candidate_names.push(name.clone());
                        CandidateId((candidate_names.len() - 1) as u32)
                    })
                })
                .collect();
            states.push(BallotState { remaining });
        }
        Ok(Election {
            total_voters: states.len() as u64,
            ballots: states,
            candidate_names,
        })
    }

    /// Runs the counting rounds to completion.
    ///
    /// Each round tallies current favorites, checks for a strict majority of
    /// the original voter count and otherwise eliminates the bottom-ranked
    /// candidate, transferring its ballots to their next choice. Every
    /// elimination removes the front choice of at least one ballot, so the
    /// loop is bounded by the total number of ranked choices.
    pub fn resolve(mut self) -> Result<ElectionResult, ElectionError> {
        info!(
            "resolve: processing {} ballots, {} candidates",
            self.ballots.len(),
            self.candidate_names.len()
        );
        let mut rounds: Vec<RoundTally> = Vec::new();
        loop {
            let round = (rounds.len() + 1) as RoundId;
            let counted = self.count_favorites();
            debug!("resolve: round {}: counted: {:?}", round, counted);
            let &(leader, leader_votes) = counted
                .first()
                .ok_or(ElectionError::NoCandidatesRemain)?;

            let tally: Vec<(String, u64)> = counted
                .iter()
                .map(|&(cid, votes)| (self.name_of(cid).to_string(), votes))
                .collect();
            let exhausted = self.ballots.iter().filter(|b| b.is_exhausted()).count() as u64;

            // Strictly more than half of the ballots cast at creation time,
            // not of the ballots still active this round.
            if leader_votes * 2 > self.total_voters {
                info!(
                    "resolve: round {}: {} holds a majority with {} votes",
                    round,
                    self.name_of(leader),
                    leader_votes
                );
                rounds.push(RoundTally {
                    round,
                    tally,
                    exhausted,
                    eliminated: None,
                });
                return Ok(ElectionResult {
                    winner: self.name_of(leader).to_string(),
                    rounds,
                });
            }

            // The bottom of the sorted tally loses the round. Among
            // candidates tied for fewest votes this is the name that sorts
            // last.
            let &(loser, loser_votes) = counted
                .last()
                .ok_or(ElectionError::NoCandidatesRemain)?;
            info!(
                "resolve: round {}: eliminating {} with {} votes",
                round,
                self.name_of(loser),
                loser_votes
            );
            for ballot in self.ballots.iter_mut() {
                if ballot.current_favorite() == Some(loser) {
                    ballot.exhaust_front_preference();
                }
            }
            rounds.push(RoundTally {
                round,
                tally,
                exhausted,
                eliminated: Some(self.name_of(loser).to_string()),
            });
        }
    }

    // Tally of current favorites, descending by votes and ascending by name
    // among equal counts. Exhausted ballots contribute nothing.
    fn count_favorites(&self) -> Vec<(CandidateId, u64)> {
        let mut votes: HashMap<CandidateId, u64> = HashMap::new();
        for ballot in self.ballots.iter() {
            if let Some(cid) = ballot.current_favorite() {
                *votes.entry(cid).or_insert(0) += 1;
            }
        }
        let mut counted: Vec<(CandidateId, u64)> = votes.into_iter().collect();
        counted.sort_by(|(ca, va), (cb, vb)| {
            vb.cmp(va)
                .then_with(|| self.name_of(*ca).cmp(self.name_of(*cb)))
        });
        counted
    }

    fn name_of(&self, cid: CandidateId) -> &str {
        &self.candidate_names[cid.0 as usize]
    }
}

/// Resolves an election in one call.
pub fn run_election(ballots: &[Ballot]) -> Result<ElectionResult, ElectionError> {
    Election::new(ballots)?.resolve()
}
