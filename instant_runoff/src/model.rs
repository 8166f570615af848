// ********* Input data structures ***********

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;

/// One voter's ranked preferences: candidate names ordered from
/// most-preferred to least-preferred.
///
/// A ballot is validated at construction and immutable afterwards; the
/// engine keeps its own shrinking view of the choices while counting.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    choices: Vec<String>,
}

impl Ballot {
    /// Builds a ballot from an ordered choice list.
    ///
    /// The list must be non-empty and may not rank the same candidate
    /// twice; anything else is a [`ElectionError::MalformedBallot`].
    pub fn new(choices: Vec<String>) -> Result<Ballot, ElectionError> {
        if choices.is_empty() {
            return Err(ElectionError::MalformedBallot);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for choice in choices.iter() {
            if !seen.insert(choice.as_str()) {
                return Err(ElectionError::MalformedBallot);
            }
        }
        Ok(Ballot { choices })
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }
}

// ******** Output data structures *********

/// The state of one counting round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundTally {
    pub round: u32,
    /// Vote counts for every candidate holding at least one current first
    /// choice, most votes first. Candidates without a single first choice
    /// this round are absent, not zero.
    pub tally: Vec<(String, u64)>,
    /// The number of ballots with no remaining choice as of this round.
    pub exhausted: u64,
    /// The candidate removed at the end of this round, or `None` in the
    /// decisive final round.
    pub eliminated: Option<String>,
}

/// The complete outcome of an election: the winner together with the full
/// elimination history, one [`RoundTally`] per counting round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub winner: String,
    pub rounds: Vec<RoundTally>,
}

impl ElectionResult {
    /// The tally of the decisive final round, most votes first.
    pub fn standings(&self) -> &[(String, u64)] {
        self.rounds.last().map(|r| r.tally.as_slice()).unwrap_or(&[])
    }
}

// ******** Errors *********

/// Errors that prevent an election from resolving.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ElectionError {
    /// No ballots were supplied at all.
    EmptyElection,
    /// Every ballot is exhausted and no candidate ever reached a majority.
    NoCandidatesRemain,
    /// A ballot with no choices, or one ranking the same candidate twice.
    MalformedBallot,
}

impl Error for ElectionError {}

impl Display for ElectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElectionError::EmptyElection => write!(f, "no ballots were supplied"),
            ElectionError::NoCandidatesRemain => {
                write!(f, "all ballots are exhausted and no candidate holds a majority")
            }
            ElectionError::MalformedBallot => {
                write!(f, "ballot is empty or ranks the same candidate twice")
            }
        }
    }
}
