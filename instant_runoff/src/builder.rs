pub use crate::model::*;

use crate::Election;

/// Collects ballots one at a time before resolving an election.
///
/// ```
/// use instant_runoff::builder::Builder;
/// # use instant_runoff::ElectionError;
///
/// let mut builder = Builder::new();
/// builder.add_ballot(&["Anna".to_string(), "Bob".to_string()])?;
/// builder.add_ballot(&["Anna".to_string()])?;
/// builder.add_ballot(&["Bob".to_string()])?;
///
/// let result = builder.into_election()?.resolve()?;
/// assert_eq!(result.winner, "Anna");
/// # Ok::<(), ElectionError>(())
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Builder {
    ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { ballots: Vec::new() }
    }

    /// Validates and adds one voter's ranked choices, most-preferred first.
    pub fn add_ballot(&mut self, choices: &[String]) -> Result<(), ElectionError> {
        self.ballots.push(Ballot::new(choices.to_vec())?);
        Ok(())
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    /// Consumes the collected ballots into an [`Election`], applying the
    /// empty-election check.
    pub fn into_election(self) -> Result<Election, ElectionError> {
        Election::new(&self.ballots)
    }
}
