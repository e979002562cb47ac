use crate::detection::domain::encoding::Encoding;
use crate::detection::domain::face_matcher::FaceMatcher;
use crate::recognition::reference_set::ReferenceSet;
use crate::recognition::vote_tally::VoteTally;

/// The label chosen for a query and how many reference faces backed it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub votes: usize,
}

/// Majority vote over every reference entry the match predicate accepts.
pub struct VoteClassifier<'a> {
    reference: &'a ReferenceSet,
    matcher: &'a dyn FaceMatcher,
}

impl<'a> VoteClassifier<'a> {
    pub fn new(reference: &'a ReferenceSet, matcher: &'a dyn FaceMatcher) -> Self {
        Self { reference, matcher }
    }

    pub fn tally(&self, query: &Encoding) -> Result<VoteTally, Box<dyn std::error::Error>> {
        if self.reference.is_empty() {
            return Ok(VoteTally::default());
        }
        let matches = self.matcher.compare(self.reference.encodings(), query)?;
        VoteTally::from_matches(self.reference.labels(), &matches)
    }

    /// Returns the majority label, or `None` when no reference face matched.
    pub fn classify(
        &self,
        query: &Encoding,
    ) -> Result<Option<Classification>, Box<dyn std::error::Error>> {
        let tally = self.tally(query)?;
        if tally.is_empty() {
            log::debug!("No reference face matched");
        }
        Ok(tally.winner().map(|(label, votes)| Classification {
            label: label.to_string(),
            votes,
        }))
    }
}
