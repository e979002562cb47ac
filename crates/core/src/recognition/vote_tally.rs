/// Per-label match counts for one query encoding.
///
/// Labels are kept in the order their first matching reference entry
/// appears, which is what breaks ties in [`VoteTally::winner`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: Vec<(String, usize)>,
}

impl VoteTally {
    /// Counts the labels whose match flag is set.
    ///
    /// `labels` and `matches` must have the same length.
    pub fn from_matches(
        labels: &[String],
        matches: &[bool],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if labels.len() != matches.len() {
            return Err(format!(
                "Match predicate returned {} results for {} reference entries",
                matches.len(),
                labels.len()
            )
            .into());
        }

        let mut tally = VoteTally::default();
        for (label, _) in labels.iter().zip(matches).filter(|(_, m)| **m) {
            tally.add(label);
        }
        Ok(tally)
    }

    fn add(&mut self, label: &str) {
        match self.counts.iter_mut().find(|(l, _)| l == label) {
            Some((_, n)) => *n += 1,
            None => self.counts.push((label.to_string(), 1)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The label with the most votes, or `None` when nothing matched.
    ///
    /// Ties go to the label that matched first in reference order.
    pub fn winner(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (label, n) in &self.counts {
            if best.map_or(true, |(_, top)| *n > top) {
                best = Some((label.as_str(), *n));
            }
        }
        best
    }
}
