use crate::detection::domain::encoding::Encoding;

/// Labeled face encodings gathered from the training images.
///
/// Labels and encodings are parallel sequences: entry `i` of each describes
/// the same training face. The set only grows while it is being built inside
/// this crate; everything outside gets a read-only view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceSet {
    labels: Vec<String>,
    encodings: Vec<Encoding>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, label: impl Into<String>, encoding: Encoding) {
        self.labels.push(label.into());
        self.encodings.push(encoding);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Distinct labels in order of first appearance.
    pub fn distinct_labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in &self.labels {
            if !seen.contains(&label.as_str()) {
                seen.push(label.as_str());
            }
        }
        seen
    }

    pub fn count_for(&self, label: &str) -> usize {
        self.labels.iter().filter(|l| *l == label).count()
    }
}

impl<S: Into<String>> FromIterator<(S, Encoding)> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = (S, Encoding)>>(iter: I) -> Self {
        let mut set = ReferenceSet::new();
        for (label, encoding) in iter {
            set.push(label, encoding);
        }
        set
    }
}
