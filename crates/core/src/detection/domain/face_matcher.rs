use crate::detection::domain::encoding::Encoding;

/// Domain interface for the identity match predicate.
///
/// Returns one boolean per entry of `known`, same order and length.
/// The decision threshold belongs to the implementation; an encoding must
/// always match an identical copy of itself.
pub trait FaceMatcher: Send {
    fn compare(
        &self,
        known: &[Encoding],
        query: &Encoding,
    ) -> Result<Vec<bool>, Box<dyn std::error::Error>>;
}
