use serde::Serialize;

use crate::shared::bounding_box::BoundingBox;

/// Outcome for one face in one validation image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecognizedFace {
    pub bbox: BoundingBox,
    /// Winning label, or the configured unknown label.
    pub label: String,
    /// Reference entries that voted for `label`; 0 for unknown faces.
    pub votes: usize,
}

impl RecognizedFace {
    pub fn is_known(&self) -> bool {
        self.votes > 0
    }
}
