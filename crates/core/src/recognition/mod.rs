pub mod recognized_face;
pub mod reference_set;
pub mod vote_classifier;
pub mod vote_tally;
