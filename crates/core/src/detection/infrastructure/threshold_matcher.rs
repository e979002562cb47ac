use crate::detection::domain::encoding::Encoding;
use crate::detection::domain::face_matcher::FaceMatcher;

/// How two encodings are scored against the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchMetric {
    /// Match when cosine similarity is at least `threshold`.
    Cosine { threshold: f64 },
    /// Match when euclidean distance is at most `tolerance`.
    Euclidean { tolerance: f64 },
}

/// Fixed-threshold match predicate over encodings of equal dimension.
pub struct ThresholdMatcher {
    metric: MatchMetric,
}

impl ThresholdMatcher {
    pub fn new(metric: MatchMetric) -> Self {
        Self { metric }
    }

    pub fn cosine(threshold: f64) -> Self {
        Self::new(MatchMetric::Cosine { threshold })
    }

    pub fn euclidean(tolerance: f64) -> Self {
        Self::new(MatchMetric::Euclidean { tolerance })
    }

    pub fn metric(&self) -> MatchMetric {
        self.metric
    }

    fn is_match(&self, known: &Encoding, query: &Encoding) -> bool {
        match self.metric {
            MatchMetric::Cosine { threshold } => known.cosine_similarity(query) >= threshold,
            MatchMetric::Euclidean { tolerance } => known.euclidean_distance(query) <= tolerance,
        }
    }
}

impl FaceMatcher for ThresholdMatcher {
    fn compare(
        &self,
        known: &[Encoding],
        query: &Encoding,
    ) -> Result<Vec<bool>, Box<dyn std::error::Error>> {
        if let Some(bad) = known.iter().find(|k| k.dim() != query.dim()) {
            return Err(format!(
                "Encoding dimension mismatch: reference has {}, query has {}",
                bad.dim(),
                query.dim()
            )
            .into());
        }
        Ok(known.iter().map(|k| self.is_match(k, query)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn enc(v: &[f32]) -> Encoding {
        Encoding::new(v.to_vec())
    }

    #[rstest]
    #[case::cosine(ThresholdMatcher::cosine(0.4))]
    #[case::cosine_strict(ThresholdMatcher::cosine(0.999))]
    #[case::euclidean(ThresholdMatcher::euclidean(0.6))]
    #[case::euclidean_zero(ThresholdMatcher::euclidean(0.0))]
    fn test_self_match(#[case] matcher: ThresholdMatcher) {
        let e = Encoding::normalized(vec![0.3, -0.2, 0.9, 0.1]);
        let result = matcher.compare(&[e.clone()], &e).unwrap();
        assert_eq!(result, vec![true]);
    }

    #[test]
    fn test_cosine_threshold() {
        let matcher = ThresholdMatcher::cosine(0.5);
        let known = vec![enc(&[1.0, 0.0]), enc(&[0.0, 1.0]), enc(&[1.0, 1.0])];
        let result = matcher.compare(&known, &enc(&[1.0, 0.0])).unwrap();
        // similarities: 1.0, 0.0, 0.707
        assert_eq!(result, vec![true, false, true]);
    }

    #[test]
    fn test_euclidean_tolerance() {
        let matcher = ThresholdMatcher::euclidean(0.6);
        let known = vec![enc(&[0.0, 0.0]), enc(&[0.5, 0.0]), enc(&[1.0, 0.0])];
        let result = matcher.compare(&known, &enc(&[0.0, 0.0])).unwrap();
        assert_eq!(result, vec![true, true, false]);
    }

    #[test]
    fn test_result_length_matches_known() {
        let matcher = ThresholdMatcher::euclidean(0.6);
        let known: Vec<Encoding> = (0..7).map(|i| enc(&[i as f32])).collect();
        assert_eq!(matcher.compare(&known, &enc(&[3.0])).unwrap().len(), 7);
        assert!(matcher.compare(&[], &enc(&[3.0])).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let matcher = ThresholdMatcher::cosine(0.4);
        let err = matcher
            .compare(&[enc(&[1.0, 0.0, 0.0])], &enc(&[1.0, 0.0]))
            .unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }
}
