/// Fixed-length numeric summary of one face's appearance.
///
/// Dimensionality is decided by the encoder that produced it; two
/// encodings are only comparable when their dimensions agree.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoding(Vec<f32>);

impl Encoding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Builds an encoding scaled to unit L2 norm. Zero vectors stay zero.
    pub fn normalized(mut values: Vec<f32>) -> Self {
        l2_normalize(&mut values);
        Self(values)
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn euclidean_distance(&self, other: &Encoding) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| {
                let d = (*a as f64) - (*b as f64);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity in `[-1, 1]`; 0.0 when either side is a zero vector.
    pub fn cosine_similarity(&self, other: &Encoding) -> f64 {
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let (a, b) = (*a as f64, *b as f64);
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

impl From<Vec<f32>> for Encoding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
