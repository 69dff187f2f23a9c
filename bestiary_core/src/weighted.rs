use rand::Rng;

/// Pick an index by cumulative weight
///
/// Returns `None` for an empty slice. If every weight is zero the first
/// index is returned so callers always get something to act on.
pub fn weighted_index<R: Rng>(weights: &[u32], rng: &mut R) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total_weight: u64 = weights.iter().map(|w| *w as u64).sum();
    if total_weight == 0 {
        return Some(0);
    }

    let mut roll = rng.gen_range(0..total_weight);
    for (i, weight) in weights.iter().enumerate() {
        let weight = *weight as u64;
        if roll < weight {
            return Some(i);
        }
        roll -= weight;
    }

    Some(weights.len() - 1)
}
