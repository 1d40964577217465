//! Edit distance and similarity scoring for description matching

/// Levenshtein distance with substitutions weighted as one insert plus one
/// delete, the weighting behind the classic `Levenshtein.ratio` measure.
pub fn weighted_edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + if ca == cb { 0 } else { 2 };
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized similarity in [0, 1] between two descriptions
///
/// Comparison is case-insensitive and ignores surrounding whitespace; bank
/// feeds tend to shout in uppercase while book entries are mixed case. Two
/// empty descriptions score 1.0.
pub fn description_similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    let combined_len = a.chars().count() + b.chars().count();
    if combined_len == 0 {
        return 1.0;
    }

    let distance = weighted_edit_distance(&a, &b);
    1.0 - distance as f64 / combined_len as f64
}
