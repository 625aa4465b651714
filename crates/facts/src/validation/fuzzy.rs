//! "Did you mean" suggestions for fact types and fact names, plus the
//! identifier rule fact names follow.

/// Pick the candidate closest to `input`, or `None` when nothing is close.
///
/// Comparison ignores ASCII case and treats `-` as `_`, so `Any-Exists`
/// lands on `any_exists`. A candidate qualifies when at most half of the
/// longer name has to change. Ties go to the earliest candidate.
pub(crate) fn suggest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let wanted = normalize(input);
    candidates
        .into_iter()
        .map(|candidate| {
            let cand = normalize(candidate);
            let limit = wanted.len().max(cand.len()) / 2;
            (candidate, edit_distance(&wanted, &cand), limit)
        })
        .filter(|&(_, dist, limit)| dist <= limit)
        .fold(None, |best: Option<(&'a str, usize)>, (candidate, dist, _)| match best {
            Some((_, best_dist)) if best_dist <= dist => best,
            _ => Some((candidate, dist)),
        })
        .map(|(candidate, _)| candidate)
}

fn normalize(s: &str) -> Vec<char> {
    s.chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Insertions, deletions and substitutions needed to turn `a` into `b`.
pub(crate) fn edit_distance(a: &[char], b: &[char]) -> usize {
    // row[j] holds the distance between the current prefix of `a` and b[..j]
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Check if a string is a valid fact identifier: `^[A-Za-z_][A-Za-z0-9_]*$`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
