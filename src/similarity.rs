//! Edit distance between attendee names and the "probably a typo" judgment.

/// Thresholds deciding when two different names are close enough to be
/// reported as the same person.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityRule {
    /// Any pair within this many edits is similar.
    pub max_edits: usize,
    /// The ratio test only applies when the longer name exceeds this length.
    pub ratio_min_len: usize,
    /// Upper bound (exclusive) on `distance / longer_len` for the ratio test.
    pub max_ratio: f64,
}

impl Default for SimilarityRule {
    fn default() -> Self {
        SimilarityRule {
            max_edits: 2,
            ratio_min_len: 5,
            max_ratio: 0.3,
        }
    }
}

impl SimilarityRule {
    /// Judge whether `a` and `b` look like typo variants of one name.
    ///
    /// Names equal ignoring case are never similar; they are exact
    /// duplicates and handled on the submission path instead.
    pub fn is_similar(&self, a: &str, b: &str) -> bool {
        if names_equal(a, b) {
            return false;
        }

        let dist = distance(a, b);
        if dist <= self.max_edits {
            return true;
        }

        let longer = a.chars().count().max(b.chars().count());
        longer > self.ratio_min_len && (dist as f64 / longer as f64) < self.max_ratio
    }
}

/// Case-insensitive equality of two names
///
/// Folds one `char` at a time, the same way [`distance`] compares, so equal
/// names are always zero edits apart.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn chars_match(x: char, y: char) -> bool {
    x == y || x.to_lowercase().eq(y.to_lowercase())
}

/// Case-insensitive Levenshtein distance
///
/// Counts the single-character insertions, deletions and substitutions
/// needed to turn `a` into `b`. Lengths are measured in `char`s, so an
/// empty string is `len` edits away from any other string.
///
/// # Examples
/// ```
/// use rsvp::similarity::distance;
///
/// assert_eq!(distance("Ahmad", "ahmat"), 1);
/// assert_eq!(distance("", "Siti"), 4);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // dp[i][j] is the distance between a[..i] and b[..j]; only the previous
    // row is needed to fill the current one.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            curr[j] = if chars_match(a[i - 1], b[j - 1]) {
                prev[j - 1]
            } else {
                1 + prev[j - 1].min(prev[j]).min(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// [`SimilarityRule::is_similar`] with the default thresholds
pub fn is_similar(a: &str, b: &str) -> bool {
    SimilarityRule::default().is_similar(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_counts_edits() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("Budi Santoso", "Budi Santosoo"), 1);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn distance_ignores_case() {
        assert_eq!(distance("SITI", "siti"), 0);
        assert_eq!(distance("Ahmad", "AHMAT"), 1);
    }

    #[test]
    fn distance_with_empty_strings() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(distance("José", "Jose"), 1);
        assert_eq!(distance("", "Zoë"), 3);
    }

    #[test]
    fn one_letter_typo_is_similar() {
        assert!(is_similar("Ahmad", "Ahmat"));
    }

    #[test]
    fn exact_match_is_not_similar() {
        assert!(!is_similar("Ahmad", "Ahmad"));
        assert!(!is_similar("Ahmad", "aHMAD"));
    }

    #[test]
    fn equality_and_distance_fold_case_alike() {
        // whole-string lowercasing would turn the final sigma into 'ς'
        assert!(names_equal("ΑΣ", "ασ"));
        assert_eq!(distance("ΑΣ", "ασ"), 0);
        assert!(!is_similar("ΑΣ", "ασ"));
    }

    #[test]
    fn short_names_only_use_edit_count() {
        // longest is 3 chars, so only the `distance <= 2` branch applies
        assert!(is_similar("Jo", "Jon"));
        assert!(!is_similar("Ann", "Bob"));
    }

    #[test]
    fn long_names_use_ratio() {
        // 3 edits over 13 chars
        assert!(is_similar("Budi Santoso", "Budy Santosa!"));
        assert!(is_similar("Muhammad Rizki", "Muhamad Risky"));
        // 4 edits over 6 chars
        assert!(!is_similar("Sutomo", "Sudarm"));
    }

    #[test]
    fn ratio_is_exclusive() {
        let rule = SimilarityRule {
            max_edits: 0,
            ratio_min_len: 5,
            max_ratio: 0.3,
        };
        // 3 edits over 10 chars is exactly 0.3
        assert!(!rule.is_similar("abcdefghij", "abcdefgxyz"));
        // 3 edits over 11 chars
        assert!(rule.is_similar("abcdefghijk", "abcdefghxyz"));
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(a in ".{0,24}") {
            prop_assert_eq!(distance(&a, &a), 0);
        }

        #[test]
        fn distance_is_symmetric(a in ".{0,16}", b in ".{0,16}") {
            prop_assert_eq!(distance(&a, &b), distance(&b, &a));
        }

        #[test]
        fn zero_distance_means_equal_names(a in ".{0,16}") {
            let upper = a.to_uppercase();
            prop_assert!(distance(&a, &upper) != 0 || names_equal(&a, &upper));
            prop_assert!(!is_similar(&a, &a));
        }

        #[test]
        fn distance_from_empty_is_length(s in ".{0,24}") {
            prop_assert_eq!(distance("", &s), s.chars().count());
        }
    }
}
