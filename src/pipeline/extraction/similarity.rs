//! String similarity with partial-overlap semantics, scored 0-100.

/// Scores how well two strings match. 100 means one contains the other
/// (or an equally good alignment); 0 means nothing in common.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Partial ratio: slide the shorter string across the longer one and keep
/// the best window score.
///
/// Each window is scored with the indel ratio `2·LCS / (|a| + |b|)`, which is
/// what sequence-matcher style ratios compute. Windows that run off the end
/// of the longer string are truncated, so a symptom cut short at the end of a
/// clause still gets partial credit. Works on `char`s, so non-ASCII input is
/// compared code point by code point instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatio;

impl SimilarityScorer for PartialRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        partial_ratio(a, b)
    }
}

pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.is_empty() {
        return 0;
    }
    if shorter.len() == longer.len() {
        return ratio(&shorter, &longer);
    }

    let mut best = 0;
    for start in 0..longer.len() {
        let end = (start + shorter.len()).min(longer.len());
        let score = ratio(&shorter, &longer[start..end]);
        if score > best {
            best = score;
            if best == 100 {
                break;
            }
        }
    }
    best
}

/// Full-string indel ratio, rounded to the nearest integer.
pub fn ratio(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = lcs_len(a, b);
    ((200 * lcs) as f64 / total as f64).round() as u8
}

/// Longest common subsequence length, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &a_ch in a {
        for (j, &b_ch) in b.iter().enumerate() {
            curr[j + 1] = if a_ch == b_ch {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn contained_string_scores_100() {
        assert_eq!(partial_ratio("cough", "i have a dry cough"), 100);
        assert_eq!(partial_ratio("i have a dry cough", "cough"), 100);
    }

    #[test]
    fn one_typo_stays_above_80() {
        // "cough" vs "cogh": LCS 4 → 2·4/9 ≈ 89
        assert!(partial_ratio("cough", "i have a bad cogh") >= 80);
        assert!(partial_ratio("headache", "terrible headahce today") >= 80);
    }

    #[test]
    fn unrelated_text_scores_low() {
        assert!(partial_ratio("chest pain", "purple elephant") < 80);
        assert!(partial_ratio("vomiting", "the weather is nice") < 80);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "cough"), 0);
        assert_eq!(partial_ratio("cough", ""), 0);
        assert_eq!(partial_ratio("", ""), 0);
    }

    #[test]
    fn equal_length_uses_full_ratio() {
        assert_eq!(partial_ratio("abcd", "abcd"), 100);
        assert_eq!(partial_ratio("abcd", "wxyz"), 0);
    }

    #[test]
    fn truncated_window_at_end_gets_partial_credit() {
        // "cou" at the end of the clause: 2·3/(5+3) = 75
        assert_eq!(partial_ratio("cough", "i have a cou"), 75);
    }

    #[test]
    fn non_ascii_does_not_panic() {
        let score = partial_ratio("fever", "j'ai de la fièvre 🤒 et je tousse");
        assert!(score <= 100);
        assert_eq!(partial_ratio("can’t sleep", "i can’t sleep at night"), 100);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = chars("nausea");
        let b = chars("nausia");
        assert_eq!(ratio(&a, &b), ratio(&b, &a));
        assert_eq!(ratio(&a, &b), 83);
    }

    #[test]
    fn lcs_basic() {
        assert_eq!(lcs_len(&chars("kitten"), &chars("sitting")), 4);
        assert_eq!(lcs_len(&chars("abc"), &chars("abc")), 3);
        assert_eq!(lcs_len(&chars(""), &chars("abc")), 0);
    }

    #[test]
    fn scorer_trait_delegates() {
        let scorer = PartialRatio;
        assert_eq!(scorer.score("rash", "skin rash on arms"), 100);
    }
}
