//! Manner degree, the reputation "temperature" shown on profiles.

use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid quoted-text regex"));

/// Applies every review score to the starting degree.
///
/// Scores outside 1..=5 leave the degree untouched.
pub fn get_manner_degree(initial_degree: f64, review_scores: &[i64]) -> f64 {
    review_scores
        .iter()
        .fold(initial_degree, |degree, score| degree + score_delta(*score))
}

fn score_delta(score: i64) -> f64 {
    match score {
        1 => -0.5,
        2 => -0.25,
        3 => 0.25,
        4 => 0.5,
        5 => 0.75,
        _ => 0.0,
    }
}

/// Extracts the review boxes stored as double-quoted phrases,
/// e.g. `["친절해요","응답이 빨라요"]`.
pub fn review_boxes(review: &str) -> Vec<String> {
    QUOTED
        .captures_iter(review)
        .map(|captures| captures[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_score_bucket_has_its_own_delta() {
        assert_eq!(get_manner_degree(36.5, &[1]), 36.0);
        assert_eq!(get_manner_degree(36.5, &[2]), 36.25);
        assert_eq!(get_manner_degree(36.5, &[3]), 36.75);
        assert_eq!(get_manner_degree(36.5, &[4]), 37.0);
        assert_eq!(get_manner_degree(36.5, &[5]), 37.25);
    }

    #[test]
    fn deltas_accumulate_across_reviews() {
        assert_eq!(get_manner_degree(36.5, &[1, 2, 3, 4, 5]), 37.25);
        assert_eq!(get_manner_degree(36.5, &[5, 5, 5, 5]), 39.5);
    }

    #[test]
    fn out_of_range_scores_are_ignored() {
        assert_eq!(get_manner_degree(36.5, &[0, 6, -3, 100]), 36.5);
        assert_eq!(get_manner_degree(36.5, &[0, 5, 9]), 37.25);
        assert_eq!(get_manner_degree(36.5, &[]), 36.5);
    }

    #[test]
    fn review_boxes_strips_quotes_in_order() {
        let boxes = review_boxes(r#"["친절하고 매너가 좋아요","시간 약속을 잘 지켜요"]"#);
        assert_eq!(boxes, vec!["친절하고 매너가 좋아요", "시간 약속을 잘 지켜요"]);
    }

    #[test]
    fn review_boxes_without_quotes_is_empty() {
        assert!(review_boxes("no quoted text").is_empty());
        assert!(review_boxes("").is_empty());
    }
}
