use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

const REVIEWS_JSON: &str = include_str!("../content/reviews.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub avatar: String,
    pub rating: u8,
    pub comment: String,
    pub date: String, // shown as written
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ParentTestimonial {
    pub name: String,
    pub avatar: String,
    pub relation: String,
    pub quote: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReviewsContent {
    pub reviews: Vec<Review>,
    pub parents: Vec<ParentTestimonial>,
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("malformed review content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate review id {0}")]
    DuplicateId(u32),
    #[error("review {id} has rating {rating}, expected 1-5")]
    RatingOutOfRange { id: u32, rating: u8 },
}

impl ReviewsContent {
    /// The review list compiled into the binary.
    pub fn load() -> Result<Self, ContentError> {
        Self::from_json(REVIEWS_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let content: Self = serde_json::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for review in &self.reviews {
            if !seen.insert(review.id) {
                return Err(ContentError::DuplicateId(review.id));
            }
            if !(1..=5).contains(&review.rating) {
                return Err(ContentError::RatingOutOfRange {
                    id: review.id,
                    rating: review.rating,
                });
            }
        }
        Ok(())
    }
}

/// Mean rating, `0.0` when there is nothing to average.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(total) / reviews.len() as f64
}

pub fn format_average(average: f64) -> String {
    format!("{:.1}", average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn review(id: u32, rating: u8) -> Review {
        Review {
            id,
            name: format!("Reviewer {}", id),
            age: 16,
            avatar: "RV".to_string(),
            rating,
            comment: String::new(),
            date: "May 1, 2023".to_string(),
        }
    }

    #[test]
    fn embedded_content_loads() {
        let content = ReviewsContent::load().expect("embedded reviews should parse");
        let ratings: Vec<u8> = content.reviews.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5, 4, 5, 5, 4, 5, 3, 5, 4]);
        assert_eq!(content.reviews[0].name, "Alex Johnson");
        assert_eq!(content.reviews[8].date, "December 20, 2023");

        let parents: Vec<&str> = content.parents.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(parents, vec!["Jennifer Parker", "Michael Johnson"]);
    }

    #[test]
    fn embedded_average_displays_one_decimal() {
        let content = ReviewsContent::load().expect("embedded reviews should parse");
        let average = average_rating(&content.reviews);
        assert!((average - 40.0 / 9.0).abs() < f64::EPSILON);
        assert_eq!(format_average(average), "4.4");
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(format_average(average_rating(&[])), "0.0");
    }

    #[test]
    fn average_of_uniform_ratings() {
        let reviews = vec![review(1, 3), review(2, 3)];
        assert_eq!(format_average(average_rating(&reviews)), "3.0");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = r#"{
            "reviews": [
                {"id": 1, "name": "A", "age": 15, "avatar": "A", "rating": 5, "comment": "", "date": ""},
                {"id": 1, "name": "B", "age": 15, "avatar": "B", "rating": 4, "comment": "", "date": ""}
            ],
            "parents": []
        }"#;
        assert!(matches!(
            ReviewsContent::from_json(raw),
            Err(ContentError::DuplicateId(1))
        ));
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let raw = r#"{
            "reviews": [
                {"id": 4, "name": "A", "age": 15, "avatar": "A", "rating": 0, "comment": "", "date": ""}
            ],
            "parents": []
        }"#;
        assert!(matches!(
            ReviewsContent::from_json(raw),
            Err(ContentError::RatingOutOfRange { id: 4, rating: 0 })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ReviewsContent::from_json("{\"reviews\": [").unwrap_err();
        assert!(matches!(err, ContentError::Parse(_)));
        assert!(err.to_string().starts_with("malformed review content"));
    }
}
