//! Review rating rules and the specialist reputation aggregate.
//!
//! The aggregate cached on a specialist's profile is a materialized view of
//! their reviews: the arithmetic mean rating and the review count. The
//! baseline is a full recomputation over every rating; the incremental
//! running mean is an optimization that must agree with it.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Ratings at or above this value are recorded as positive reviews.
pub const POSITIVE_RATING_THRESHOLD: i16 = 4;

/// Maximum length of a review comment (characters).
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Validate that a rating is an integer in `[1, 5]`.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

pub fn validate_comment(comment: Option<&str>) -> Result<(), CoreError> {
    match comment {
        Some(c) if c.chars().count() > MAX_COMMENT_LENGTH => Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ))),
        _ => Ok(()),
    }
}

pub fn is_positive(rating: i16) -> bool {
    rating >= POSITIVE_RATING_THRESHOLD
}

/// Cached average rating and review count for one specialist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReputationAggregate {
    pub average_rating: f64,
    pub review_count: i32,
}

impl ReputationAggregate {
    pub fn empty() -> Self {
        Self {
            average_rating: 0.0,
            review_count: 0,
        }
    }

    /// Recompute from every rating the specialist has received.
    pub fn recompute(ratings: &[i16]) -> Self {
        if ratings.is_empty() {
            return Self::empty();
        }
        let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        let count = ratings.len();
        Self {
            average_rating: sum as f64 / count as f64,
            review_count: count as i32,
        }
    }

    /// Fold one new rating into the aggregate with a running mean.
    pub fn with_rating(self, rating: i16) -> Self {
        let count = self.review_count + 1;
        let average_rating =
            self.average_rating + (f64::from(rating) - self.average_rating) / f64::from(count);
        Self {
            average_rating,
            review_count: count,
        }
    }
}

/// How the completion transaction refreshes the cached aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReputationStrategy {
    /// Read every rating for the specialist and recompute the mean.
    #[default]
    FullRecompute,
    /// Apply a running-mean update to the locked profile row.
    Incremental,
}

impl FromStr for ReputationStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "full_recompute" => Ok(ReputationStrategy::FullRecompute),
            "incremental" => Ok(ReputationStrategy::Incremental),
            other => Err(CoreError::Validation(format!(
                "Unknown reputation strategy '{other}'. Must be one of: full, incremental"
            ))),
        }
    }
}
