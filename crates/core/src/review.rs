//! Review decision types and feedback validation.
//!
//! A reviewer's decision on a record is either a classification [`Choice`]
//! or a rhythm/quality rating with an optional comment. Which shape a
//! deployment accepts is selected by [`ReviewMode`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted rhythm/quality rating.
pub const RATING_MIN: i16 = 1;

/// Highest accepted rhythm/quality rating.
pub const RATING_MAX: i16 = 5;

/// Maximum length for a feedback comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/* --------------------------------------------------------------------------
Choice
-------------------------------------------------------------------------- */

/// Classification decision on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Approved,
    Rejected,
    Unknown,
}

impl Choice {
    /// All choices, in display order.
    pub const ALL: [Choice; 3] = [Choice::Approved, Choice::Rejected, Choice::Unknown];

    /// The value stored in `data_checks.choice`.
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::Approved => "approved",
            Choice::Rejected => "rejected",
            Choice::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Choice::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid choice '{s}'. Must be one of: approved, rejected, unknown"
                ))
            })
    }
}

/* --------------------------------------------------------------------------
Review mode
-------------------------------------------------------------------------- */

/// Which feedback shape the deployment collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    /// ECG classification: every submission carries a [`Choice`].
    #[default]
    Classification,
    /// MIDI review: every submission carries a rhythm and quality rating.
    Rating,
}

impl FromStr for ReviewMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classification" | "ecg_classification" => Ok(ReviewMode::Classification),
            "rating" | "midi_review" => Ok(ReviewMode::Rating),
            other => Err(CoreError::Validation(format!(
                "Invalid review mode '{other}'. Must be 'classification' or 'rating'"
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// The reviewer-supplied parts of a feedback submission.
#[derive(Debug, Clone, Default)]
pub struct FeedbackInput<'a> {
    pub choice: Option<Choice>,
    pub rhythm: Option<i16>,
    pub quality: Option<i16>,
    pub comment: Option<&'a str>,
}

/// Validate a single rating value.
pub fn validate_rating(field: &str, value: i16) -> Result<(), CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {RATING_MIN} and {RATING_MAX}, got {value}"
        )))
    }
}

/// Validate a feedback submission against the deployment's review mode.
///
/// Ratings and comments are range-checked whenever present, regardless of
/// mode, so an amendment may carry them alongside a choice.
pub fn validate_feedback(mode: ReviewMode, input: &FeedbackInput<'_>) -> Result<(), CoreError> {
    if let Some(rhythm) = input.rhythm {
        validate_rating("rhythm", rhythm)?;
    }
    if let Some(quality) = input.quality {
        validate_rating("quality", quality)?;
    }
    if let Some(comment) = input.comment {
        if comment.chars().count() > MAX_COMMENT_LENGTH {
            return Err(CoreError::Validation(format!(
                "comment must be at most {MAX_COMMENT_LENGTH} characters"
            )));
        }
    }

    match mode {
        ReviewMode::Classification if input.choice.is_none() => Err(CoreError::Validation(
            "choice is required for classification feedback".to_string(),
        )),
        ReviewMode::Rating if input.rhythm.is_none() || input.quality.is_none() => {
            Err(CoreError::Validation(
                "rhythm and quality are both required for rating feedback".to_string(),
            ))
        }
        _ => Ok(()),
    }
}
