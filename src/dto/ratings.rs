use serde::Deserialize;

use super::validation;
use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub movie_id: i32,
    pub rate: i32,
}

impl RatingSubmission {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::range_i32(&mut errors, "rate", self.rate, 1, 5);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_must_be_one_to_five() {
        assert!(RatingSubmission { movie_id: 1, rate: 0 }.validate().is_err());
        assert!(RatingSubmission { movie_id: 1, rate: 6 }.validate().is_err());
        assert!(RatingSubmission { movie_id: 1, rate: 1 }.validate().is_ok());
        assert!(RatingSubmission { movie_id: 1, rate: 5 }.validate().is_ok());
    }
}
