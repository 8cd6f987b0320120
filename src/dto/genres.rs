use serde::{Deserialize, Serialize};

use super::validation;
use crate::database::models::Genre;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self { id: genre.id, name: genre.name }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreCreation {
    pub name: String,
}

impl GenreCreation {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::require(&mut errors, "name", &self.name);
        validation::max_len(&mut errors, "name", &self.name, 10);
        validation::first_letter_uppercase(&mut errors, "name", &self.name);
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
    fn lowercase_genre_name_fails_validation() {
        let dto = GenreCreation { name: "comedy".to_string() };
        let err = dto.validate().expect_err("should fail");
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors, vec!["name:First letter should be uppercase"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn capitalized_genre_name_passes() {
        let dto = GenreCreation { name: "Comedy".to_string() };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn overlong_genre_name_fails() {
        let dto = GenreCreation { name: "Blockbuster!".to_string() };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn empty_name_reports_required() {
        let dto = GenreCreation { name: String::new() };
        let err = dto.validate().expect_err("should fail");
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors, vec!["name:The field name is required"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
