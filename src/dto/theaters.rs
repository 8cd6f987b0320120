use serde::{Deserialize, Serialize};

use super::validation;
use crate::database::models::MovieTheater;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieTheaterDto {
    pub id: i32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<MovieTheater> for MovieTheaterDto {
    fn from(theater: MovieTheater) -> Self {
        Self {
            id: theater.id,
            name: theater.name,
            latitude: theater.latitude,
            longitude: theater.longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieTheaterCreation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl MovieTheaterCreation {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::require(&mut errors, "name", &self.name);
        validation::max_len(&mut errors, "name", &self.name, 75);
        validation::range_f64(&mut errors, "latitude", self.latitude, -90.0, 90.0);
        validation::range_f64(&mut errors, "longitude", self.longitude, -180.0, 180.0);
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

    fn theater(latitude: f64, longitude: f64) -> MovieTheaterCreation {
        MovieTheaterCreation { name: "Agora".to_string(), latitude, longitude }
    }

    #[test]
    fn coordinates_on_the_boundary_pass() {
        assert!(theater(90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        let err = theater(91.0, 181.0).validate().expect_err("should fail");
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("latitude:"));
                assert!(errors[1].starts_with("longitude:"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
