use axum::extract::Multipart;
use serde::Serialize;

use super::{validation, FileUpload};
use crate::database::models::Actor;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDto {
    pub id: i32,
    pub name: String,
    pub picture: Option<String>,
}

impl From<Actor> for ActorDto {
    fn from(actor: Actor) -> Self {
        Self { id: actor.id, name: actor.name, picture: actor.picture }
    }
}

/// Cast entry of a movie detail: actor fields plus the association's
/// character name and display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieActorDto {
    pub id: i32,
    pub name: String,
    pub picture: Option<String>,
    pub character: Option<String>,
    pub order: i32,
}

/// Actor create/update payload, decoded from a multipart form because the
/// picture arrives as a file part.
#[derive(Debug, Default)]
pub struct ActorForm {
    pub name: String,
    pub picture: Option<FileUpload>,
}

impl ActorForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = ActorForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "picture" => {
                    let file_name = field.file_name().unwrap_or("picture").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("invalid file part: {}", e)))?;
                    form.picture = Some(FileUpload { file_name, bytes: bytes.to_vec() });
                }
                "name" => {
                    form.name = field
                        .text()
                        .await
                        .map_err(|e| ApiError::bad_request(format!("invalid form field: {}", e)))?;
                }
                _ => {}
            }
        }

        Ok(form)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::require(&mut errors, "name", &self.name);
        validation::max_len(&mut errors, "name", &self.name, 120);
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
    fn actor_form_requires_a_name() {
        let form = ActorForm::default();
        assert!(form.validate().is_err());

        let form = ActorForm { name: "Sigourney Weaver".to_string(), picture: None };
        assert!(form.validate().is_ok());
    }
}
