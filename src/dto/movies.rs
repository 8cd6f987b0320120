use axum::extract::Multipart;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::actors::MovieActorDto;
use super::genres::GenreDto;
use super::theaters::MovieTheaterDto;
use super::{validation, FileUpload};
use crate::database::models::Movie;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: i32,
    pub title: String,
    pub summary: Option<String>,
    pub trailer: Option<String>,
    pub in_theaters: bool,
    pub release_date: NaiveDate,
    pub poster: Option<String>,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            summary: movie.summary,
            trailer: movie.trailer,
            in_theaters: movie.in_theaters,
            release_date: movie.release_date,
            poster: movie.poster,
        }
    }
}

/// Detail view: the movie plus its associations and the rating aggregate.
/// `average_vote` keeps full float precision; both vote fields are zero when
/// there is nothing to report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetailDto {
    #[serde(flatten)]
    pub movie: MovieDto,
    pub genres: Vec<GenreDto>,
    pub movie_theaters: Vec<MovieTheaterDto>,
    pub actors: Vec<MovieActorDto>,
    pub average_vote: f64,
    pub user_vote: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageDto {
    pub upcoming_releases: Vec<MovieDto>,
    pub in_theaters: Vec<MovieDto>,
}

/// Form prefill for movie creation: every selectable genre and theater.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePostGetDto {
    pub genres: Vec<GenreDto>,
    pub movie_theaters: Vec<MovieTheaterDto>,
}

/// Form prefill for movie editing: current detail plus the complement sets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePutGetDto {
    pub movie: MovieDetailDto,
    pub selected_genres: Vec<GenreDto>,
    pub non_selected_genres: Vec<GenreDto>,
    pub selected_movie_theaters: Vec<MovieTheaterDto>,
    pub non_selected_movie_theaters: Vec<MovieTheaterDto>,
    pub actors: Vec<MovieActorDto>,
}

/// Cast entry as submitted on movie create/update. Display order is not part
/// of the payload: it is reassigned from submission order on every write.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieActorForm {
    pub actor_id: i32,
    #[serde(default)]
    pub character: Option<String>,
}

/// Movie create/update payload, decoded from a multipart form. The list
/// valued fields arrive as delimited text and go through the typed parsers
/// below instead of a reflective binder.
#[derive(Debug, Default)]
pub struct MovieForm {
    pub title: String,
    pub summary: Option<String>,
    pub trailer: Option<String>,
    pub in_theaters: bool,
    pub release_date: Option<NaiveDate>,
    pub poster: Option<FileUpload>,
    pub genres_ids: Vec<i32>,
    pub movie_theaters_ids: Vec<i32>,
    pub actors: Vec<MovieActorForm>,
}

impl MovieForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = MovieForm::default();
        let mut errors = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == "poster" {
                let file_name = field.file_name().unwrap_or("poster").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("invalid file part: {}", e)))?;
                form.poster = Some(FileUpload { file_name, bytes: bytes.to_vec() });
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("invalid form field: {}", e)))?;

            match name.as_str() {
                "title" => form.title = text,
                "summary" => form.summary = Some(text).filter(|s| !s.is_empty()),
                "trailer" => form.trailer = Some(text).filter(|s| !s.is_empty()),
                "inTheaters" => form.in_theaters = matches!(text.as_str(), "true" | "True" | "on" | "1"),
                "releaseDate" => match text.parse::<NaiveDate>() {
                    Ok(date) => form.release_date = Some(date),
                    Err(_) => errors.push(format!("releaseDate:'{}' is not a valid date", text)),
                },
                "genresIds" => match parse_int_list(&text) {
                    Ok(ids) => form.genres_ids = ids,
                    Err(msg) => errors.push(format!("genresIds:{}", msg)),
                },
                "movieTheatersIds" => match parse_int_list(&text) {
                    Ok(ids) => form.movie_theaters_ids = ids,
                    Err(msg) => errors.push(format!("movieTheatersIds:{}", msg)),
                },
                "actors" => match parse_actor_list(&text) {
                    Ok(actors) => form.actors = actors,
                    Err(msg) => errors.push(format!("actors:{}", msg)),
                },
                _ => {}
            }
        }

        if errors.is_empty() {
            Ok(form)
        } else {
            Err(ApiError::validation(errors))
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        validation::require(&mut errors, "title", &self.title);
        validation::max_len(&mut errors, "title", &self.title, 300);
        if self.release_date.is_none() {
            errors.push("releaseDate:The field releaseDate is required".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(errors))
        }
    }
}

/// Parse a multi-value form field into ids. Accepts a comma-delimited list
/// ("1,2,3") or a JSON array ("[1,2,3]"); empty input is an empty list.
pub fn parse_int_list(raw: &str) -> Result<Vec<i32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<i32>>(trimmed)
            .map_err(|_| format!("'{}' is not a list of integers", raw));
    }

    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| format!("'{}' is not a list of integers", raw))
        })
        .collect()
}

/// Parse the cast field: a JSON array of `{actorId, character}` objects.
pub fn parse_actor_list(raw: &str) -> Result<Vec<MovieActorForm>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<MovieActorForm>>(trimmed)
        .map_err(|_| "expected a JSON list of {actorId, character} objects".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_delimited_ints_parse() {
        assert_eq!(parse_int_list("1,2,3").expect("parse"), vec![1, 2, 3]);
        assert_eq!(parse_int_list(" 4 , 5 ").expect("parse"), vec![4, 5]);
    }

    #[test]
    fn json_list_form_parses() {
        assert_eq!(parse_int_list("[7, 8]").expect("parse"), vec![7, 8]);
    }

    #[test]
    fn empty_field_is_an_empty_list() {
        assert!(parse_int_list("").expect("parse").is_empty());
        assert!(parse_int_list("  ").expect("parse").is_empty());
    }

    #[test]
    fn garbage_reports_a_field_error() {
        assert!(parse_int_list("1,two,3").is_err());
        assert!(parse_int_list("[1,").is_err());
    }

    #[test]
    fn actor_list_parses_with_optional_character() {
        let parsed = parse_actor_list(r#"[{"actorId":3,"character":"Ripley"},{"actorId":9}]"#)
            .expect("parse");
        assert_eq!(
            parsed,
            vec![
                MovieActorForm { actor_id: 3, character: Some("Ripley".to_string()) },
                MovieActorForm { actor_id: 9, character: None },
            ]
        );
    }

    #[test]
    fn movie_form_requires_title_and_release_date() {
        let form = MovieForm::default();
        let err = form.validate().expect_err("should fail");
        match err {
            ApiError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.starts_with("title:")));
                assert!(errors.iter().any(|e| e.starts_with("releaseDate:")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
