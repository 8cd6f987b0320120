pub mod accounts;
pub mod actors;
pub mod genres;
pub mod movies;
pub mod ratings;
pub mod theaters;
pub mod validation;

/// An uploaded file part: original name (for the extension) plus its bytes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
