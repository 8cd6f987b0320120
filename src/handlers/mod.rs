pub mod accounts;
pub mod actors;
pub mod genres;
pub mod movies;
pub mod ratings;
pub mod theaters;
