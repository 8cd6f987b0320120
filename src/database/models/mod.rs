pub mod actor;
pub mod genre;
pub mod movie;
pub mod rating;
pub mod theater;
pub mod user;

pub use actor::Actor;
pub use genre::Genre;
pub use movie::Movie;
pub use rating::Rating;
pub use theater::MovieTheater;
pub use user::User;
