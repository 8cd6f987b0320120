pub mod movie_filter;
pub mod types;

pub use movie_filter::MovieFilter;
pub use types::{SortDirection, SqlResult};
