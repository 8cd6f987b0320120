use serde::Deserialize;
use serde_json::{json, Value};

use super::types::{SortDirection, SqlResult};
use crate::pagination::Page;

const MOVIE_COLUMNS: &str = "id, title, summary, trailer, in_theaters, release_date, poster";

/// Optional movie list filters, all independently combinable. Absent or
/// default-valued filters impose no constraint; filtering is never an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub in_theaters: bool,
    pub upcoming_releases: bool,
    pub genre_id: Option<i32>,
}

impl MovieFilter {
    /// WHERE conjunction of whichever filters are present, with numbered
    /// placeholders starting at $1.
    fn where_clause(&self) -> (Vec<String>, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(title) = self.title.as_deref() {
            if !title.is_empty() {
                params.push(json!(title));
                conditions.push(format!("title ILIKE '%' || ${} || '%'", params.len()));
            }
        }

        if self.in_theaters {
            conditions.push("in_theaters = TRUE".to_string());
        }

        if self.upcoming_releases {
            // "Upcoming" means strictly later than today at evaluation time
            conditions.push("release_date > CURRENT_DATE".to_string());
        }

        // Genre id 0 is the unset marker from the query string
        if let Some(genre_id) = self.genre_id.filter(|id| *id != 0) {
            params.push(json!(genre_id));
            conditions.push(format!(
                "id IN (SELECT movie_id FROM movies_genres WHERE genre_id = ${})",
                params.len()
            ));
        }

        (conditions, params)
    }

    /// Full page query: filters, title ordering, then paging.
    pub fn to_sql(&self, page: &Page) -> SqlResult {
        let (conditions, params) = self.where_clause();

        let query = [
            format!("SELECT {}", MOVIE_COLUMNS),
            "FROM movies".to_string(),
            if conditions.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", conditions.join(" AND "))
            },
            format!("ORDER BY title {}", SortDirection::Asc.to_sql()),
            page.to_sql(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    /// Count over the same WHERE, unordered and unpaginated. Feeds the
    /// totalAmountOfRecords response header.
    pub fn to_count_sql(&self) -> SqlResult {
        let (conditions, params) = self.where_clause();

        let query = if conditions.is_empty() {
            "SELECT COUNT(*) FROM movies".to_string()
        } else {
            format!("SELECT COUNT(*) FROM movies WHERE {}", conditions.join(" AND "))
        };

        SqlResult { query, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_page() -> Page {
        Page { page: 1, records_per_page: 10 }
    }

    #[test]
    fn no_filters_means_no_where_clause() {
        let sql = MovieFilter::default().to_sql(&first_page());
        assert_eq!(
            sql.query,
            "SELECT id, title, summary, trailer, in_theaters, release_date, poster \
             FROM movies ORDER BY title ASC LIMIT 10 OFFSET 0"
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn title_filter_binds_substring_param() {
        let filter = MovieFilter { title: Some("alien".to_string()), ..Default::default() };
        let sql = filter.to_sql(&first_page());
        assert!(sql.query.contains("WHERE title ILIKE '%' || $1 || '%'"));
        assert_eq!(sql.params, vec![serde_json::json!("alien")]);
    }

    #[test]
    fn empty_title_imposes_no_constraint() {
        let filter = MovieFilter { title: Some(String::new()), ..Default::default() };
        let sql = filter.to_sql(&first_page());
        assert!(!sql.query.contains("WHERE"));
    }

    #[test]
    fn genre_zero_is_treated_as_unset() {
        let filter = MovieFilter { genre_id: Some(0), ..Default::default() };
        let sql = filter.to_sql(&first_page());
        assert!(!sql.query.contains("WHERE"));
        assert!(sql.params.is_empty());
    }

    #[test]
    fn all_filters_compose_as_a_conjunction() {
        let filter = MovieFilter {
            title: Some("alien".to_string()),
            in_theaters: true,
            upcoming_releases: true,
            genre_id: Some(7),
        };
        let sql = filter.to_sql(&first_page());
        assert!(sql.query.contains(
            "WHERE title ILIKE '%' || $1 || '%' \
             AND in_theaters = TRUE \
             AND release_date > CURRENT_DATE \
             AND id IN (SELECT movie_id FROM movies_genres WHERE genre_id = $2)"
        ));
        assert_eq!(sql.params.len(), 2);
    }

    #[test]
    fn count_sql_shares_the_where_but_not_paging() {
        let filter = MovieFilter { in_theaters: true, genre_id: Some(7), ..Default::default() };
        let sql = filter.to_count_sql();
        assert_eq!(
            sql.query,
            "SELECT COUNT(*) FROM movies WHERE in_theaters = TRUE \
             AND id IN (SELECT movie_id FROM movies_genres WHERE genre_id = $1)"
        );
        assert!(!sql.query.contains("LIMIT"));
        assert_eq!(sql.params, vec![serde_json::json!(7)]);
    }

    #[test]
    fn ordering_is_stable_across_identical_requests() {
        let filter = MovieFilter { in_theaters: true, ..Default::default() };
        let a = filter.to_sql(&first_page());
        let b = filter.to_sql(&first_page());
        assert_eq!(a.query, b.query);
    }
}
