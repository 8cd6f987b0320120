// Filter/pagination composition: what SQL and parameters each combination
// of optional predicates builds, and how paging folds in.

use marquee_api::filter::MovieFilter;
use marquee_api::pagination::Page;
use serde_json::json;

fn page(page: i64, size: i64) -> Page {
    Page { page, records_per_page: size }
}

#[test]
fn independent_filters_intersect() {
    // inTheaters + genre: both constraints present, ANDed
    let filter = MovieFilter { in_theaters: true, genre_id: Some(7), ..Default::default() };
    let sql = filter.to_sql(&page(1, 10));

    assert!(sql.query.contains("in_theaters = TRUE"));
    assert!(sql.query.contains("genre_id = $1"));
    assert!(sql.query.contains(" AND "));
    assert_eq!(sql.params, vec![json!(7)]);
}

#[test]
fn results_are_always_title_ordered() {
    for filter in [
        MovieFilter::default(),
        MovieFilter { title: Some("alien".into()), ..Default::default() },
        MovieFilter { upcoming_releases: true, ..Default::default() },
    ] {
        let sql = filter.to_sql(&page(1, 10));
        assert!(sql.query.contains("ORDER BY title ASC"), "missing order in: {}", sql.query);
    }
}

#[test]
fn page_size_above_maximum_acts_as_maximum() {
    // Requesting 200 per page behaves exactly as if 50 had been requested
    let oversized = MovieFilter::default().to_sql(&page(1, 200));
    let clamped = MovieFilter::default().to_sql(&page(1, 50));
    assert_eq!(oversized.query, clamped.query);
    assert!(oversized.query.ends_with("LIMIT 50 OFFSET 0"));
}

#[test]
fn later_pages_shift_the_offset_against_the_clamped_size() {
    let sql = MovieFilter::default().to_sql(&page(3, 200));
    assert!(sql.query.ends_with("LIMIT 50 OFFSET 100"));
}

#[test]
fn count_query_ignores_paging_entirely() {
    let filter = MovieFilter { title: Some("alien".into()), in_theaters: true, ..Default::default() };

    let first = filter.to_count_sql();
    let later = filter.to_count_sql();
    assert_eq!(first.query, later.query, "count must not depend on the requested page");
    assert!(!first.query.contains("LIMIT"));
    assert!(!first.query.contains("OFFSET"));
    assert!(!first.query.contains("ORDER BY"));
}

#[test]
fn paged_and_count_queries_share_one_where_clause() {
    let filter = MovieFilter {
        title: Some("alien".into()),
        in_theaters: true,
        upcoming_releases: true,
        genre_id: Some(7),
    };

    let paged = filter.to_sql(&page(2, 10));
    let count = filter.to_count_sql();

    let where_of = |q: &str| {
        let start = q.find("WHERE").expect("has WHERE");
        let end = q.find(" ORDER BY").unwrap_or(q.len());
        q[start..end].to_string()
    };

    assert_eq!(where_of(&paged.query), where_of(&count.query));
    assert_eq!(paged.params, count.params);
}
