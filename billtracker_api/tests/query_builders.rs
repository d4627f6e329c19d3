use billtracker_api::{Filter, Query, SortDirection, Table, TableQuery};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.supabase.co/rest/v1/Bills").unwrap()
}

#[test]
fn table_query_defaults() {
    let query = TableQuery::new(Table::Bills);
    assert_eq!(query.common.sort_direction, SortDirection::Asc);
    assert!(query.common.order_by.is_none());
    let url = query.add_to_url(&base_url());
    assert_eq!(url.query(), Some("select=*"));
}

#[test]
fn committee_page_query() {
    let url = TableQuery::new(Table::Bills)
        .with_eq("committee", "Ways and Means")
        .with_order_by("bill_id")
        .with_sort_direction(SortDirection::Desc)
        .with_range(100, 199)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("committee=eq.Ways+and+Means"));
    assert!(query.contains("order=bill_id.desc"));
    assert!(query.contains("offset=100"));
    assert!(query.contains("limit=100"));
}

#[test]
fn offset_and_limit_builders() {
    let url = TableQuery::new(Table::Votes)
        .with_offset(10)
        .with_limit(5)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("offset=10"));
    assert!(query.contains("limit=5"));
}

#[test]
fn filters_are_kept_in_order() {
    let query = TableQuery::new(Table::Sponsors)
        .with_in("bill_id", &[1, 2])
        .with_eq("position", 1);
    assert_eq!(
        query.filters,
        vec![
            Filter::In {
                column: "bill_id".to_string(),
                values: vec!["1".to_string(), "2".to_string()],
            },
            Filter::Eq {
                column: "position".to_string(),
                value: "1".to_string(),
            },
        ]
    );
    assert_eq!(query.filters[0].column(), "bill_id");
}

#[test]
fn sort_direction_parses() {
    assert_eq!("asc".parse::<SortDirection>(), Ok(SortDirection::Asc));
    assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Desc));
    assert!("down".parse::<SortDirection>().is_err());
    assert_eq!(SortDirection::Desc.to_string(), "desc");
}

#[test]
fn table_names_match_schema() {
    let names: Vec<String> = [
        Table::Bills,
        Table::People,
        Table::Sponsors,
        Table::History,
        Table::Rollcalls,
        Table::Votes,
    ]
    .iter()
    .map(|t| t.to_string())
    .collect();
    assert_eq!(
        names,
        vec!["Bills", "People", "Sponsors", "History", "Rollcalls", "Votes"]
    );
}
