use billtracker_api::types::{Bill, History, Person, Vote};
use billtracker_api::{Client, Error, Query, SortDirection, Table, TableQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_bills_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("bills.json");

    Mock::given(method("GET"))
        .and(path("/rest/v1/Bills"))
        .and(query_param("order", "status_date.desc"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let query = TableQuery::new(Table::Bills)
        .with_order_by("status_date")
        .with_sort_direction(SortDirection::Desc)
        .with_range(0, 299);
    let result = client.get_rows::<Bill>(&query).await;
    assert!(result.is_ok());

    let bills = result.unwrap();
    assert_eq!(bills.len(), 3);
    assert_eq!(bills[0].bill_id, 1);
    assert_eq!(bills[0].bill_number.as_deref(), Some("HB 101"));
}

#[tokio::test]
async fn sends_api_key_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/People"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("people.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let query = TableQuery::new(Table::People).with_in("people_id", &[10, 11, 12]);
    let people = client.get_rows::<Person>(&query).await.unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[2].name.as_deref(), Some("Carla Diaz"));
}

#[tokio::test]
async fn filters_are_sent_as_postgrest_operators() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/History"))
        .and(query_param("bill_id", "eq.2"))
        .and(query_param("order", "sequence.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("history.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let query = TableQuery::new(Table::History)
        .with_eq("bill_id", 2)
        .with_order_by("sequence");
    let history = client.get_rows::<History>(&query).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].action.as_deref(), Some("Introduced"));
}

#[tokio::test]
async fn in_list_filter_round_trips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/Votes"))
        .and(query_param("roll_call_id", "in.(41,42)"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("votes.json")))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let query = TableQuery::new(Table::Votes).with_in("roll_call_id", &[41, 42]);
    let votes = client.get_rows::<Vote>(&query).await.unwrap();
    assert_eq!(votes.len(), 3);
}

#[tokio::test]
async fn get_rows_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/Bills"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let result = client
        .get_rows::<Bill>(&TableQuery::new(Table::Bills))
        .await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        _ => panic!("expected HttpStatus error"),
    }
}

#[tokio::test]
async fn get_rows_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/Bills"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), "anon-key");
    let result = client
        .get_rows::<Bill>(&TableQuery::new(Table::Bills))
        .await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn get_rows_unreachable_host() {
    // Port 9 (discard) on localhost is not served by anything in the test environment.
    let client = Client::new("http://127.0.0.1:9", "anon-key")
        .with_timeout(std::time::Duration::from_secs(2));
    let result = client
        .get_rows::<Bill>(&TableQuery::new(Table::Bills))
        .await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
