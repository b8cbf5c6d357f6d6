//! End-to-end searches over real HTTP.
//!
//! # Design
//! Starts servers on random ports and drives `SearchClient` through
//! `UreqTransport`. Besides the real search service, small stub routers
//! produce the misbehaving responses (slow, malformed) the client has to
//! classify.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use search_core::{
    OrderBy, SearchClient, SearchError, SearchRequest, SearchResponse, UreqTransport, User,
};
use search_server::{app, dataset::XmlFileProvider, AppState};

const TOKEN: &str = "integration-token";

/// Serve `router` on a random port from a background thread.
fn spawn(router: Router) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, router).await
        })
        .unwrap();
    });

    addr
}

fn search_service() -> SocketAddr {
    let dataset = format!("{}/testdata/dataset.xml", env!("CARGO_MANIFEST_DIR"));
    spawn(app(AppState::new(TOKEN, XmlFileProvider::new(dataset))))
}

fn client(addr: SocketAddr) -> SearchClient {
    SearchClient::new(&format!("http://{addr}"), TOKEN)
}

fn find(addr: SocketAddr, req: SearchRequest) -> Result<SearchResponse, SearchError> {
    client(addr).find_users(&UreqTransport::default(), &req)
}

fn ids(users: &[User]) -> Vec<i64> {
    users.iter().map(|u| u.id).collect()
}

#[test]
fn search_scenarios() {
    let addr = search_service();

    // One user from position 1, probe record present.
    let page = find(
        addr,
        SearchRequest {
            limit: 1,
            offset: 1,
            order_by: OrderBy::AsIs,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&page.users), vec![1]);
    assert_eq!(page.users[0].name, "Hilda Mayer");
    assert!(page.next_page);

    // Limit clamped to 25, only one record left after offset 34.
    let page = find(
        addr,
        SearchRequest {
            limit: 26,
            offset: 34,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&page.users), vec![34]);
    assert_eq!(page.users[0].name, "Kane Sharp");
    assert!(!page.next_page);

    // A full page of 25 with more to come.
    let page = find(
        addr,
        SearchRequest {
            limit: 100,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page.users.len(), 25);
    assert!(page.next_page);

    // Filter by about.
    let page = find(
        addr,
        SearchRequest {
            limit: 25,
            query: "about=Nulla cillum enim voluptate consequat laborum".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&page.users), vec![0]);
    assert_eq!(page.users[0].name, "Boyd Wolf");
    assert!(!page.next_page);

    // Filter by name.
    let page = find(
        addr,
        SearchRequest {
            limit: 25,
            query: "name=Boyd Wolf".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&page.users), vec![0]);

    // Valid order field with AsIs keeps dataset order.
    let page = find(
        addr,
        SearchRequest {
            limit: 1,
            offset: 33,
            order_field: "Name".to_string(),
            order_by: OrderBy::AsIs,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(ids(&page.users), vec![33]);
    assert_eq!(page.users[0].name, "Twila Snow");
    assert!(page.next_page);

    // Sort by age descending.
    let page = find(
        addr,
        SearchRequest {
            limit: 2,
            order_field: "Age".to_string(),
            order_by: OrderBy::Descending,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page.users[0].name, "Cruz Guerrero");
    assert!(page.users[0].age >= page.users[1].age);
}

#[test]
fn search_failures() {
    let addr = search_service();

    let err = find(
        addr,
        SearchRequest {
            limit: -1,
            offset: 1,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));

    let err = find(
        addr,
        SearchRequest {
            limit: 5,
            offset: -1,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::Validation(_)));

    let err = SearchClient::new(&format!("http://{addr}"), "123312")
        .find_users(&UreqTransport::default(), &SearchRequest::default())
        .unwrap_err();
    assert_eq!(err, SearchError::Auth);

    let err = find(
        addr,
        SearchRequest {
            offset: 40,
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, SearchError::FatalServer(_)));

    let err = find(
        addr,
        SearchRequest {
            order_field: "Biba".to_string(),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("OrderFeld Biba invalid"));
}

#[test]
fn slow_server_times_out() {
    let addr = spawn(Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            "Ok"
        }),
    ));

    let err = client(addr)
        .find_users(
            &UreqTransport::new(Duration::from_millis(300)),
            &SearchRequest::default(),
        )
        .unwrap_err();
    assert!(matches!(err, SearchError::Timeout { .. }));
    assert!(err.to_string().contains("timeout"));
    assert!(err.to_string().contains(&addr.to_string()));
}

#[test]
fn server_not_listening_is_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let err = find(addr, SearchRequest::default()).unwrap_err();
    assert!(matches!(err, SearchError::UnknownNetwork(_)));
    assert!(err.to_string().contains("error"));
}

#[test]
fn malformed_error_body() {
    let addr = spawn(Router::new().route(
        "/",
        get(|| async { (StatusCode::BAD_REQUEST, "Invalid json") }),
    ));

    let err = find(addr, SearchRequest::default()).unwrap_err();
    assert!(err.to_string().contains("cant unpack error json"));
}

#[test]
fn unknown_bad_request_reason() {
    let addr = spawn(Router::new().route(
        "/",
        get(|| async { (StatusCode::BAD_REQUEST, r#"{"error":"Valid"}"#) }),
    ));

    let err = find(addr, SearchRequest::default()).unwrap_err();
    assert!(err.to_string().contains("unknown bad request error:"));
}

#[test]
fn non_array_result_body() {
    let addr = spawn(Router::new().route(
        "/",
        get(|| async { axum::Json(" ") }),
    ));

    let err = find(addr, SearchRequest::default()).unwrap_err();
    assert!(err.to_string().contains("cant unpack result json"));
}

#[test]
fn unexpected_status() {
    let addr = spawn(Router::new().route(
        "/",
        get(|| async { StatusCode::IM_A_TEAPOT }),
    ));

    let err = find(addr, SearchRequest::default()).unwrap_err();
    assert_eq!(err, SearchError::UnknownStatus(418));
}
