use httpmock::prelude::*;
use meetup_client::{MeetupClient, MeetupError, MemberId};
use serde_json::json;

fn member(id: i64, joined: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("member-{id}"),
        "joined": joined,
        "visited": joined,
    })
}

#[tokio::test]
async fn full_sweep_collects_every_page_in_order() {
    let server = MockServer::start_async().await;
    let page2_url = server.url("/2/members?page=2");
    let page3_url = server.url("/2/members?page=3");

    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/members")
                .query_param("group_id", "42")
                .query_param("key", "secret")
                .query_param("order", "joined")
                .query_param("desc", "true");
            then.status(200).json_body(json!({
                "meta": { "count": 2, "total_count": 5, "next": page2_url },
                "results": [member(1, 500), member(2, 400)],
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/2/members").query_param("page", "2");
            then.status(200).json_body(json!({
                "meta": { "count": 2, "total_count": 5, "next": page3_url },
                "results": [member(3, 300), member(4, 200)],
            }));
        })
        .await;
    let third = server
        .mock_async(|when, then| {
            when.method(GET).path("/2/members").query_param("page", "3");
            then.status(200).json_body(json!({
                "meta": { "count": 1, "total_count": 5, "next": "" },
                "results": [member(5, 100)],
            }));
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    let members = client.all_members(42).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;

    let ids: Vec<_> = members.iter().filter_map(|m| m.id.clone()).collect();
    assert_eq!(
        ids,
        vec![
            MemberId::Int(1),
            MemberId::Int(2),
            MemberId::Int(3),
            MemberId::Int(4),
            MemberId::Int(5),
        ]
    );
}

#[tokio::test]
async fn exhausted_cursor_terminates_with_partial_roster() {
    let server = MockServer::start_async().await;
    let page2_url = server.url("/2/members?page=2");

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/members")
                .query_param("group_id", "42");
            then.status(200).json_body(json!({
                "meta": { "count": 2, "total_count": 5, "next": page2_url },
                "results": [member(1, 500), member(2, 400)],
            }));
        })
        .await;
    // Cursor goes empty while the count is still short of total_count.
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/2/members").query_param("page", "2");
            then.status(200).json_body(json!({
                "meta": { "count": 1, "total_count": 5, "next": "" },
                "results": [member(3, 300)],
            }));
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    let members = client.all_members(42).await.unwrap();

    second.assert_async().await;
    assert_eq!(members.len(), 3);
}

#[tokio::test]
async fn single_page_sweep_stops_without_following_cursor() {
    let server = MockServer::start_async().await;
    // A stale next URL must not be followed once total_count is reached.
    let trap = server
        .mock_async(|when, then| {
            when.method(GET).path("/2/members").query_param("page", "2");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/members")
                .query_param("group_id", "42");
            then.status(200).json_body(json!({
                "meta": { "count": 2, "total_count": 2, "next": server.url("/2/members?page=2") },
                "results": [member(1, 500), member(2, 400)],
            }));
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    let members = client.all_members(42).await.unwrap();

    assert_eq!(members.len(), 2);
    trap.assert_hits_async(0).await;
}

#[tokio::test]
async fn failed_page_aborts_the_sweep() {
    let server = MockServer::start_async().await;
    let page2_url = server.url("/2/members?page=2");

    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/2/members")
                .query_param("group_id", "42");
            then.status(200).json_body(json!({
                "meta": { "count": 1, "total_count": 2, "next": page2_url },
                "results": [member(1, 500)],
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/2/members").query_param("page", "2");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    let err = client.all_members(42).await.unwrap_err();

    match err {
        MeetupError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn group_lookup_returns_numeric_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rust-twin-cities");
            then.status(200).json_body(json!({
                "id": 7155122,
                "name": "Rust Twin Cities",
                "members": 812,
            }));
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    assert_eq!(client.group_id("rust-twin-cities").await.unwrap(), 7155122);
}

#[tokio::test]
async fn group_lookup_surfaces_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/no-such-group");
            then.status(404).body("{\"problem\":\"Group does not exist\"}");
        })
        .await;

    let client = MeetupClient::with_base_url("secret".into(), server.base_url());
    let err = client.group_id("no-such-group").await.unwrap_err();

    match err {
        MeetupError::Api { status, .. } => assert_eq!(status, 404),
        other => panic!("expected api error, got {other:?}"),
    }
}
