//! Sync gateway integration tests
//!
//! Run with: cargo test -p integration-tests --test gateway_tests

use integration_tests::{fixtures::*, wait_until, TestServer};
use party_common::AppConfig;
use party_gateway::SyncMessage;

#[tokio::test]
async fn test_three_listeners_share_playback() {
    let server = TestServer::start().await.expect("Failed to start server");

    let mut first = server.join("abc123", 1).await.unwrap();
    let mut second = server.join("abc123", 2).await.unwrap();
    first.expect_count(2).await.unwrap();
    let mut third = server.join("abc123", 3).await.unwrap();
    first.expect_count(3).await.unwrap();
    second.expect_count(3).await.unwrap();

    second
        .send(&SyncMessage::control("play", "abc123", 12.5))
        .await
        .unwrap();

    for listener in [&mut first, &mut third] {
        let relayed = listener.recv().await.unwrap();
        assert_eq!(relayed.kind, "play");
        assert_eq!(relayed.room_id, "abc123");
        assert!((relayed.time - 12.5).abs() < f64::EPSILON);
        assert_eq!(relayed.count, 0);
        listener.expect_silence().await.unwrap();
    }
    second.expect_silence().await.unwrap();

    first.close().await.unwrap();
    second.expect_count(2).await.unwrap();
    third.expect_count(2).await.unwrap();
    assert!(server.registry().contains("abc123"));

    second.close().await.unwrap();
    third.expect_count(1).await.unwrap();
    third.close().await.unwrap();

    wait_until(|| !server.registry().contains("abc123"))
        .await
        .unwrap();
    assert_eq!(server.registry().session_count(), 0);
}

#[tokio::test]
async fn test_sender_is_excluded_from_relay() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let mut b = server.join(&session, 2).await.unwrap();
    a.expect_count(2).await.unwrap();
    let mut c = server.join(&session, 3).await.unwrap();
    a.expect_count(3).await.unwrap();
    b.expect_count(3).await.unwrap();

    b.send(&SyncMessage::control("seek", &session, 95.0))
        .await
        .unwrap();

    assert_eq!(a.recv().await.unwrap().kind, "seek");
    assert_eq!(c.recv().await.unwrap().kind, "seek");
    b.expect_silence().await.unwrap();
}

#[tokio::test]
async fn test_unknown_event_types_are_relayed_verbatim() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let mut b = server.join(&session, 2).await.unwrap();
    a.expect_count(2).await.unwrap();

    a.send_text(r#"{"type":"volume","roomId":"elsewhere","time":0.25}"#)
        .await
        .unwrap();

    let relayed = b.recv().await.unwrap();
    assert_eq!(relayed.kind, "volume");
    assert_eq!(relayed.room_id, "elsewhere");
    assert!((relayed.time - 0.25).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_binary_frames_are_decoded() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let mut b = server.join(&session, 2).await.unwrap();
    a.expect_count(2).await.unwrap();

    let payload = SyncMessage::control("pause", &session, 7.0).to_json().unwrap();
    a.send_binary(payload.into_bytes()).await.unwrap();

    assert_eq!(b.recv().await.unwrap().kind, "pause");
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let server = TestServer::start().await.expect("Failed to start server");
    let first = unique_session();
    let second = unique_session();

    let mut a = server.join(&first, 1).await.unwrap();
    let mut b = server.join(&first, 2).await.unwrap();
    a.expect_count(2).await.unwrap();
    let mut other = server.join(&second, 1).await.unwrap();

    a.send(&SyncMessage::control("play", &first, 1.0))
        .await
        .unwrap();
    assert_eq!(b.recv().await.unwrap().kind, "play");
    other.expect_silence().await.unwrap();

    b.close().await.unwrap();
    a.expect_count(1).await.unwrap();
    other.expect_silence().await.unwrap();

    assert_eq!(server.registry().session_count(), 2);
}

#[tokio::test]
async fn test_malformed_message_ends_only_that_connection() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let mut b = server.join(&session, 2).await.unwrap();
    a.expect_count(2).await.unwrap();

    b.send_text("this is not json").await.unwrap();
    b.expect_closed().await.unwrap();

    a.expect_count(1).await.unwrap();
    assert!(server.registry().contains(&session));
}

#[tokio::test]
async fn test_dropped_connection_is_removed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let b = server.join(&session, 2).await.unwrap();
    a.expect_count(2).await.unwrap();

    // No close handshake
    drop(b);

    a.expect_count(1).await.unwrap();
    let live = server.registry().get(&session).expect("session should exist");
    assert_eq!(live.member_count(), 1);
}

#[tokio::test]
async fn test_rejoin_after_teardown_starts_fresh_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let a = server.join(&session, 1).await.unwrap();
    a.close().await.unwrap();
    wait_until(|| !server.registry().contains(&session))
        .await
        .unwrap();

    let _b = server.join(&session, 1).await.unwrap();
    assert!(server.registry().contains(&session));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_are_all_counted() {
    const LISTENERS: usize = 16;

    let server = TestServer::start().await.expect("Failed to start server");
    let session = unique_session();

    let mut connects = Vec::new();
    for _ in 0..LISTENERS {
        connects.push(server.connect(&session));
    }
    let clients = futures_util::future::try_join_all(connects).await.unwrap();

    wait_until(|| {
        server
            .registry()
            .get(&session)
            .is_some_and(|s| s.member_count() == LISTENERS)
    })
    .await
    .unwrap();

    assert_eq!(server.registry().session_count(), 1);

    // The latest count each client sees settles on the full membership
    for mut client in clients {
        let mut latest = 0;
        while latest != LISTENERS as i64 {
            let message = client.recv().await.unwrap();
            assert_eq!(message.kind, "user_count");
            assert!(message.count > latest, "counts must never go backwards");
            latest = message.count;
        }
    }
}

#[tokio::test]
async fn test_plain_http_request_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/ws/abc123").await.unwrap();
    assert!(response.status().is_client_error());
    assert!(!server.registry().contains("abc123"));
}

#[tokio::test]
async fn test_idle_connection_is_closed() {
    let server = TestServer::start_with(|c| c.gateway.idle_timeout_secs = Some(1))
        .await
        .expect("Failed to start server");
    let session = unique_session();

    let mut a = server.join(&session, 1).await.unwrap();
    let mut b = server.join(&session, 2).await.unwrap();

    a.expect_closed().await.unwrap();
    b.expect_closed().await.unwrap();

    wait_until(|| !server.registry().contains(&session))
        .await
        .unwrap();
    assert_eq!(server.registry().session_count(), 0);
}

#[tokio::test]
async fn test_joins_are_not_rate_limited() {
    const LISTENERS: usize = 60;

    let server = TestServer::start_with(|c| c.rate_limit = AppConfig::default().rate_limit)
        .await
        .expect("Failed to start server");
    let session = unique_session();

    let mut clients = Vec::new();
    for _ in 0..LISTENERS {
        clients.push(server.connect(&session).await.unwrap());
    }

    wait_until(|| {
        server
            .registry()
            .get(&session)
            .is_some_and(|s| s.member_count() == LISTENERS)
    })
    .await
    .unwrap();
}
