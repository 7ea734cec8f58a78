//! Integration tests driving a real server over WebSocket and HTTP.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use tallyroom_server::{
    domain::ActionPolicy,
    infrastructure::{dto::JsonSnapshotEncoder, message_pusher::WebSocketMessagePusher},
    ui::Server,
    usecase::{HubHandle, SessionHub},
};
use tallyroom_shared::{
    protocol::{ActionEnvelope, SharedStateDto},
    time::SystemClock,
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(200);

/// Start a server on an ephemeral port and return its address
async fn start_server(policy: ActionPolicy) -> SocketAddr {
    let hub = SessionHub::new(
        WebSocketMessagePusher::new(),
        Arc::new(JsonSnapshotEncoder),
        Arc::new(SystemClock),
        policy,
    );
    let gateway = Arc::new(HubHandle::spawn(hub));
    let app = Server::new(gateway).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

async fn connect(addr: SocketAddr) -> Socket {
    let (socket, _response) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    socket
}

async fn send(socket: &mut Socket, envelope: &ActionEnvelope) {
    let json = serde_json::to_string(envelope).unwrap();
    socket.send(Message::text(json)).await.unwrap();
}

async fn send_raw(socket: &mut Socket, raw: &str) {
    socket.send(Message::text(raw.to_string())).await.unwrap();
}

/// Receive the next text frame as a raw string
async fn recv_text(socket: &mut Socket) -> String {
    loop {
        let message = timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("connection closed")
            .expect("websocket error");
        if let Message::Text(text) = message {
            return text.as_str().to_string();
        }
    }
}

async fn recv_state(socket: &mut Socket) -> SharedStateDto {
    serde_json::from_str(&recv_text(socket).await).unwrap()
}

/// Assert that no frame arrives within the quiet period
async fn assert_quiet(socket: &mut Socket) {
    let result = timeout(QUIET_PERIOD, socket.next()).await;
    assert!(result.is_err(), "expected no frame, got {:?}", result);
}

#[tokio::test]
async fn test_fresh_server_sends_initial_snapshot() {
    // テスト項目: 接続直後に初期状態が送られる（シナリオ 1）
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;

    // when (操作):
    let mut alice = connect(addr).await;

    // then (期待する結果):
    assert_eq!(
        recv_text(&mut alice).await,
        r#"{"locked":false,"selectedOption":null,"doneBy":[],"lastAction":null,"lastBy":null}"#
    );
}

#[tokio::test]
async fn test_hello_then_select_is_broadcast_to_everyone() {
    // テスト項目: hello + select のブロードキャストが送信者を含む全員に同一内容で届く（シナリオ 2）
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_text(&mut alice).await;
    let mut bob = connect(addr).await;
    recv_text(&mut bob).await;

    // when (操作):
    send(&mut alice, &ActionEnvelope::hello("alice")).await;
    send(&mut alice, &ActionEnvelope::select("A")).await;

    // then (期待する結果): hello 自体はブロードキャストされない
    let to_alice = recv_text(&mut alice).await;
    let to_bob = recv_text(&mut bob).await;
    assert_eq!(to_alice, to_bob);
    assert_eq!(
        serde_json::from_str::<SharedStateDto>(&to_alice).unwrap(),
        SharedStateDto {
            locked: false,
            selected_option: Some("A".to_string()),
            done_by: vec![],
            last_action: Some("select A".to_string()),
            last_by: Some("alice".to_string()),
        }
    );
}

#[tokio::test]
async fn test_done_twice_and_lock_then_select() {
    // テスト項目: done の冪等性（シナリオ 3）と、ロック後の select の適用（シナリオ 4）
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;
    send(&mut alice, &ActionEnvelope::hello("alice")).await;

    // when (操作):
    send(&mut alice, &ActionEnvelope::done("alice")).await;
    send(&mut alice, &ActionEnvelope::done("alice")).await;
    send(&mut alice, &ActionEnvelope::lock()).await;
    send(&mut alice, &ActionEnvelope::select("B")).await;

    // then (期待する結果):
    let first_done = recv_state(&mut alice).await;
    let second_done = recv_state(&mut alice).await;
    let locked = recv_state(&mut alice).await;
    let selected = recv_state(&mut alice).await;

    assert_eq!(first_done.done_by, vec!["alice".to_string()]);
    assert_eq!(second_done.done_by, vec!["alice".to_string()]);
    assert!(locked.locked);
    assert_eq!(locked.last_action.as_deref(), Some("locked"));
    assert!(selected.locked);
    assert_eq!(selected.selected_option.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_enforced_lock_rejects_select() {
    // テスト項目: --enforce-lock 相当のポリシーではロック後の select がブロードキャストされない
    // given (前提条件):
    let addr = start_server(ActionPolicy { enforce_lock: true }).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;
    send(&mut alice, &ActionEnvelope::lock()).await;
    recv_state(&mut alice).await;

    // when (操作):
    send(&mut alice, &ActionEnvelope::select("B")).await;

    // then (期待する結果):
    assert_quiet(&mut alice).await;
}

#[tokio::test]
async fn test_late_joiner_receives_post_reset_snapshot() {
    // テスト項目: reset 後に接続した参加者は reset 後の状態を受け取る（シナリオ 5）
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;
    send(&mut alice, &ActionEnvelope::hello("alice")).await;
    send(&mut alice, &ActionEnvelope::select("A")).await;
    send(&mut alice, &ActionEnvelope::reset()).await;
    recv_state(&mut alice).await;
    recv_state(&mut alice).await;

    // when (操作):
    let mut bob = connect(addr).await;

    // then (期待する結果):
    assert_eq!(
        recv_state(&mut bob).await,
        SharedStateDto {
            locked: false,
            selected_option: None,
            done_by: vec![],
            last_action: Some("reset".to_string()),
            last_by: Some("alice".to_string()),
        }
    );
}

#[tokio::test]
async fn test_malformed_and_unknown_messages_are_ignored() {
    // テスト項目: 不正なメッセージ・未知のアクションでは接続が維持され、ブロードキャストもされない
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;

    // when (操作):
    send_raw(&mut alice, "this is not json").await;
    send_raw(&mut alice, r#"{"action":"unlock"}"#).await;
    send_raw(&mut alice, r#"{"action":"select","payload":"C"}"#).await;

    // then (期待する結果): 後続のアクションは通常通り処理される
    assert_quiet(&mut alice).await;
    send(&mut alice, &ActionEnvelope::lock()).await;
    let state = recv_state(&mut alice).await;
    assert!(state.locked);
    assert_eq!(state.last_by.as_deref(), Some("unknown"));
}

#[tokio::test]
async fn test_disconnect_does_not_broadcast() {
    // テスト項目: 切断はブロードキャストを発生させず、done_by も保持される
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;
    let mut bob = connect(addr).await;
    recv_state(&mut bob).await;
    send(&mut alice, &ActionEnvelope::hello("alice")).await;
    send(&mut alice, &ActionEnvelope::done("alice")).await;
    recv_state(&mut alice).await;
    recv_state(&mut bob).await;

    // when (操作):
    alice.close(None).await.unwrap();

    // then (期待する結果):
    assert_quiet(&mut bob).await;
    let mut carol = connect(addr).await;
    assert_eq!(recv_state(&mut carol).await.done_by, vec!["alice".to_string()]);
}

#[tokio::test]
async fn test_http_endpoints() {
    // テスト項目: HTTP API で状態と参加者を取得できる
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;
    send(&mut alice, &ActionEnvelope::hello("alice")).await;
    send(&mut alice, &ActionEnvelope::select("B")).await;
    recv_state(&mut alice).await;

    // when (操作):
    let health: serde_json::Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let state: SharedStateDto = reqwest::get(format!("http://{}/api/state", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let participants: Vec<serde_json::Value> =
        reqwest::get(format!("http://{}/api/participants", addr))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

    // then (期待する結果):
    assert_eq!(health, serde_json::json!({"status": "ok"}));
    assert_eq!(state.selected_option.as_deref(), Some("B"));
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["name"], "alice");
    assert!(participants[0]["connectedAt"].is_string());
}

#[tokio::test]
async fn test_binary_frames_are_decoded_as_utf8() {
    // テスト項目: UTF-8 のバイナリフレームはテキストと同様に処理され、不正なバイト列は無視される
    // given (前提条件):
    let addr = start_server(ActionPolicy::default()).await;
    let mut alice = connect(addr).await;
    recv_state(&mut alice).await;

    // when (操作):
    alice
        .send(Message::binary(vec![0xff, 0xfe]))
        .await
        .unwrap();
    alice
        .send(Message::binary(br#"{"action":"lock"}"#.to_vec()))
        .await
        .unwrap();

    // then (期待する結果): ブロードキャストは lock の 1 回だけ
    let state = recv_state(&mut alice).await;
    assert!(state.locked);
    assert_eq!(state.last_action, Some("locked".to_string()));
    assert_quiet(&mut alice).await;
}
