//! `AccountAuthenticator` against a local JSON-RPC node stub.

mod common;

use common::{chars, key, type_into, TestEnv};
use crossterm::event::KeyCode;
use esteem::screens::{LoginScreen, Screen, ScreenAction};
use esteem::services::LoginService;
use esteem::steem::{
    AccountAuthenticator, AuthError, AuthType, Authenticator, KeyRole, PrivateKey, SteemClient,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Handle;

const PASSWORD: &str = "correct horse battery staple";

/// Read one HTTP request (headers plus Content-Length body).
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                return;
            }
        }
    }
}

/// Serve `body` with `status` to every request; returns the node URL.
async fn serve(status: &'static str, body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let body = body.clone();
            tokio::spawn(async move {
                read_request(&mut stream).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{}", addr)
}

fn public(role: KeyRole) -> String {
    PrivateKey::from_login("alice", role, PASSWORD)
        .unwrap()
        .public_key()
}

fn authority(role: KeyRole) -> Value {
    json!({ "weight_threshold": 1, "account_auths": [], "key_auths": [[public(role), 1]] })
}

fn alice_record() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": [{
            "id": 28,
            "name": "alice",
            "owner": authority(KeyRole::Owner),
            "active": authority(KeyRole::Active),
            "posting": authority(KeyRole::Posting),
            "memo_key": public(KeyRole::Memo),
            "balance": "1.000 STEEM"
        }]
    })
}

async fn authenticator_for(status: &'static str, body: Value) -> AccountAuthenticator {
    let url = serve(status, body).await;
    AccountAuthenticator::new(SteemClient::new(url, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_master_password_signs_in() {
    let auth = authenticator_for("200 OK", alice_record()).await;
    let credential = auth.authenticate("alice", PASSWORD).await.unwrap();
    assert_eq!(credential.username, "alice");
    assert_eq!(credential.auth_type, AuthType::MasterPassword);
    assert_eq!(credential.public_keys[&KeyRole::Posting], public(KeyRole::Posting));
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let auth = authenticator_for("200 OK", alice_record()).await;
    let result = auth.authenticate("alice", "definitely-the-wrong-password").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
}

#[tokio::test]
async fn test_posting_wif_signs_in() {
    let auth = authenticator_for("200 OK", alice_record()).await;
    let wif = PrivateKey::from_login("alice", KeyRole::Posting, PASSWORD)
        .unwrap()
        .to_wif();
    let credential = auth.authenticate("alice", &wif).await.unwrap();
    assert_eq!(credential.auth_type, AuthType::PrivateKey);
}

#[tokio::test]
async fn test_foreign_wif_is_rejected() {
    let auth = authenticator_for("200 OK", alice_record()).await;
    let wif = PrivateKey::from_login("mallory", KeyRole::Active, PASSWORD)
        .unwrap()
        .to_wif();
    assert!(matches!(
        auth.authenticate("alice", &wif).await,
        Err(AuthError::InvalidCredentials(_))
    ));
}

#[tokio::test]
async fn test_unknown_account() {
    let auth =
        authenticator_for("200 OK", json!({ "jsonrpc": "2.0", "id": 1, "result": [] })).await;
    assert_eq!(
        auth.authenticate("alice", PASSWORD).await,
        Err(AuthError::AccountNotFound("alice".to_string()))
    );
}

#[tokio::test]
async fn test_rpc_error_object_becomes_rpc_error() {
    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": -32000, "message": "node overloaded" }
    });
    let auth = authenticator_for("200 OK", body).await;
    match auth.authenticate("alice", PASSWORD).await {
        Err(AuthError::Rpc(message)) => assert!(message.contains("node overloaded")),
        other => panic!("expected an RPC error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_failure_becomes_rpc_error() {
    let auth = authenticator_for("502 Bad Gateway", json!({ "message": "upstream" })).await;
    assert!(matches!(
        auth.authenticate("alice", PASSWORD).await,
        Err(AuthError::Rpc(_))
    ));
}

#[tokio::test]
async fn test_empty_fields_fail_before_any_request() {
    // nothing listens here; the checks must not reach the network
    let client = SteemClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    let auth = AccountAuthenticator::new(client);
    assert_eq!(auth.authenticate("  ", PASSWORD).await, Err(AuthError::EmptyUsername));
    assert_eq!(auth.authenticate("alice", "").await, Err(AuthError::EmptyPassword));
}

#[tokio::test]
async fn test_wrong_password_on_login_screen_stores_nothing() {
    let env = TestEnv::new();
    let ctx = env.ctx();
    let auth = authenticator_for("200 OK", alice_record()).await;
    let service = LoginService::new(Handle::current(), env.lookup.clone(), Arc::new(auth));
    let mut screen = LoginScreen::new(service, env.store.clone(), env.opener.clone());
    screen.on_enter(&ctx).unwrap();

    type_into(&mut screen, &ctx, chars("alice"));
    type_into(&mut screen, &ctx, vec![key(KeyCode::Tab)]);
    type_into(&mut screen, &ctx, chars("not it"));
    type_into(&mut screen, &ctx, vec![key(KeyCode::Enter)]);

    let mut action = ScreenAction::None;
    for _ in 0..400 {
        action = screen.tick(&ctx).unwrap();
        if action != ScreenAction::None {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    match action {
        ScreenAction::ShowAlert { message, .. } => {
            assert!(message.contains("wrong password or private key"));
        }
        other => panic!("expected an alert, got {:?}", other),
    }
    assert_eq!(env.store.adds(), 0);
    assert!(!screen.form().is_loading());
}
