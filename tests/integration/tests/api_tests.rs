//! API Integration Tests
//!
//! Each test boots a dedicated server instance with its own SQLite file
//! and logs directory under the system temp dir, so no external services
//! are required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_redirect, assert_status, fixtures::*, TestClient, TestServer,
};
use parlor_core::{NewMessage, NewUser};
use parlor_web::extractors::SESSION_COOKIE;
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh account, promote it, and hand back its session
async fn admin_session(server: &TestServer) -> (TestClient, String) {
    let client = server.client();
    let username = unique_username("root");
    client
        .sign_up_and_in(&username, TEST_PASSWORD)
        .await
        .expect("admin signup failed");
    server
        .promote_to_admin(&username)
        .await
        .expect("admin promotion failed");
    (client, username)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client.get("/health").await.expect("Request failed");
    assert!(
        response.headers().get("x-request-id").is_some(),
        "responses should carry a request id"
    );
    let health: HealthPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

// ============================================================================
// Page Routing Tests
// ============================================================================

#[tokio::test]
async fn test_root_redirects_by_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client.get("/").await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    let username = unique_username("rooter");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();
    let response = client.get("/").await.unwrap();
    assert_redirect(&response, "/chat").unwrap();
}

#[tokio::test]
async fn test_pages_require_login() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client.get("/chat").await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    let response = client.get("/profile").await.unwrap();
    assert_redirect(&response, "/login").unwrap();
}

// ============================================================================
// Registration and Login Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("alice");

    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    // The chat page greets the logged-in user by name
    let body = client.page("/chat").await.unwrap();
    assert!(body.contains(&username));
}

#[tokio::test]
async fn test_register_shows_flash_notice() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("bob");

    let response = client.register(&username, TEST_PASSWORD).await.unwrap();
    let location = assert_redirect(&response, "/login?notice=").unwrap();

    let body = client.page(&location).await.unwrap();
    assert!(body.contains("Account created"));
}

#[tokio::test]
async fn test_register_rejects_password_mismatch() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("carol");

    let response = client
        .post_form(
            "/register",
            &[
                ("username", username.as_str()),
                ("password", TEST_PASSWORD),
                ("confirm_password", "different-pass"),
            ],
        )
        .await
        .unwrap();
    let location = assert_redirect(&response, "/register?error=").unwrap();

    let body = client.page(&location).await.unwrap();
    assert!(body.contains("Passwords do not match"));

    // The account was not created
    let response = client.login(&username, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/login?error=").unwrap();
}

#[tokio::test]
async fn test_register_rejects_short_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client.register("ab", TEST_PASSWORD).await.unwrap();
    let location = assert_redirect(&response, "/register?error=").unwrap();

    let body = client.page(&location).await.unwrap();
    assert!(body.contains("3-20 characters"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("dave");

    let response = client.register(&username, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    let response = client.register(&username, TEST_PASSWORD).await.unwrap();
    let location = assert_redirect(&response, "/register?error=").unwrap();

    let body = client.page(&location).await.unwrap();
    assert!(body.contains("Username already exists"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("eve");

    let response = client.register(&username, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    let response = client.login(&username, "wrong-password").await.unwrap();
    let location = assert_redirect(&response, "/login?error=").unwrap();

    let body = client.page(&location).await.unwrap();
    assert!(body.contains("Invalid username or password"));

    // No session was established
    let response = client.get("/chat").await.unwrap();
    assert_redirect(&response, "/login").unwrap();
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("frank");

    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();
    client.page("/chat").await.unwrap();

    let response = client.post("/logout").await.unwrap();
    assert_redirect(&response, "/login").unwrap();

    let response = client.get("/chat").await.unwrap();
    assert_redirect(&response, "/login").unwrap();
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_message_persists_and_trims() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("sender");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    let response = client
        .post_json("/send-message", &json!({ "message": "  hello there  " }))
        .await
        .unwrap();
    let ack: StatusPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ack.status, "success");

    let count = server.context.message_repo().count().await.unwrap();
    assert_eq!(count, 1);

    let response = client.get("/poll-messages").await.unwrap();
    let messages: Vec<MessagePayload> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].username, username);
    assert_eq!(messages[0].content, "hello there");
}

#[tokio::test]
async fn test_send_message_rejects_blank() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("blank");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    // Whitespace-only passes the length check but is empty once trimmed
    let response = client
        .post_json("/send-message", &json!({ "message": "   " }))
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "VALIDATION_ERROR");

    let response = client
        .post_json("/send-message", &json!({ "message": "" }))
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error.code, "VALIDATION_ERROR");

    let count = server.context.message_repo().count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_send_message_requires_auth() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client
        .post_json("/send-message", &json!({ "message": "hello" }))
        .await
        .unwrap();
    let envelope: ErrorEnvelope =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(envelope.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_poll_returns_oldest_first() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("poller");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    for text in ["one", "two", "three"] {
        let response = client
            .post_json("/send-message", &json!({ "message": text }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = client.get("/poll-messages").await.unwrap();
    let messages: Vec<MessagePayload> = assert_json(response, StatusCode::OK).await.unwrap();
    let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["one", "two", "three"]);

    for message in &messages {
        chrono::DateTime::parse_from_rfc3339(&message.timestamp)
            .expect("timestamps should be RFC 3339");
    }
}

#[tokio::test]
async fn test_poll_delta_cursor() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("delta");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    for text in ["one", "two", "three"] {
        let response = client
            .post_json("/send-message", &json!({ "message": text }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = client.get("/poll-messages").await.unwrap();
    let all: Vec<MessagePayload> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.len(), 3);

    // Only messages strictly newer than the cursor come back
    let response = client
        .get_query("/poll-messages", &[("after", all[0].timestamp.as_str())])
        .await
        .unwrap();
    let newer: Vec<MessagePayload> = assert_json(response, StatusCode::OK).await.unwrap();
    let contents: Vec<&str> = newer.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["two", "three"]);

    // A cursor at the newest message means an idle poll comes back empty
    let response = client
        .get_query("/poll-messages", &[("after", all[2].timestamp.as_str())])
        .await
        .unwrap();
    let newer: Vec<MessagePayload> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(newer.is_empty());
}

#[tokio::test]
async fn test_poll_rejects_malformed_cursor() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("cursor");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    let response = client
        .get_query("/poll-messages", &[("after", "yesterday")])
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_unread_badge_flow() {
    let server = TestServer::start().await.expect("Failed to start server");

    let alice = server.client();
    let alice_name = unique_username("alice");
    alice.sign_up_and_in(&alice_name, TEST_PASSWORD).await.unwrap();

    let bob = server.client();
    let bob_name = unique_username("bob");
    bob.sign_up_and_in(&bob_name, TEST_PASSWORD).await.unwrap();

    for text in ["first", "second"] {
        let response = alice
            .post_json("/send-message", &json!({ "message": text }))
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = bob.get("/check-new-messages").await.unwrap();
    let unread: UnreadPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 2);

    // Viewing the chat page advances the read watermark
    bob.page("/chat").await.unwrap();
    let response = bob.get("/check-new-messages").await.unwrap();
    let unread: UnreadPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 0);

    let response = alice
        .post_json("/send-message", &json!({ "message": "third" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = bob.get("/check-new-messages").await.unwrap();
    let unread: UnreadPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 1);

    // A sender's own messages never count as unread
    let response = alice.get("/check-new-messages").await.unwrap();
    let unread: UnreadPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 0);
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_requires_admin_role() {
    let server = TestServer::start().await.expect("Failed to start server");

    // A plain member gets a 403
    let member = server.client();
    let member_name = unique_username("member");
    member.sign_up_and_in(&member_name, TEST_PASSWORD).await.unwrap();

    let response = member.get("/admin").await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(envelope.error.code, "MISSING_ADMIN_ROLE");

    // No session at all gets a 401
    let anonymous = server.client();
    let response = anonymous.get("/admin").await.unwrap();
    let envelope: ErrorEnvelope =
        assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(envelope.error.code, "MISSING_AUTHORIZATION");
}

#[tokio::test]
async fn test_dashboard_stats() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    // Four seeded accounts with a known message spread
    let mut user_ids = Vec::new();
    for i in 1..=4 {
        let user = server
            .context
            .user_repo()
            .create(&NewUser::new(format!("stats_u{i}"), "unused-hash".to_string()))
            .await
            .unwrap();
        user_ids.push(user.id);
    }
    for (user_id, n) in user_ids.iter().zip([7, 5, 5, 3]) {
        for j in 0..n {
            server
                .context
                .message_repo()
                .create(&NewMessage::new(*user_id, format!("message {j}")))
                .await
                .unwrap();
        }
    }

    let body = admin.page("/admin").await.unwrap();

    // Four seeded accounts plus the admin
    assert!(body.contains(r#"<div class="stat-value">5</div>"#));
    // Total messages
    assert!(body.contains(r#"<div class="stat-value">20</div>"#));

    // The busiest author leads the top-authors table
    let first = body.find("stats_u1").expect("busiest author missing");
    let last = body.find("stats_u4").expect("quietest author missing");
    assert!(first < last, "top authors should be ordered busiest first");
}

#[tokio::test]
async fn test_toggle_admin_round_trip() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    let member = server.client();
    let member_name = unique_username("member");
    member.sign_up_and_in(&member_name, TEST_PASSWORD).await.unwrap();
    let member_user = server
        .context
        .user_repo()
        .find_by_username(&member_name)
        .await
        .unwrap()
        .expect("member should exist");

    let response = admin
        .post(&format!("/admin/users/{}/toggle-admin", member_user.id))
        .await
        .unwrap();
    assert_redirect(&response, "/admin/users?notice=").unwrap();
    let promoted = server
        .context
        .user_repo()
        .find_by_username(&member_name)
        .await
        .unwrap()
        .unwrap();
    assert!(promoted.is_admin);

    let response = admin
        .post(&format!("/admin/users/{}/toggle-admin", member_user.id))
        .await
        .unwrap();
    assert_redirect(&response, "/admin/users?notice=").unwrap();
    let demoted = server
        .context
        .user_repo()
        .find_by_username(&member_name)
        .await
        .unwrap()
        .unwrap();
    assert!(!demoted.is_admin);
}

#[tokio::test]
async fn test_toggle_admin_rejects_self() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, admin_name) = admin_session(&server).await;

    let admin_user = server
        .context
        .user_repo()
        .find_by_username(&admin_name)
        .await
        .unwrap()
        .unwrap();

    let response = admin
        .post(&format!("/admin/users/{}/toggle-admin", admin_user.id))
        .await
        .unwrap();
    let location = assert_redirect(&response, "/admin/users?error=").unwrap();

    let body = admin.page(&location).await.unwrap();
    assert!(body.contains("cannot change their own role"));

    let still_admin = server
        .context
        .user_repo()
        .find_by_username(&admin_name)
        .await
        .unwrap()
        .unwrap();
    assert!(still_admin.is_admin);
}

#[tokio::test]
async fn test_admin_reset_password() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    let target = server.client();
    let target_name = unique_username("target");
    target.sign_up_and_in(&target_name, TEST_PASSWORD).await.unwrap();
    let target_user = server
        .context
        .user_repo()
        .find_by_username(&target_name)
        .await
        .unwrap()
        .unwrap();

    let response = admin
        .post_form(
            &format!("/admin/users/{}/reset-password", target_user.id),
            &[("password", "newsecret9")],
        )
        .await
        .unwrap();
    assert_redirect(&response, "/admin/users?notice=").unwrap();

    // The old password no longer works, the new one does
    let fresh = server.client();
    let response = fresh.login(&target_name, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/login?error=").unwrap();
    let response = fresh.login(&target_name, "newsecret9").await.unwrap();
    assert_redirect(&response, "/chat").unwrap();

    // Tokens are not revoked, so the target's existing session survives
    target.page("/chat").await.unwrap();
}

#[tokio::test]
async fn test_admin_reset_password_rejects_weak() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    let target = server.client();
    let target_name = unique_username("target");
    target.sign_up_and_in(&target_name, TEST_PASSWORD).await.unwrap();
    let target_user = server
        .context
        .user_repo()
        .find_by_username(&target_name)
        .await
        .unwrap()
        .unwrap();

    let response = admin
        .post_form(
            &format!("/admin/users/{}/reset-password", target_user.id),
            &[("password", "abc")],
        )
        .await
        .unwrap();
    assert_redirect(&response, "/admin/users?error=").unwrap();

    // The old password still works
    let fresh = server.client();
    let response = fresh.login(&target_name, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/chat").unwrap();
}

#[tokio::test]
async fn test_admin_users_page_lists_accounts() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, admin_name) = admin_session(&server).await;

    let member = server.client();
    let member_name = unique_username("member");
    member.sign_up_and_in(&member_name, TEST_PASSWORD).await.unwrap();

    let body = admin.page("/admin/users").await.unwrap();
    assert!(body.contains(&admin_name));
    assert!(body.contains(&member_name));
    assert!(body.contains("toggle-admin"));
}

#[tokio::test]
async fn test_monitor_page_renders() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    let body = admin.page("/admin/monitor").await.unwrap();
    assert!(body.contains("System monitor"));
    assert!(body.contains("CPU"));
    assert!(body.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn test_error_report_generation() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (admin, _) = admin_session(&server).await;

    // Produce some security log content to summarize
    let client = server.client();
    let response = client.login("no_such_account", "whatever").await.unwrap();
    assert_redirect(&response, "/login?error=").unwrap();

    let response = admin.post("/admin/error-report").await.unwrap();
    let status = response.status();
    let body = response.text().await.unwrap();
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert!(body.contains("Report written to"));
    assert!(body.contains("Error Monitoring Summary Report"));

    let report_written = std::fs::read_dir(&server.logs_dir)
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("summary_report_")
        });
    assert!(report_written, "summary report file should be in the logs dir");
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_change_password_flow() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("changer");
    client.sign_up_and_in(&username, TEST_PASSWORD).await.unwrap();

    // Wrong current password is rejected and logged
    let response = client
        .post_form(
            "/change-password",
            &[
                ("current_password", "wrong-pass"),
                ("new_password", "brandnew9"),
                ("confirm_password", "brandnew9"),
            ],
        )
        .await
        .unwrap();
    let location = assert_redirect(&response, "/profile?error=").unwrap();
    let body = client.page(&location).await.unwrap();
    assert!(body.contains("Current password is incorrect"));

    let log = std::fs::read_to_string(server.logs_dir.join("security_log.txt")).unwrap();
    assert!(log.contains("Failed password change attempt"));

    // The real current password goes through
    let response = client
        .post_form(
            "/change-password",
            &[
                ("current_password", TEST_PASSWORD),
                ("new_password", "brandnew9"),
                ("confirm_password", "brandnew9"),
            ],
        )
        .await
        .unwrap();
    assert_redirect(&response, "/profile?notice=").unwrap();

    let fresh = server.client();
    let response = fresh.login(&username, "brandnew9").await.unwrap();
    assert_redirect(&response, "/chat").unwrap();
}

// ============================================================================
// Security Logging Tests
// ============================================================================

#[tokio::test]
async fn test_failed_login_recorded_in_security_log() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client.login("ghost_account", "whatever").await.unwrap();
    assert_redirect(&response, "/login?error=").unwrap();

    let log = std::fs::read_to_string(server.logs_dir.join("security_log.txt")).unwrap();
    assert!(log.contains("Failed login attempt for username:"));
}

#[tokio::test]
async fn test_suspicious_query_logged() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();

    let response = client
        .get_query("/login", &[("q", "' OR '1'='1")])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let log = std::fs::read_to_string(server.logs_dir.join("security_log.txt")).unwrap();
    assert!(log.contains("Suspicious query fragment"));
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_bearer_token_fallback() {
    let server = TestServer::start().await.expect("Failed to start server");
    let client = server.client();
    let username = unique_username("api_user");

    let response = client.register(&username, TEST_PASSWORD).await.unwrap();
    assert_redirect(&response, "/login").unwrap();
    let response = client.login(&username, TEST_PASSWORD).await.unwrap();
    let token = response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .expect("login should set the session cookie");
    assert_redirect(&response, "/chat").unwrap();

    // The same token works as a bearer header with no cookie jar
    let api = server.client();
    let response = api
        .get_bearer("/check-new-messages", &token)
        .await
        .unwrap();
    let unread: UnreadPayload = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.count, 0);
}
