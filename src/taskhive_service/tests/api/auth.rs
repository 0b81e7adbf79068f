use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn register_verify_login_happy_path() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 201);

    // Login before verification fails and re-issues a code.
    let before = app.email_client.sent_messages().await.len();
    let response = app.login("ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(app.email_client.sent_messages().await.len(), before + 1);

    // A wrong code is rejected.
    let response = app
        .post_json("/api/auth/verify-account", &json!({ "token": "000000" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    // The mailed code confirms the account.
    let code = app.verification_code_for("ana@x.com").await;
    let response = app
        .post_json("/api/auth/verify-account", &json!({ "token": code }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // The code is single use.
    let response = app
        .post_json("/api/auth/verify-account", &json!({ "token": code }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    // Login now issues a bearer credential the gate accepts.
    let response = app.login("ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 200);
    let token = response.text().await.unwrap();

    let me: Value = app
        .get_authed("/api/auth/getMe", &token)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], "ana@x.com");
    assert_eq!(me["name"], "Ana");
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 201);

    let response = app.register("Imposter", "ana@x.com", "password2").await;
    assert_eq!(response.status().as_u16(), 409);

    // The original account still verifies and logs in.
    let token = app.verification_code_for("ana@x.com").await;
    let response = app
        .post_json("/api/auth/verify-account", &json!({ "token": token }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app.login("ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn login_rejects_unknown_user_and_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app.login("ghost@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 404);

    app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let response = app.login("ana@x.com", "wrong-password").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn invalid_registration_payloads_are_bad_requests() {
    let app = TestApp::spawn().await;

    // Short password.
    let response = app.register("Ana", "ana@x.com", "short").await;
    assert_eq!(response.status().as_u16(), 400);

    // Mismatched confirmation.
    let response = app
        .post_json(
            "/api/auth/create-account",
            &json!({
                "name": "Ana",
                "email": "ana@x.com",
                "password": "password1",
                "password_confirmation": "password2",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    // Invalid e-mail.
    let response = app.register("Ana", "not-an-email", "password1").await;
    assert_eq!(response.status().as_u16(), 400);

    // Blank name.
    let response = app.register("   ", "ana@x.com", "password1").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn request_code_needs_an_unconfirmed_account() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/auth/request-code", &json!({ "email": "ghost@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    app.register("Ana", "ana@x.com", "password1").await;
    let response = app
        .post_json("/api/auth/request-code", &json!({ "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Once confirmed, asking again is rejected.
    let code = app.verification_code_for("ana@x.com").await;
    app.post_json("/api/auth/verify-account", &json!({ "token": code }))
        .await;
    let response = app
        .post_json("/api/auth/request-code", &json!({ "email": "ana@x.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn password_reset_flow() {
    let app = TestApp::spawn().await;
    app.register_confirmed("Ana", "ana@x.com", "password1").await;

    let response = app
        .post_json(
            "/api/auth/forgot-password",
            &json!({ "email": "ana@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let code = app.verification_code_for("ana@x.com").await;

    // The code validates without being consumed.
    let response = app
        .post_json("/api/auth/validate-token", &json!({ "token": code }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .client
        .patch(format!("{}/api/auth/update-password/{}", app.address, code))
        .json(&json!({
            "password": "fresh-password",
            "password_confirmation": "fresh-password",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // The token was consumed with the reset.
    let response = app
        .post_json("/api/auth/validate-token", &json!({ "token": code }))
        .await;
    assert_eq!(response.status().as_u16(), 404);

    // Only the new password works.
    assert_eq!(app.login("ana@x.com", "password1").await.status().as_u16(), 401);
    assert_eq!(
        app.login("ana@x.com", "fresh-password").await.status().as_u16(),
        200
    );
}

#[tokio::test]
async fn forgot_password_for_unknown_email_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/auth/forgot-password",
            &json!({ "email": "ghost@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn profile_update_rechecks_email_uniqueness() {
    let app = TestApp::spawn().await;
    let ana = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    app.register_confirmed("Bea", "bea@x.com", "password2").await;

    // Taking Bea's address conflicts.
    let response = app
        .put_authed(
            "/api/auth/profile",
            &ana,
            &json!({ "name": "Ana", "email": "bea@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 409);

    // Keeping her own address while renaming is fine.
    let response = app
        .put_authed(
            "/api/auth/profile",
            &ana,
            &json!({ "name": "Ana Torres", "email": "ana@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let me: Value = app
        .get_authed("/api/auth/getMe", &ana)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(me["name"], "Ana Torres");
}

#[tokio::test]
async fn authenticated_password_endpoints() {
    let app = TestApp::spawn().await;
    let token = app.register_confirmed("Ana", "ana@x.com", "password1").await;

    // check-password distinguishes right from wrong.
    let response = app
        .post_authed(
            "/api/auth/check-password",
            &token,
            &json!({ "password": "password1" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app
        .post_authed(
            "/api/auth/check-password",
            &token,
            &json!({ "password": "nope-nope" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);

    // Changing the password requires the current one.
    let response = app
        .post_authed(
            "/api/auth/update-password",
            &token,
            &json!({
                "current_password": "wrong-one!",
                "password": "password2",
                "password_confirmation": "password2",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_authed(
            "/api/auth/update-password",
            &token,
            &json!({
                "current_password": "password1",
                "password": "password2",
                "password_confirmation": "password2",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.login("ana@x.com", "password2").await.status().as_u16(), 200);
}

#[tokio::test]
async fn the_gate_rejects_missing_and_garbage_tokens() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/auth/getMe", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = app.get_authed("/api/auth/getMe", "not-a-jwt").await;
    assert_eq!(response.status().as_u16(), 401);
}
