use super::*;
use modhub::models::NewUserToken;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;

    #[test]
    fn test_register_returns_user_and_token() {
        let app = TestApp::new();
        let (status, body) = app.post(
            "/api/v1/auth/register",
            None,
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": PASSWORD
            }),
        );

        assert_eq!(status, Status::Ok);
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["role"], "user");
        assert!(body["user"].get("password_hash").is_none());
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn test_password_is_stored_hashed() {
        let app = TestApp::new();
        app.register("alice");
        app.register("bob");

        let alice = app
            .database
            .get_user_by_email("alice@example.com")
            .unwrap()
            .unwrap();
        let bob = app
            .database
            .get_user_by_email("bob@example.com")
            .unwrap()
            .unwrap();

        assert_ne!(alice.password_hash, PASSWORD);
        // Same password, different salt
        assert_ne!(alice.password_hash, bob.password_hash);
        assert!(alice.verify_password(PASSWORD).unwrap());
        assert!(bob.verify_password(PASSWORD).unwrap());
    }

    #[test]
    fn test_register_validation() {
        let app = TestApp::new();

        let (status, body) = app.post(
            "/api/v1/auth/register",
            None,
            json!({ "username": "alice", "email": "alice@example.com" }),
        );
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error"], "All fields are required");

        let (status, body) = app.post(
            "/api/v1/auth/register",
            None,
            json!({ "username": "  ", "email": "alice@example.com", "password": PASSWORD }),
        );
        assert_eq!(status, Status::BadRequest, "{body}");

        let (status, body) = app.post(
            "/api/v1/auth/register",
            None,
            json!({ "username": "alice", "email": "alice@example.com", "password": "12345" }),
        );
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error"], "Password must be at least 6 characters");
    }

    #[test]
    fn test_register_conflicts() {
        let app = TestApp::new();
        app.register("alice");

        let (status, _) = app.post(
            "/api/v1/auth/register",
            None,
            json!({ "username": "alice", "email": "other@example.com", "password": PASSWORD }),
        );
        assert_eq!(status, Status::Conflict);

        let (status, body) = app.post(
            "/api/v1/auth/register",
            None,
            json!({ "username": "other", "email": "alice@example.com", "password": PASSWORD }),
        );
        assert_eq!(status, Status::Conflict);
        assert_eq!(body["error"], "User with this email or username already exists");
    }

    #[test]
    fn test_login_errors_are_generic() {
        let app = TestApp::new();
        app.register("alice");

        let (wrong_password, wrong_password_body) = app.post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": "not-the-password" }),
        );
        let (unknown_email, unknown_email_body) = app.post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD }),
        );

        assert_eq!(wrong_password, Status::Unauthorized);
        assert_eq!(unknown_email, Status::Unauthorized);
        assert_eq!(wrong_password_body, unknown_email_body);
        assert_eq!(wrong_password_body["error"], "Invalid email or password");
    }

    #[test]
    fn test_login_issues_new_session() {
        let app = TestApp::new();
        let (_, first_token) = app.register("alice");

        let (status, body) = app.post(
            "/api/v1/auth/login",
            None,
            json!({ "email": "alice@example.com", "password": PASSWORD }),
        );
        assert_eq!(status, Status::Ok);
        let token = body["token"].as_str().unwrap();
        assert_ne!(token, first_token);

        let (_, me) = app.get("/api/v1/auth/me", Some(token));
        assert_eq!(me["user"]["username"], "alice");
    }

    #[test]
    fn test_current_user_resolves_to_null() {
        let app = TestApp::new();

        let (status, body) = app.get("/api/v1/auth/me", None);
        assert_eq!(status, Status::Ok);
        assert!(body["user"].is_null());

        let (status, body) = app.get("/api/v1/auth/me", Some("not-a-real-token"));
        assert_eq!(status, Status::Ok);
        assert!(body["user"].is_null());
    }

    #[test]
    fn test_expired_session_resolves_to_null() {
        let app = TestApp::new();
        let (user_id, _) = app.register("alice");

        let mut expired = NewUserToken::new_session_token(user_id, 7);
        expired.created_at -= chrono::Duration::days(8);
        expired.expires_at = Some(expired.created_at + chrono::Duration::days(7));
        app.database.create_token(&expired).unwrap();

        let (status, body) = app.get("/api/v1/auth/me", Some(&expired.token));
        assert_eq!(status, Status::Ok);
        assert!(body["user"].is_null());

        let (status, _) = app.post(
            "/api/v1/resources",
            Some(&expired.token),
            json!({
                "title": "Police MDT",
                "description": "Mobile data terminal",
                "category": "scripts",
                "download_url": "https://files.example.com/mdt.zip"
            }),
        );
        assert_eq!(status, Status::Unauthorized);
    }

    #[test]
    fn test_logout_revokes_bearer_token() {
        let app = TestApp::new();
        let (_, token) = app.register("alice");

        let (_, me) = app.get("/api/v1/auth/me", Some(&token));
        assert_eq!(me["user"]["username"], "alice");

        let (status, body) = app.post("/api/v1/auth/logout", Some(&token), json!({}));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["success"], true);

        let (_, me) = app.get("/api/v1/auth/me", Some(&token));
        assert!(me["user"].is_null());

        // Logging out without a session is still fine
        let (status, _) = app.post("/api/v1/auth/logout", None, json!({}));
        assert_eq!(status, Status::Ok);
    }

    #[test]
    fn test_session_cookie_flow() {
        let app = TestApp::with_cookies();

        let response = app
            .client
            .post("/api/v1/auth/register")
            .header(rocket::http::ContentType::JSON)
            .body(
                json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": PASSWORD
                })
                .to_string(),
            )
            .dispatch();
        assert_eq!(response.status(), Status::Ok);

        let cookie = response
            .cookies()
            .get("auth-token")
            .expect("session cookie")
            .clone();
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(rocket::http::SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));

        let body: serde_json::Value =
            serde_json::from_str(&response.into_string().expect("Response body")).unwrap();
        // The cookie carries the token encrypted, never in the clear
        assert_ne!(Some(cookie.value()), body["token"].as_str());

        let (_, registered) = dispatch(app.client.get("/api/v1/auth/me"));
        assert_eq!(registered["user"]["username"], "alice");

        let (status, _) = dispatch(app.client.post("/api/v1/auth/logout"));
        assert_eq!(status, Status::Ok);

        let (_, after_logout) = dispatch(app.client.get("/api/v1/auth/me"));
        assert!(after_logout["user"].is_null());
    }

    #[test]
    fn test_update_profile_avatar() {
        let app = TestApp::new();
        let (_, token) = app.register("alice");

        let (status, _) = app.patch(
            "/api/v1/auth/profile",
            None,
            json!({ "avatar_url": "https://img.example.com/a.png" }),
        );
        assert_eq!(status, Status::Unauthorized);

        let (status, body) = app.patch(
            "/api/v1/auth/profile",
            Some(&token),
            json!({ "avatar_url": " https://img.example.com/a.png " }),
        );
        assert_eq!(status, Status::Ok);
        assert_eq!(body["user"]["avatar_url"], "https://img.example.com/a.png");

        let (_, body) = app.patch("/api/v1/auth/profile", Some(&token), json!({ "avatar_url": "" }));
        assert!(body["user"]["avatar_url"].is_null());
    }
}
