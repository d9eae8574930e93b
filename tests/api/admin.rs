use super::*;
use modhub::models::Role;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;

    #[test]
    fn test_stats_require_staff() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");

        let (status, _) = app.get("/api/v1/admin/stats", None);
        assert_eq!(status, Status::Unauthorized);
        let (status, _) = app.get("/api/v1/admin/stats", Some(&alice));
        assert_eq!(status, Status::Forbidden);
    }

    #[test]
    fn test_stats_totals() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);

        let approved = app.upload_approved(&alice, &moderator, "Police MDT", "scripts");
        for n in 0..6 {
            app.upload(&alice, &format!("Pending {n}"), "tools");
        }

        app.get(&format!("/api/v1/resources/{approved}"), None);
        app.get(&format!("/api/v1/resources/{approved}"), None);
        app.post(&format!("/api/v1/resources/{approved}/download"), None, json!({}));
        app.post(
            &format!("/api/v1/resources/{approved}/comments"),
            Some(&alice),
            json!({ "content": "v1.1 is out" }),
        );

        let (status, stats) = app.get("/api/v1/admin/stats", Some(&moderator));
        assert_eq!(status, Status::Ok);
        assert_eq!(stats["total_users"], 2);
        assert_eq!(stats["total_resources"], 7);
        assert_eq!(stats["pending_resources"], 6);
        assert_eq!(stats["approved_resources"], 1);
        assert_eq!(stats["total_views"], 2);
        assert_eq!(stats["total_downloads"], 1);
        assert_eq!(stats["total_comments"], 1);

        let recent = stats["recent_pending"].as_array().unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0]["title"], "Pending 5");
        assert_eq!(recent[0]["username"], "alice");
    }

    #[test]
    fn test_moderation_queue() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);

        app.upload_approved(&alice, &moderator, "Police MDT", "scripts");
        app.upload(&alice, "Bank Heist", "scripts");

        let (status, _) = app.get("/api/v1/admin/resources", Some(&alice));
        assert_eq!(status, Status::Forbidden);

        let (status, all) = app.get("/api/v1/admin/resources", Some(&moderator));
        assert_eq!(status, Status::Ok);
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, pending) = app.get("/api/v1/admin/resources?status=pending", Some(&moderator));
        let pending = pending.as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["title"], "Bank Heist");
        assert_eq!(pending[0]["author_username"], "alice");

        let (status, _) = app.get("/api/v1/admin/resources?status=archived", Some(&moderator));
        assert_eq!(status, Status::BadRequest);
    }

    #[test]
    fn test_user_list_is_admin_only() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);
        let admin = app.register_with_role("admin", Role::Admin);

        app.upload(&alice, "Police MDT", "scripts");
        app.upload(&alice, "Bank Heist", "scripts");

        let (status, _) = app.get("/api/v1/admin/users", Some(&moderator));
        assert_eq!(status, Status::Forbidden);

        let (status, users) = app.get("/api/v1/admin/users", Some(&admin));
        assert_eq!(status, Status::Ok);

        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 3);
        assert!(users.iter().all(|u| u.get("password_hash").is_none()));

        let alice = users.iter().find(|u| u["username"] == "alice").unwrap();
        assert_eq!(alice["resource_count"], 2);
        assert_eq!(alice["role"], "user");

        let admin = users.iter().find(|u| u["username"] == "admin").unwrap();
        assert_eq!(admin["role"], "admin");
        assert_eq!(admin["resource_count"], 0);
    }
}
