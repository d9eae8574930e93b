use super::*;
use modhub::models::Role;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;

    #[test]
    fn test_regular_user_cannot_change_status() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let id = app.upload(&alice, "Police MDT", "scripts");

        // Refused before the target is even looked at
        for target in ["approved", "rejected", "pending", "archived"] {
            let (status, body) = app.set_status(&alice, id, target);
            assert_eq!(status, Status::Forbidden, "target {target}");
            assert_eq!(body["error"], "Insufficient permissions");
        }

        let resource = app.database.get_resource(id).unwrap().unwrap();
        assert_eq!(resource.status, "pending");
        assert!(!resource.is_new);
    }

    #[test]
    fn test_anonymous_cannot_change_status() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let id = app.upload(&alice, "Police MDT", "scripts");

        let (status, _) = app.patch(
            &format!("/api/v1/admin/resources/{id}"),
            None,
            json!({ "status": "approved" }),
        );
        assert_eq!(status, Status::Unauthorized);
    }

    #[test]
    fn test_invalid_status_and_missing_resource() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);
        let id = app.upload(&alice, "Police MDT", "scripts");

        let (status, body) = app.set_status(&moderator, id, "archived");
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error"], "Invalid status");

        let (status, _) = app.patch(
            &format!("/api/v1/admin/resources/{id}"),
            Some(&moderator),
            json!({}),
        );
        assert_eq!(status, Status::BadRequest);

        let (status, body) = app.set_status(&moderator, 9999, "approved");
        assert_eq!(status, Status::NotFound);
        assert_eq!(body["error"], "Resource not found");
    }

    #[test]
    fn test_transitions_couple_new_marker() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);
        let id = app.upload(&alice, "Police MDT", "scripts");
        let uploaded = app.database.get_resource(id).unwrap().unwrap();

        let (status, body) = app.set_status(&moderator, id, "approved");
        assert_eq!(status, Status::Ok);
        assert_eq!(body["status"], "approved");
        assert_eq!(body["is_new"], true);
        assert_eq!(timestamp(&body["created_at"]), uploaded.created_at);
        assert!(timestamp(&body["updated_at"]) > uploaded.updated_at);
        let approved_at = timestamp(&body["updated_at"]);

        let (_, body) = app.set_status(&moderator, id, "rejected");
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["is_new"], false);
        assert!(timestamp(&body["updated_at"]) > approved_at);

        let (_, body) = app.set_status(&moderator, id, "approved");
        assert_eq!(body["is_new"], true);

        // Back into the queue
        let (status, body) = app.set_status(&moderator, id, "pending");
        assert_eq!(status, Status::Ok);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["is_new"], false);
    }

    #[test]
    fn test_rejected_resource_leaves_catalogue() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let admin = app.register_with_role("admin", Role::Admin);
        let id = app.upload_approved(&alice, &admin, "Police MDT", "scripts");

        let (_, listing) = app.get("/api/v1/resources", None);
        assert_eq!(listing["total"], 1);

        app.set_status(&admin, id, "rejected");

        let (_, listing) = app.get("/api/v1/resources", None);
        assert_eq!(listing["total"], 0);
        let (status, _) = app.get(&format!("/api/v1/resources/{id}"), None);
        assert_eq!(status, Status::NotFound);
    }

    #[test]
    fn test_only_admin_can_delete() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let moderator = app.register_with_role("mod", Role::Moderator);
        let id = app.upload(&alice, "Police MDT", "scripts");
        let path = format!("/api/v1/admin/resources/{id}");

        let (status, _) = app.delete(&path, None);
        assert_eq!(status, Status::Unauthorized);
        let (status, _) = app.delete(&path, Some(&alice));
        assert_eq!(status, Status::Forbidden);
        let (status, _) = app.delete(&path, Some(&moderator));
        assert_eq!(status, Status::Forbidden);

        assert!(app.database.get_resource(id).unwrap().is_some());
    }

    #[test]
    fn test_delete_cascades() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let (_, bob) = app.register("bob");
        let admin = app.register_with_role("admin", Role::Admin);
        let id = app.upload_approved(&alice, &admin, "Police MDT", "scripts");
        let other = app.upload_approved(&alice, &admin, "Bank Heist", "scripts");

        for resource in [id, other] {
            app.post(
                &format!("/api/v1/resources/{resource}/comments"),
                Some(&bob),
                json!({ "content": "Nice" }),
            );
            app.post(
                &format!("/api/v1/resources/{resource}/reviews"),
                Some(&bob),
                json!({ "rating": 5 }),
            );
            app.post(&format!("/api/v1/resources/{resource}/download"), None, json!({}));
        }

        let (status, body) = app.delete(&format!("/api/v1/admin/resources/{id}"), Some(&admin));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["success"], true);

        assert!(app.database.get_resource(id).unwrap().is_none());
        assert!(app.database.list_comments(id).unwrap().is_empty());
        assert_eq!(app.database.count_reviews(id).unwrap(), 0);
        assert!(app.database.list_download_logs(id).unwrap().is_empty());

        // The other resource keeps its engagement
        assert_eq!(app.database.list_comments(other).unwrap().len(), 1);
        assert_eq!(app.database.count_reviews(other).unwrap(), 1);
        assert_eq!(app.database.list_download_logs(other).unwrap().len(), 1);

        let (status, _) = app.delete(&format!("/api/v1/admin/resources/{id}"), Some(&admin));
        assert_eq!(status, Status::NotFound);
    }
}
