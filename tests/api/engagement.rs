use super::*;
use modhub::models::{NewReview, Role};
use serde_json::json;

/// An approved resource authored by alice, plus tokens for alice and bob.
fn published(app: &TestApp) -> (i32, String, String) {
    let (_, alice) = app.register("alice");
    let (_, bob) = app.register("bob");
    let admin = app.register_with_role("admin", Role::Admin);
    let id = app.upload_approved(&alice, &admin, "Police MDT", "scripts");
    (id, alice, bob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;

    #[test]
    fn test_comment_requires_authentication() {
        let app = TestApp::new();
        let (id, _, _) = published(&app);

        let (status, _) = app.post(
            &format!("/api/v1/resources/{id}/comments"),
            None,
            json!({ "content": "Nice" }),
        );
        assert_eq!(status, Status::Unauthorized);
    }

    #[test]
    fn test_comment_content_is_trimmed_and_required() {
        let app = TestApp::new();
        let (id, _, bob) = published(&app);
        let path = format!("/api/v1/resources/{id}/comments");

        let (status, body) = app.post(&path, Some(&bob), json!({ "content": "   " }));
        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error"], "Comment content is required");

        let (status, body) = app.post(&path, Some(&bob), json!({}));
        assert_eq!(status, Status::BadRequest, "{body}");

        let (status, body) = app.post(&path, Some(&bob), json!({ "content": "  Works great \n" }));
        assert_eq!(status, Status::Ok);
        assert_eq!(body["content"], "Works great");
    }

    #[test]
    fn test_comments_are_listed_newest_first() {
        let app = TestApp::new();
        let (id, alice, bob) = published(&app);
        let path = format!("/api/v1/resources/{id}/comments");

        app.post(&path, Some(&bob), json!({ "content": "first" }));
        app.post(&path, Some(&alice), json!({ "content": "second" }));
        app.post(&path, Some(&bob), json!({ "content": "third" }));

        let (status, body) = app.get(&path, None);
        assert_eq!(status, Status::Ok);

        let comments = body["comments"].as_array().unwrap();
        let contents: Vec<&str> = comments
            .iter()
            .map(|c| c["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, ["third", "second", "first"]);
        assert_eq!(comments[1]["username"], "alice");
        assert!(comments[0].get("avatar_url").is_some());
    }

    #[test]
    fn test_engagement_on_unpublished_resource() {
        let app = TestApp::new();
        let (_, alice) = app.register("alice");
        let (_, bob) = app.register("bob");
        let id = app.upload(&alice, "Police MDT", "scripts");

        let (status, _) = app.post(
            &format!("/api/v1/resources/{id}/comments"),
            Some(&bob),
            json!({ "content": "Nice" }),
        );
        assert_eq!(status, Status::NotFound);

        let (status, _) = app.post(
            &format!("/api/v1/resources/{id}/reviews"),
            Some(&bob),
            json!({ "rating": 5 }),
        );
        assert_eq!(status, Status::NotFound);

        let (status, _) = app.get(&format!("/api/v1/resources/{id}/comments"), None);
        assert_eq!(status, Status::NotFound);

        // The author can still talk about their own submission
        let (status, _) = app.post(
            &format!("/api/v1/resources/{id}/comments"),
            Some(&alice),
            json!({ "content": "Changelog: first upload" }),
        );
        assert_eq!(status, Status::Ok);
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        let app = TestApp::new();
        let (id, _, bob) = published(&app);
        let path = format!("/api/v1/resources/{id}/reviews");

        for body in [json!({ "rating": 6 }), json!({ "rating": 0 }), json!({})] {
            let (status, response) = app.post(&path, Some(&bob), body);
            assert_eq!(status, Status::BadRequest);
            assert_eq!(response["error"], "Rating must be between 1 and 5");
        }

        assert_eq!(app.database.count_reviews(id).unwrap(), 0);
    }

    #[test]
    fn test_review_upsert_keeps_one_row() {
        let app = TestApp::new();
        let (id, _, bob) = published(&app);
        let path = format!("/api/v1/resources/{id}/reviews");

        let (status, first) = app.post(&path, Some(&bob), json!({ "rating": 3, "content": "ok" }));
        assert_eq!(status, Status::Ok);

        let (status, second) = app.post(&path, Some(&bob), json!({ "rating": 5 }));
        assert_eq!(status, Status::Ok);

        assert_eq!(first["id"], second["id"]);
        assert_eq!(first["created_at"], second["created_at"]);
        assert!(timestamp(&second["updated_at"]) > timestamp(&first["updated_at"]));
        assert_eq!(second["rating"], 5);
        assert!(second["content"].is_null());

        assert_eq!(app.database.count_reviews(id).unwrap(), 1);

        let (_, listing) = app.get(&path, None);
        assert_eq!(listing["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(listing["reviews"][0]["rating"], 5);
        assert_eq!(listing["reviews"][0]["username"], "bob");
        assert_eq!(listing["avg_rating"].as_f64(), Some(5.0));
        assert_eq!(listing["total_reviews"], 1);
    }

    #[test]
    fn test_review_written_concurrently_is_overwritten() {
        let app = TestApp::new();
        let (id, _, _) = published(&app);
        let (carol_id, carol) = app.register("carol");

        // Another request stored carol's review first
        let existing = app
            .database
            .create_review(&NewReview::new(id, carol_id, 2, None))
            .unwrap();

        let (status, body) = app.post(
            &format!("/api/v1/resources/{id}/reviews"),
            Some(&carol),
            json!({ "rating": 4, "content": "Better after the update" }),
        );
        assert_eq!(status, Status::Ok, "{body}");
        assert_eq!(body["id"], existing.id);
        assert_eq!(body["rating"], 4);
        assert_eq!(timestamp(&body["created_at"]), existing.created_at);
        assert!(timestamp(&body["updated_at"]) > existing.updated_at);

        assert_eq!(app.database.count_reviews(id).unwrap(), 1);
    }

    #[test]
    fn test_average_rating() {
        let app = TestApp::new();
        let (id, alice, bob) = published(&app);
        let path = format!("/api/v1/resources/{id}/reviews");

        let (_, empty) = app.get(&path, None);
        assert_eq!(empty["avg_rating"].as_f64(), Some(0.0));
        assert_eq!(empty["total_reviews"], 0);

        app.post(&path, Some(&bob), json!({ "rating": 4 }));
        app.post(&path, Some(&alice), json!({ "rating": 5 }));

        let (_, detail) = app.get(&format!("/api/v1/resources/{id}"), None);
        assert_eq!(detail["avg_rating"].as_f64(), Some(4.5));
        assert_eq!(detail["total_reviews"], 2);
    }
}
