#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app_with;
    use crate::helpers::requests::{
        empty_request, json_request, seed_assignment, seed_challenge, send,
    };
    use axum::http::StatusCode;
    use marker::testing::ScriptedExecutor;
    use serde_json::json;
    use serial_test::serial;

    const TARGET: &str = "console.log([1, 2, 3].map(n => n * 2).join(' '))";

    #[tokio::test]
    #[serial]
    async fn create_assignment_for_unknown_challenge_is_404() {
        let app = make_test_app_with(ScriptedExecutor::new(), None).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/api/assignments",
                json!({ "challenge_id": 5, "class_id": 1 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Challenge not found");
    }

    #[tokio::test]
    #[serial]
    async fn create_assignment_echoes_expiry() {
        let app = make_test_app_with(ScriptedExecutor::new(), None).await;
        let (challenge_id, _) =
            seed_challenge(&app, "javascript", json!({ "code": TARGET, "points": 3 })).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/api/assignments",
                json!({
                    "challenge_id": challenge_id,
                    "class_id": 9,
                    "expiry_date": "2030-01-01T00:00:00Z"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["class_id"], 9);
        assert!(
            json["data"]["expiry_date"]
                .as_str()
                .unwrap()
                .starts_with("2030-01-01T00:00:00")
        );
    }

    #[tokio::test]
    #[serial]
    async fn unassigning_removes_attempts_but_keeps_the_ledger() {
        // JavaScript is graded on source text, so nothing is executed.
        let app = make_test_app_with(ScriptedExecutor::new(), None).await;
        let (challenge_id, target_id) =
            seed_challenge(&app, "javascript", json!({ "code": TARGET, "points": 3 })).await;
        let assignment_id = seed_assignment(&app, challenge_id, None).await;

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/assignments/{assignment_id}/targets/{target_id}/submissions"),
                json!({ "student_id": 21, "code": TARGET }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = send(
            &app,
            empty_request("DELETE", &format!("/api/assignments/{assignment_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);

        let (status, _) = send(
            &app,
            empty_request(
                "GET",
                &format!("/api/assignments/{assignment_id}/students/21/attempts"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, json) = send(&app, empty_request("GET", "/api/students/21/score")).await;
        assert_eq!(json["data"]["total_score"].as_f64(), Some(3.0));

        let (status, _) = send(
            &app,
            empty_request("DELETE", &format!("/api/assignments/{assignment_id}")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn student_without_credit_has_zero_total() {
        let app = make_test_app_with(ScriptedExecutor::new(), None).await;

        let (status, json) = send(&app, empty_request("GET", "/api/students/404/score")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["student_id"], 404);
        assert_eq!(json["data"]["total_score"].as_f64(), Some(0.0));
    }
}
