#[cfg(test)]
mod tests {
    use crate::helpers::app::TestApp;
    use crate::helpers::make_test_app_with;
    use crate::helpers::requests::{
        empty_request, json_request, seed_assignment, seed_challenge, send,
    };
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};
    use marker::testing::ScriptedExecutor;
    use marker::traits::executor::ExecutionResult;
    use serde_json::json;
    use serial_test::serial;

    const TARGET: &str = "print(sum(map(int, input().split())))";
    const STUDENT: &str = "a, b = map(int, input().split())\nprint(a + b)";

    async fn setup(expiry_offset: Duration) -> (TestApp, i64, i64) {
        let executor = ScriptedExecutor::new()
            .on(TARGET, "2 3", ExecutionResult::success("5\n"))
            .on(STUDENT, "2 3", ExecutionResult::success("5\n"));
        let app = make_test_app_with(executor, None).await;
        let (challenge_id, target_id) = seed_challenge(
            &app,
            "python",
            json!({ "code": TARGET, "points": 10, "test_cases": ["2 3"] }),
        )
        .await;
        let expiry = (Utc::now() + expiry_offset).to_rfc3339();
        let assignment_id = seed_assignment(&app, challenge_id, Some(&expiry)).await;
        (app, assignment_id, target_id)
    }

    fn uri(assignment_id: i64, target_id: i64, tail: &str) -> String {
        format!("/api/assignments/{assignment_id}/targets/{target_id}/{tail}")
    }

    #[tokio::test]
    #[serial]
    async fn expired_lab_rejects_submission_until_late_approval() {
        let (app, assignment_id, target_id) = setup(Duration::hours(-1)).await;
        let submit = || {
            json_request(
                "POST",
                &uri(assignment_id, target_id, "submissions"),
                json!({ "student_id": 11, "code": STUDENT }),
            )
        };

        let (status, json) = send(&app, submit()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(json["message"].as_str().unwrap().contains("expired"));

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &uri(assignment_id, target_id, "late-requests"),
                json!({ "student_id": 11 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["late_request_status"], "requested");

        // A pending request does not lift the deadline.
        let (status, _) = send(&app, submit()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = send(
            &app,
            json_request(
                "PUT",
                &uri(assignment_id, target_id, "late-requests/11/approve"),
                json!({ "max_score": 5 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["late_request_status"], "approved");
        assert_eq!(json["data"]["late_submission_max_score"].as_f64(), Some(5.0));

        let (status, json) = send(&app, submit()).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["attempt"]["status"], "well-done");
        assert_eq!(json["data"]["attempt"]["score"].as_f64(), Some(5.0));
        assert_eq!(json["data"]["attempt"]["late_request_status"], "approved");

        let (_, json) = send(
            &app,
            empty_request(
                "GET",
                &format!("/api/assignments/{assignment_id}/students/11/attempts"),
            ),
        )
        .await;
        let attempts = json["data"].as_array().unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0]["target_code_id"], target_id);
        assert_eq!(attempts[0]["late_submission_max_score"].as_f64(), Some(5.0));

        let (_, json) = send(&app, empty_request("GET", "/api/students/11/score")).await;
        assert_eq!(json["data"]["total_score"].as_f64(), Some(5.0));
    }

    #[tokio::test]
    #[serial]
    async fn late_request_before_expiry_is_rejected() {
        let (app, assignment_id, target_id) = setup(Duration::days(1)).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &uri(assignment_id, target_id, "late-requests"),
                json!({ "student_id": 11 }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn approval_without_a_request_is_rejected() {
        let (app, assignment_id, target_id) = setup(Duration::hours(-1)).await;

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                &uri(assignment_id, target_id, "late-requests/11/approve"),
                json!({}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn approval_without_cap_uses_full_points() {
        let (app, assignment_id, target_id) = setup(Duration::hours(-1)).await;
        send(
            &app,
            json_request(
                "POST",
                &uri(assignment_id, target_id, "late-requests"),
                json!({ "student_id": 11 }),
            ),
        )
        .await;

        let (status, json) = send(
            &app,
            json_request(
                "PUT",
                &uri(assignment_id, target_id, "late-requests/11/approve"),
                json!({}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["late_submission_max_score"].as_f64(), Some(10.0));
    }
}
