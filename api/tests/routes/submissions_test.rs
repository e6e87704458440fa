#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app_with;
    use crate::helpers::requests::{
        empty_request, json_request, seed_assignment, seed_challenge, send,
    };
    use axum::http::StatusCode;
    use marker::testing::{FailingAssessor, ScriptedExecutor, StaticAssessor, sample_assessment};
    use marker::traits::assessor::Assessor;
    use marker::traits::executor::ExecutionResult;
    use serde_json::{Value, json};
    use serial_test::serial;
    use std::sync::Arc;

    const TARGET: &str = "int main(){for(int i=0;i<3;i++) std::cout<<i;}";
    const STUDENT: &str = "int main(){for(int j=0;j<3;++j){std::cout<<j;}}";
    const WRONG: &str = "int main(){for(int j=0;j<3;++j){std::cout<<'x';}}";
    const BROKEN: &str = "int main(){for(int j=0;j<3;++j){std::cout<<j}}";

    fn executor() -> ScriptedExecutor {
        ScriptedExecutor::new()
            .on(TARGET, "", ExecutionResult::success("012"))
            .on(STUDENT, "", ExecutionResult::success("012"))
            .on(WRONG, "", ExecutionResult::success("xxx"))
            .on(BROKEN, "", ExecutionResult::compile_error("expected ';' before '}'"))
    }

    async fn setup(executor: ScriptedExecutor) -> (crate::helpers::app::TestApp, i64, i64) {
        setup_with(executor, None).await
    }

    async fn setup_with(
        executor: ScriptedExecutor,
        assessor: Option<Arc<dyn Assessor>>,
    ) -> (crate::helpers::app::TestApp, i64, i64) {
        let app = make_test_app_with(executor, assessor).await;
        let (challenge_id, target_id) = seed_challenge(
            &app,
            "cpp",
            json!({ "code": TARGET, "enforced_statement": "for", "points": 10 }),
        )
        .await;
        let assignment_id = seed_assignment(&app, challenge_id, None).await;
        (app, assignment_id, target_id)
    }

    fn submission(student_id: i64, code: &str) -> Value {
        json!({ "student_id": student_id, "code": code })
    }

    fn submissions_uri(assignment_id: i64, target_id: i64) -> String {
        format!("/api/assignments/{assignment_id}/targets/{target_id}/submissions")
    }

    #[tokio::test]
    #[serial]
    async fn matching_output_is_well_done_and_credits_the_ledger() {
        let (app, assignment_id, target_id) = setup(executor()).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, STUDENT),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["success"], true);
        let data = &json["data"];
        assert_eq!(data["attempt"]["status"], "well-done");
        assert_eq!(data["attempt"]["completed"], true);
        assert_eq!(data["attempt"]["score"].as_f64(), Some(10.0));
        assert_eq!(data["attempt"]["statement_check"]["found"], true);
        assert_eq!(data["attempt"]["language"], "cpp");
        assert_eq!(data["comparison"]["mode"], "execution");
        assert_eq!(data["score_delta"].as_f64(), Some(10.0));

        let (_, json) = send(&app, empty_request("GET", "/api/students/7/score")).await;
        assert_eq!(json["data"]["total_score"].as_f64(), Some(10.0));
    }

    #[tokio::test]
    #[serial]
    async fn worse_resubmission_keeps_the_best_credit() {
        let (app, assignment_id, target_id) = setup(executor()).await;
        let uri = submissions_uri(assignment_id, target_id);

        send(&app, json_request("POST", &uri, submission(7, STUDENT))).await;
        let (status, json) = send(&app, json_request("POST", &uri, submission(7, WRONG))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["attempt"]["status"], "fail");
        assert_eq!(json["data"]["attempt"]["completed"], false);
        assert_eq!(json["data"]["attempt"]["best_score"].as_f64(), Some(10.0));
        assert_eq!(json["data"]["score_delta"].as_f64(), Some(0.0));

        let (_, json) = send(&app, empty_request("GET", "/api/students/7/score")).await;
        assert_eq!(json["data"]["total_score"].as_f64(), Some(10.0));
    }

    #[tokio::test]
    #[serial]
    async fn student_compile_error_is_422_and_records_nothing() {
        let (app, assignment_id, target_id) = setup(executor()).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, BROKEN),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert!(json["message"].as_str().unwrap().contains("expected ';'"));

        let (_, json) = send(
            &app,
            empty_request(
                "GET",
                &format!("/api/assignments/{assignment_id}/students/7/attempts"),
            ),
        )
        .await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    #[serial]
    async fn failing_reference_solution_reports_misconfiguration() {
        let executor = ScriptedExecutor::new()
            .on(TARGET, "", ExecutionResult::runtime_error("Segmentation fault"))
            .on(STUDENT, "", ExecutionResult::success("012"));
        let (app, assignment_id, target_id) = setup(executor).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, STUDENT),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["message"].as_str().unwrap().contains("misconfigured"));
    }

    #[tokio::test]
    #[serial]
    async fn unreachable_execution_service_is_502() {
        let executor = ScriptedExecutor::new()
            .on(TARGET, "", ExecutionResult::network_error("connection refused"))
            .on(STUDENT, "", ExecutionResult::success("012"));
        let (app, assignment_id, target_id) = setup(executor).await;

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, STUDENT),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    #[serial]
    async fn empty_code_is_rejected() {
        let (app, assignment_id, target_id) = setup(executor()).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, ""),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Code must not be empty");
    }

    #[tokio::test]
    #[serial]
    async fn unknown_target_is_404() {
        let (app, assignment_id, _) = setup(executor()).await;

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, 999),
                submission(7, STUDENT),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn failed_attempt_gets_an_ai_assessment() {
        let assessor = Arc::new(StaticAssessor::new(sample_assessment()));
        let (app, assignment_id, target_id) = setup_with(executor(), Some(assessor.clone() as Arc<dyn Assessor>)).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, WRONG),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["attempt"]["status"], "fail");
        assert_eq!(json["data"]["attempt"]["assessment"]["overall_score"], 65);
        assert_eq!(assessor.calls(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn assessment_outage_still_grades_with_a_notice() {
        let (app, assignment_id, target_id) =
            setup_with(executor(), Some(Arc::new(FailingAssessor) as Arc<dyn Assessor>)).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(7, WRONG),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["attempt"]["assessment"], Value::Null);
        assert_eq!(
            json["data"]["notice"],
            marker::ASSESSMENT_UNAVAILABLE_NOTICE
        );
    }

    #[tokio::test]
    #[serial]
    async fn html_is_compared_as_source() {
        let app = make_test_app_with(ScriptedExecutor::new(), None).await;
        let (challenge_id, target_id) = seed_challenge(
            &app,
            "html",
            json!({ "code": "<h1>Hello</h1>\n<p>World</p>", "points": 4 }),
        )
        .await;
        let assignment_id = seed_assignment(&app, challenge_id, None).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &submissions_uri(assignment_id, target_id),
                submission(3, "<h1>Hello</h1>   <p>World</p>"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["comparison"]["mode"], "source_equality");
        assert_eq!(json["data"]["attempt"]["status"], "well-done");
        assert_eq!(json["data"]["attempt"]["score"].as_f64(), Some(4.0));
    }
}
