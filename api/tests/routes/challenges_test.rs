#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use crate::helpers::requests::{empty_request, json_request, seed_challenge, send};
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;

    fn loop_target() -> serde_json::Value {
        json!({
            "code": "int main(){for(int i=0;i<3;i++) std::cout<<i;}",
            "description": "Print 012",
            "enforced_statement": "for",
            "points": 10
        })
    }

    #[tokio::test]
    #[serial]
    async fn create_challenge_with_targets_then_fetch_it() {
        let app = make_test_app().await;
        let (challenge_id, target_id) = seed_challenge(&app, "cpp", loop_target()).await;

        let (status, json) = send(
            &app,
            empty_request("GET", &format!("/api/challenges/{challenge_id}")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["week"], 4);
        assert_eq!(json["data"]["language"], "cpp");
        let targets = json["data"]["targets"].as_array().unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0]["id"], target_id);
        assert_eq!(targets[0]["enforced_statement"], "for");
        assert_eq!(targets[0]["required_output_similarity"], serde_json::Value::Null);
        assert_eq!(targets[0]["test_cases"], json!([]));
    }

    #[tokio::test]
    #[serial]
    async fn create_challenge_rejects_invalid_week() {
        let app = make_test_app().await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/api/challenges",
                json!({ "lab_name": "Lab", "week": 0, "title": "Intro", "language": "python" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Week must be a positive number");
    }

    #[tokio::test]
    #[serial]
    async fn create_challenge_rejects_out_of_range_threshold() {
        let app = make_test_app().await;
        let mut target = loop_target();
        target["required_output_similarity"] = json!(150);

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                "/api/challenges",
                json!({
                    "lab_name": "Lab",
                    "week": 1,
                    "title": "Intro",
                    "language": "cpp",
                    "targets": [target]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "Required output similarity must be between 0 and 100"
        );
    }

    #[tokio::test]
    #[serial]
    async fn get_unknown_challenge_is_404() {
        let app = make_test_app().await;

        let (status, json) = send(&app, empty_request("GET", "/api/challenges/999")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Challenge not found");
    }

    #[tokio::test]
    #[serial]
    async fn add_target_to_existing_challenge() {
        let app = make_test_app().await;
        let (challenge_id, _) = seed_challenge(&app, "cpp", loop_target()).await;

        let (status, json) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/challenges/{challenge_id}/targets"),
                json!({
                    "code": "int main(){int x; std::cin>>x; std::cout<<x*2;}",
                    "points": 5,
                    "required_output_similarity": 90,
                    "test_cases": ["1", "21"]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["challenge_id"], challenge_id);
        assert_eq!(json["data"]["test_cases"], json!(["1", "21"]));

        let (_, json) = send(
            &app,
            empty_request("GET", &format!("/api/challenges/{challenge_id}")),
        )
        .await;
        assert_eq!(json["data"]["targets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    #[serial]
    async fn add_target_to_unknown_challenge_is_404() {
        let app = make_test_app().await;

        let (status, _) = send(
            &app,
            json_request("POST", "/api/challenges/42/targets", loop_target()),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn edit_target_replaces_fields() {
        let app = make_test_app().await;
        let (_, target_id) = seed_challenge(&app, "cpp", loop_target()).await;

        let (status, json) = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/targets/{target_id}"),
                json!({
                    "code": "int main(){int i=0; while(i<3) std::cout<<i++;}",
                    "description": "Print 012 with while",
                    "enforced_statement": "while",
                    "points": 12.5
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["enforced_statement"], "while");
        assert_eq!(json["data"]["points"], 12.5);
        assert_eq!(json["data"]["description"], "Print 012 with while");
    }

    #[tokio::test]
    #[serial]
    async fn edit_unknown_target_is_404() {
        let app = make_test_app().await;

        let (status, json) = send(
            &app,
            json_request("PUT", "/api/targets/77", loop_target()),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }
}
