pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::application::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(form::index_handler))
        .route("/health", get(health::health_handler))
        // Form submission
        .route(
            "/api/v1/applications",
            post(handlers::handle_submit_application),
        )
        .route(
            "/api/v1/resumes/upload",
            post(handlers::handle_upload_resume),
        )
        // Per-stage previews
        .route(
            "/api/v1/analyze/resume",
            post(handlers::handle_analyze_resume),
        )
        .route("/api/v1/analyze/job", post(handlers::handle_analyze_job))
        .route("/api/v1/analyze/match", post(handlers::handle_match))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::testing::ScriptedModel;
    use crate::resume::extract::test_support::minimal_pdf;

    const BOUNDARY: &str = "applymail-test-boundary";

    fn app(model: ScriptedModel) -> Router {
        app_with_config(model, Config::for_tests())
    }

    fn app_with_config(model: ScriptedModel, config: Config) -> Router {
        build_router(AppState {
            llm: Arc::new(model),
            config,
        })
    }

    /// Builds a multipart body. `file` is (field, file name, bytes).
    fn multipart(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Body {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, file_name, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                     filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn multipart_request(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    fn json_request(uri: &str, value: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let response = app(ScriptedModel::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "applymail-api");
    }

    #[tokio::test]
    async fn test_index_serves_the_form() {
        let response = app(ScriptedModel::new())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Smart Job Application Email Generator"));
        assert!(html.contains("name=\"job_description\""));
    }

    #[tokio::test]
    async fn test_submission_without_resume_is_rejected() {
        let body = multipart(&[("job_description", "Rust engineer wanted")], None);
        let response = app(ScriptedModel::new())
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please upload a resume file");
    }

    #[tokio::test]
    async fn test_submission_with_non_pdf_resume_is_unprocessable() {
        let body = multipart(
            &[("job_description", "Rust engineer wanted")],
            Some(("resume", "resume.docx", &b"PK\x03\x04 not a pdf"[..])),
        );
        let response = app(ScriptedModel::new())
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PDF_ERROR");
    }

    #[tokio::test]
    async fn test_submission_without_job_description_is_rejected() {
        let pdf = minimal_pdf("Ada Lovelace");
        let body = multipart(&[], Some(("resume", "resume.pdf", pdf.as_slice())));
        let response = app(ScriptedModel::new())
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please provide a job description");
    }

    #[tokio::test]
    async fn test_basic_submission_returns_email() {
        let model = ScriptedModel::new().reply(
            "You are a professional mail writer",
            "Subject: Application for Rust Engineer at TechNova\n\nDear Hiring Manager,",
        );
        let pdf = minimal_pdf("Ada Lovelace Rust Engineer");
        let body = multipart(
            &[
                ("job_description", "TechNova needs a Rust engineer."),
                ("user_name", "Ada Lovelace"),
                ("company_name", "TechNova"),
                ("job_title", "Rust Engineer"),
                ("email_tone", "professional"),
                ("use_advanced", "false"),
            ],
            Some(("resume", "resume.pdf", pdf.as_slice())),
        );

        let response = app(model)
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["mode"], "basic");
        assert_eq!(body["status"], "Success! Email generated.");
        assert_eq!(body["subject"], "Application for Rust Engineer at TechNova");
        assert_eq!(body["resume_summary"], "Basic mode: Resume analysis not performed");
    }

    #[tokio::test]
    async fn test_invalid_use_advanced_flag_is_rejected() {
        let body = multipart(&[("use_advanced", "sometimes")], None);
        let response = app(ScriptedModel::new())
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_check_reports_success() {
        let pdf = minimal_pdf("Grace Hopper Compiler Engineer");
        let body = multipart(&[], Some(("resume", "grace.pdf", pdf.as_slice())));
        let response = app(ScriptedModel::new())
            .oneshot(multipart_request("/api/v1/resumes/upload", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], handlers::UPLOAD_OK_STATUS);
        assert_eq!(body["file_name"], "grace.pdf");
        assert!(body["characters"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::for_tests()
        };
        let padded = "Rust ".repeat(800);
        let pdf = minimal_pdf(&padded);
        assert!(pdf.len() > config.max_upload_bytes);

        let body = multipart(&[], Some(("resume", "big.pdf", pdf.as_slice())));
        let response = app_with_config(ScriptedModel::new(), config)
            .oneshot(multipart_request("/api/v1/resumes/upload", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("1024 bytes"));
    }

    #[tokio::test]
    async fn test_oversized_submission_is_payload_too_large() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::for_tests()
        };
        let pdf = minimal_pdf(&"Rust ".repeat(800));
        let body = multipart(
            &[("job_description", "TechNova needs a Rust engineer.")],
            Some(("resume", "big.pdf", pdf.as_slice())),
        );
        let response = app_with_config(ScriptedModel::new(), config)
            .oneshot(multipart_request("/api/v1/applications", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_analyze_job_returns_profile() {
        let model = ScriptedModel::new().reply(
            "Analyze the following job description",
            r#"{"job_title": "Rust Engineer", "required_skills": ["Rust"]}"#,
        );
        let response = app(model)
            .oneshot(json_request(
                "/api/v1/analyze/job",
                json!({"job_description": "We need Rust."}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["job_title"], "Rust Engineer");
        assert_eq!(body["required_skills"], json!(["Rust"]));
    }

    #[tokio::test]
    async fn test_analyze_resume_rejects_blank_text() {
        let response = app(ScriptedModel::new())
            .oneshot(json_request(
                "/api/v1/analyze/resume",
                json!({"resume_text": "  "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_match_endpoint_maps_upstream_failure_to_bad_gateway() {
        let model = ScriptedModel::new().fail("Compare the candidate's skills", 500);
        let response = app(model)
            .oneshot(json_request(
                "/api/v1/analyze/match",
                json!({"resume": {"name": "Ada"}, "job": {"job_title": "Rust Engineer"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
