//! Integration tests for the book API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use tower::util::ServiceExt;
    use voice_scheduling::core::AppConfig;

    use crate::test_utils::{
        CLIENT_SECRET, REFRESH_TOKEN, body_to_json, body_to_string, configured, test_app,
    };

    fn book_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/book")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn alice(end: &str) -> serde_json::Value {
        serde_json::json!({
            "name": "Alice",
            "startUtc": "2026-02-19T19:00:00Z",
            "endUtc": end,
        })
    }

    /// Books an event end to end against a mock Google
    #[tokio::test]
    async fn it_books_an_event() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded(
                "grant_type".into(),
                "refresh_token".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.test","expires_in":3599,"token_type":"Bearer"}"#)
            .expect(1)
            .create_async()
            .await;
        let event_mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .match_header("authorization", "Bearer ya29.test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "summary": "Meeting with Alice",
                "start": {"dateTime": "2026-02-19T19:00:00Z", "timeZone": "UTC"},
                "end": {"dateTime": "2026-02-19T19:30:00Z", "timeZone": "UTC"},
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"abc123","htmlLink":"https://www.google.com/calendar/event?eid=abc123"}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let app = test_app(configured(&server.url()));
        let response = app
            .oneshot(book_request(alice("2026-02-19T19:30:00Z")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        token_mock.assert_async().await;
        event_mock.assert_async().await;

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["message"], "Booked");
        assert_eq!(body["bookingId"], "abc123");
        assert_eq!(
            body["htmlLink"],
            "https://www.google.com/calendar/event?eid=abc123"
        );
        assert_eq!(
            body["confirmed"],
            serde_json::json!({
                "name": "Alice",
                "title": "Meeting with Alice",
                "start": "2026-02-19T19:00:00Z",
                "end": "2026-02-19T19:30:00Z",
                "timezone": "America/Toronto",
            })
        );
    }

    /// Equal start and end is a 400 and Google is never called
    #[tokio::test]
    async fn it_rejects_zero_length_bookings_without_calling_google() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server.mock("POST", "/token").expect(0).create_async().await;
        let event_mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(configured(&server.url()));
        let response = app
            .oneshot(book_request(alice("2026-02-19T19:00:00Z")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        token_mock.assert_async().await;
        event_mock.assert_async().await;

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["field"], "endUtc");
        assert_eq!(body["error"], "endUtc: must be after startUtc");
    }

    /// Missing fields are validation errors, not extractor rejections
    #[tokio::test]
    async fn it_reports_missing_name_as_validation_error() {
        let app = test_app(AppConfig::default());

        let response = app
            .oneshot(book_request(serde_json::json!({
                "startUtc": "2026-02-19T19:00:00Z",
                "endUtc": "2026-02-19T19:30:00Z",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["field"], "name");
    }

    /// Explicit nulls are validation errors too
    #[tokio::test]
    async fn it_reports_null_fields_as_validation_errors() {
        let null_name = test_app(AppConfig::default())
            .oneshot(book_request(serde_json::json!({
                "name": null,
                "startUtc": "2026-02-19T19:00:00Z",
                "endUtc": "2026-02-19T19:30:00Z",
            })))
            .await
            .unwrap();

        assert_eq!(null_name.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(null_name.into_body()).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["field"], "name");
        assert_eq!(body["error"], "name: required");

        let null_end = test_app(AppConfig::default())
            .oneshot(book_request(serde_json::json!({
                "name": "Alice",
                "startUtc": "2026-02-19T19:00:00Z",
                "endUtc": null,
            })))
            .await
            .unwrap();

        assert_eq!(null_end.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(null_end.into_body()).await;
        assert_eq!(body["field"], "endUtc");
        assert_eq!(body["error"], "endUtc: must be ISO-8601 UTC");
    }

    /// Unparseable timestamps name the offending field
    #[tokio::test]
    async fn it_reports_unparseable_start() {
        let app = test_app(AppConfig::default());

        let response = app
            .oneshot(book_request(serde_json::json!({
                "name": "Alice",
                "startUtc": "next tuesday",
                "endUtc": "2026-02-19T19:30:00Z",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["error"], "startUtc: must be ISO-8601 UTC");
    }

    /// A deployment without credentials answers with a problem response
    #[tokio::test]
    async fn it_returns_problem_when_not_configured() {
        let mut server = mockito::Server::new_async().await;
        let token_mock = server.mock("POST", "/token").expect(0).create_async().await;

        let mut config = configured(&server.url());
        config.google_calendar_id = None;
        let app = test_app(config);

        let response = app
            .oneshot(book_request(alice("2026-02-19T19:30:00Z")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "application/problem+json"
        );
        token_mock.assert_async().await;

        let body = body_to_string(response.into_body()).await;
        assert!(!body.contains(CLIENT_SECRET));
        assert!(!body.contains(REFRESH_TOKEN));

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["title"], "Server not configured");
        assert_eq!(body["status"], 500);
        assert!(body["detail"].as_str().unwrap().contains("calendarId"));
    }

    /// A revoked refresh token surfaces the provider's message
    #[tokio::test]
    async fn it_returns_problem_when_refresh_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _token_mock = server
            .mock("POST", "/token")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#,
            )
            .create_async()
            .await;
        let event_mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .expect(0)
            .create_async()
            .await;

        let app = test_app(configured(&server.url()));
        let response = app
            .oneshot(book_request(alice("2026-02-19T19:30:00Z")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        event_mock.assert_async().await;

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["title"], "Google Calendar booking failed");
        assert_eq!(
            body["detail"],
            "invalid_grant: Token has been expired or revoked."
        );
    }

    /// A failed insert is reported once and not retried
    #[tokio::test]
    async fn it_returns_problem_when_google_rejects_the_event() {
        let mut server = mockito::Server::new_async().await;
        let _token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.test","expires_in":3599}"#)
            .create_async()
            .await;
        let event_mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":404,"message":"Not Found"}}"#)
            .expect(1)
            .create_async()
            .await;

        let app = test_app(configured(&server.url()));
        let response = app
            .oneshot(book_request(alice("2026-02-19T19:30:00Z")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        event_mock.assert_async().await;

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["title"], "Google Calendar booking failed");
        assert_eq!(body["detail"], "Not Found");
    }

    /// A supplied title and timezone are echoed back
    #[tokio::test]
    async fn it_keeps_title_and_timezone_from_request() {
        let mut server = mockito::Server::new_async().await;
        let _token_mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"ya29.test"}"#)
            .create_async()
            .await;
        let _event_mock = server
            .mock("POST", "/calendar/v3/calendars/primary/events")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "summary": "Quarterly review",
                "start": {"dateTime": "2026-02-19T19:00:00Z", "timeZone": "UTC"},
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"evt-9"}"#)
            .create_async()
            .await;

        let app = test_app(configured(&server.url()));
        let response = app
            .oneshot(book_request(serde_json::json!({
                "name": "Bob",
                "title": "Quarterly review",
                "startUtc": "2026-02-19T20:00:00+01:00",
                "endUtc": "2026-02-19T20:00:00Z",
                "timezone": "Europe/Paris",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["bookingId"], "evt-9");
        assert!(body.get("htmlLink").is_none());
        assert_eq!(body["confirmed"]["title"], "Quarterly review");
        assert_eq!(body["confirmed"]["timezone"], "Europe/Paris");
        assert_eq!(body["confirmed"]["start"], "2026-02-19T19:00:00Z");
    }
}
