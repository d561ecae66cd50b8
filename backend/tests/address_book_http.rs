//! End-to-end contact flows through the HTTP adapter and in-memory storage.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

use addressbook::Trace;
use addressbook::inbound::http::configure;
use addressbook::outbound::mail::LoggingPasswordResetMailer;

mod support;

fn ada() -> Value {
    json!({
        "name": "Ada Lovelace",
        "phoneNumber": "5550100100",
        "email": "ada@example.com",
        "address": "12 St James's Square, London"
    })
}

async fn body_of(res: ServiceResponse) -> (StatusCode, Value) {
    let status = res.status();
    let body: Value = test::read_body_json(res).await;
    (status, body)
}

async fn send<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    body_of(test::call_service(app, req.to_request()).await).await
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(support::in_memory_state(Arc::new(
                    LoggingPasswordResetMailer::new("http://localhost:8080"),
                )))
                .wrap(Trace)
                .configure(configure),
        )
        .await
    };
}

#[rstest]
#[actix_web::test]
async fn contact_lifecycle() {
    let app = app!();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/addressbook/add")
            .set_json(ada())
            .to_request(),
    )
    .await;
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/api/addressbook/get/1")
    );
    let (status, body) = body_of(res).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Contact added successfully.");
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/addressbook/get/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@example.com");

    let mut changed = ada();
    changed["address"] = json!("Ockham Park, Surrey");
    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/addressbook/update/1")
            .set_json(changed),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["address"], "Ockham Park, Surrey");

    let (status, body) = send(
        &app,
        test::TestRequest::delete().uri("/api/addressbook/delete/1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "Deleted");

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/addressbook/get/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "message": "Contact with ID 1 not found.", "data": null})
    );
}

#[rstest]
#[actix_web::test]
async fn listing_reflects_writes_despite_caching() {
    let app = app!();

    let (_, body) = send(&app, test::TestRequest::get().uri("/api/addressbook")).await;
    assert_eq!(body["data"], json!([]));

    send(
        &app,
        test::TestRequest::post()
            .uri("/api/addressbook/add")
            .set_json(ada()),
    )
    .await;
    let (_, body) = send(&app, test::TestRequest::get().uri("/api/addressbook")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    send(
        &app,
        test::TestRequest::delete().uri("/api/addressbook/delete/1"),
    )
    .await;
    let (status, body) = send(&app, test::TestRequest::get().uri("/api/addressbook")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn invalid_contact_lists_every_violation() {
    let app = app!();

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/addressbook/add")
            .set_json(json!({"name": "Ada", "phoneNumber": "555-0100", "email": "ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed.");
    assert_eq!(
        body["data"],
        json!([
            "Phone number must be exactly 10 digits.",
            "Email must be a valid email address.",
            "Address is required."
        ])
    );

    let (_, body) = send(&app, test::TestRequest::get().uri("/api/addressbook")).await;
    assert_eq!(body["data"], json!([]));
}

#[rstest]
#[case("/api/addressbook/get/abc", StatusCode::BAD_REQUEST)]
#[case("/api/addressbook/get/0", StatusCode::NOT_FOUND)]
#[case("/api/addressbook/get/-4", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn malformed_and_non_positive_ids(#[case] uri: &str, #[case] expected: StatusCode) {
    let app = app!();

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, expected);
    assert_eq!(body["success"], false);
}

#[rstest]
#[actix_web::test]
async fn responses_carry_trace_id_header() {
    let app = app!();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/addressbook/get/77")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("trace-id"));
}
