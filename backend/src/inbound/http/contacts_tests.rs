//! Handler tests for the address book endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::inbound::http::configure;
use crate::inbound::http::test_utils::MockPorts;

#[fixture]
fn payload() -> ContactPayload {
    ContactPayload {
        id: 1,
        name: "Ada Lovelace".to_owned(),
        phone_number: "5550100100".to_owned(),
        email: "ada@example.com".to_owned(),
        address: "London".to_owned(),
    }
}

async fn call(ports: MockPorts, req: test::TestRequest) -> (StatusCode, Option<String>, Value) {
    let app = test::init_service(
        App::new()
            .app_data(ports.into_state())
            .configure(configure),
    )
    .await;
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    let body: Value = test::read_body_json(res).await;
    (status, location, body)
}

#[rstest]
#[actix_web::test]
async fn list_wraps_contacts_in_envelope(payload: ContactPayload) {
    let mut ports = MockPorts::default();
    ports
        .contacts_query
        .expect_list_contacts()
        .times(1)
        .return_once(move || Ok(vec![payload]));

    let (status, _, body) = call(ports, test::TestRequest::get().uri("/api/addressbook")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contacts retrieved successfully.");
    assert_eq!(body["data"][0]["phoneNumber"], "5550100100");
}

#[rstest]
#[actix_web::test]
async fn get_unknown_contact_is_404_envelope() {
    let mut ports = MockPorts::default();
    ports
        .contacts_query
        .expect_get_contact()
        .withf(|id| id.get() == 9)
        .times(1)
        .return_once(|_| Err(contact_not_found(9)));

    let (status, _, body) =
        call(ports, test::TestRequest::get().uri("/api/addressbook/get/9")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "message": "Contact with ID 9 not found.", "data": null})
    );
}

#[rstest]
#[case("/api/addressbook/get/0")]
#[case("/api/addressbook/get/-4")]
#[actix_web::test]
async fn non_positive_ids_are_not_found_without_lookup(#[case] uri: &str) {
    let mut ports = MockPorts::default();
    ports.contacts_query.expect_get_contact().times(0);

    let (status, _, _) = call(ports, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let (status, _, body) = call(
        MockPorts::default(),
        test::TestRequest::get().uri("/api/addressbook/get/abc"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[rstest]
#[actix_web::test]
async fn add_returns_created_with_location(payload: ContactPayload) {
    let mut ports = MockPorts::default();
    ports
        .contacts
        .expect_add_contact()
        .withf(|input| input.phone_number == "5550100100" && input.name == "Ada Lovelace")
        .times(1)
        .return_once(move |_| Ok(payload));

    let req = test::TestRequest::post()
        .uri("/api/addressbook/add")
        .set_json(json!({
            "name": "Ada Lovelace",
            "phone": "5550100100",
            "email": "ada@example.com",
            "address": "London"
        }));
    let (status, location, body) = call(ports, req).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/api/addressbook/get/1"));
    assert_eq!(body["message"], "Contact added successfully.");
    assert_eq!(body["data"]["id"], 1);
}

#[rstest]
#[actix_web::test]
async fn add_validation_failure_lists_messages() {
    let mut ports = MockPorts::default();
    ports.contacts.expect_add_contact().times(1).return_once(|input| {
        let errors = ContactDraft::validate(&input).expect_err("empty body is invalid");
        Err(validation_failed(&errors))
    });

    let req = test::TestRequest::post()
        .uri("/api/addressbook/add")
        .set_json(json!({"name": null}));
    let (status, _, body) = call(ports, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed.");
    assert_eq!(
        body["data"],
        json!([
            "Name is required.",
            "Phone number is required.",
            "Email is required.",
            "Address is required."
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let mut ports = MockPorts::default();
    ports.contacts.expect_add_contact().times(0);

    let req = test::TestRequest::post()
        .uri("/api/addressbook/add")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\":");
    let (status, _, body) = call(ports, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[rstest]
#[actix_web::test]
async fn update_with_non_positive_id_still_validates_first() {
    let mut ports = MockPorts::default();
    ports.contacts.expect_update_contact().times(0);

    let req = test::TestRequest::put()
        .uri("/api/addressbook/update/0")
        .set_json(json!({}));
    let (status, _, body) = call(ports, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed.");
}

#[rstest]
#[actix_web::test]
async fn update_returns_replaced_contact(mut payload: ContactPayload) {
    payload.address = "Ockham Park".to_owned();
    let mut ports = MockPorts::default();
    ports
        .contacts
        .expect_update_contact()
        .withf(|id, input| id.get() == 1 && input.address == "Ockham Park")
        .times(1)
        .return_once(move |_, _| Ok(payload));

    let req = test::TestRequest::put()
        .uri("/api/addressbook/update/1")
        .set_json(json!({
            "name": "Ada Lovelace",
            "phoneNumber": "5550100100",
            "email": "ada@example.com",
            "address": "Ockham Park"
        }));
    let (status, _, body) = call(ports, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact updated successfully.");
    assert_eq!(body["data"]["address"], "Ockham Park");
}

#[rstest]
#[case(Ok(()), StatusCode::OK, "Contact deleted successfully.")]
#[case(Err(contact_not_found(1)), StatusCode::NOT_FOUND, "Contact with ID 1 not found.")]
#[actix_web::test]
async fn delete_reports_outcome(
    #[case] outcome: Result<(), Error>,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let mut ports = MockPorts::default();
    ports
        .contacts
        .expect_delete_contact()
        .times(1)
        .return_once(move |_| outcome);

    let (status, _, body) = call(
        ports,
        test::TestRequest::delete().uri("/api/addressbook/delete/1"),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(body["message"], expected_message);
    if status == StatusCode::OK {
        assert_eq!(body["data"], "Deleted");
    }
}

#[rstest]
#[actix_web::test]
async fn service_unavailable_passes_through() {
    let mut ports = MockPorts::default();
    ports
        .contacts_query
        .expect_list_contacts()
        .times(1)
        .return_once(|| Err(Error::service_unavailable("contact repository unavailable")));

    let (status, _, body) = call(ports, test::TestRequest::get().uri("/api/addressbook")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}
