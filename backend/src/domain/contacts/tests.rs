//! Contact validation rules.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_input() -> ContactInput {
    ContactInput {
        name: "Grace Hopper".to_owned(),
        phone_number: "5551234567".to_owned(),
        email: "grace@navy.example.com".to_owned(),
        address: "1 Compiler Way, Arlington".to_owned(),
    }
}

#[rstest]
fn valid_input_produces_trimmed_draft(mut valid_input: ContactInput) {
    valid_input.name = "  Grace Hopper ".to_owned();
    let draft = ContactDraft::validate(&valid_input).expect("valid input");

    assert_eq!(draft.name(), "Grace Hopper");
    assert_eq!(draft.phone_number(), "5551234567");
    assert_eq!(draft.email(), "grace@navy.example.com");
    assert_eq!(draft.address(), "1 Compiler Way, Arlington");
}

#[rstest]
fn blank_input_reports_every_required_field() {
    let errors = ContactDraft::validate(&ContactInput::default()).expect_err("blank input");

    assert_eq!(
        errors.messages(),
        vec![
            "Name is required.",
            "Phone number is required.",
            "Email is required.",
            "Address is required.",
        ]
    );
}

#[rstest]
#[case("555123456")]
#[case("55512345678")]
#[case("555-123-456")]
#[case("555123456a")]
#[case("５５５１２３４５６７")]
fn phone_must_be_ten_ascii_digits(mut valid_input: ContactInput, #[case] phone: &str) {
    valid_input.phone_number = phone.to_owned();
    let errors = ContactDraft::validate(&valid_input).expect_err("bad phone");
    assert_eq!(errors.errors(), &[ContactFieldError::PhoneInvalid]);
}

#[rstest]
#[case("plainaddress")]
#[case("missing-at.example.com")]
#[case("user@nodot")]
#[case("user@@example.com")]
#[case("user name@example.com")]
#[case("user@example.")]
fn email_must_look_like_local_at_domain_tld(mut valid_input: ContactInput, #[case] email: &str) {
    valid_input.email = email.to_owned();
    let errors = ContactDraft::validate(&valid_input).expect_err("bad email");
    assert_eq!(errors.errors(), &[ContactFieldError::EmailInvalid]);
}

#[rstest]
#[case(EMAIL_MAX, None)]
#[case(EMAIL_MAX + 1, Some(vec![ContactFieldError::EmailTooLong]))]
fn email_length_boundary(
    mut valid_input: ContactInput,
    #[case] len: usize,
    #[case] expected: Option<Vec<ContactFieldError>>,
) {
    let domain = "@example.com";
    valid_input.email = format!("{}{domain}", "a".repeat(len - domain.len()));
    let result = ContactDraft::validate(&valid_input);
    assert_eq!(result.err().map(|errors| errors.errors().to_vec()), expected);
}

#[rstest]
#[case(NAME_MAX, true)]
#[case(NAME_MAX + 1, false)]
fn name_length_boundary(mut valid_input: ContactInput, #[case] len: usize, #[case] ok: bool) {
    valid_input.name = "é".repeat(len);
    assert_eq!(ContactDraft::validate(&valid_input).is_ok(), ok);
}

#[rstest]
#[case(ADDRESS_MAX, true)]
#[case(ADDRESS_MAX + 1, false)]
fn address_length_boundary(mut valid_input: ContactInput, #[case] len: usize, #[case] ok: bool) {
    valid_input.address = "a".repeat(len);
    assert_eq!(ContactDraft::validate(&valid_input).is_ok(), ok);
}

#[rstest]
fn multiple_failures_are_collected_in_field_order(mut valid_input: ContactInput) {
    valid_input.name = "x".repeat(NAME_MAX + 1);
    valid_input.phone_number = "123".to_owned();
    valid_input.address = "y".repeat(ADDRESS_MAX + 1);

    let errors = ContactDraft::validate(&valid_input).expect_err("three failures");

    assert_eq!(
        errors.messages(),
        vec![
            "Name must not exceed 100 characters.",
            "Phone number must be exactly 10 digits.",
            "Address must not exceed 250 characters.",
        ]
    );
}

#[rstest]
#[case(0)]
#[case(-4)]
fn contact_id_rejects_non_positive(#[case] raw: i64) {
    assert_eq!(ContactId::new(raw), Err(InvalidContactId(raw)));
}

#[rstest]
fn contact_id_deserialises_from_number() {
    let id: ContactId = serde_json::from_str("42").expect("positive id");
    assert_eq!(id.get(), 42);
    assert!(serde_json::from_str::<ContactId>("0").is_err());
}
