//! Address book API handlers.
//!
//! ```text
//! GET    /api/addressbook
//! GET    /api/addressbook/get/{id}
//! POST   /api/addressbook/add        {"name":"Ada","phoneNumber":"5550100100",...}
//! PUT    /api/addressbook/update/{id}
//! DELETE /api/addressbook/delete/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ContactPayload;
use crate::domain::{
    ContactDraft, ContactId, ContactInput, Error, contact_not_found, validation_failed,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::state::HttpState;

/// Path under which the contact routes are mounted.
pub const CONTACTS_SCOPE: &str = "/api/addressbook";

/// Contact body for add and update.
///
/// Missing or `null` fields are treated as empty so that validation can
/// report every problem at once. `phone` is accepted as an alias of
/// `phoneNumber`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
    /// Display name, at most [`NAME_MAX`](crate::domain::contacts::NAME_MAX) characters.
    pub name: Option<String>,
    /// Exactly [`PHONE_DIGITS`](crate::domain::contacts::PHONE_DIGITS) ASCII digits.
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
    /// Address in `local@domain.tld` form, at most
    /// [`EMAIL_MAX`](crate::domain::contacts::EMAIL_MAX) characters.
    pub email: Option<String>,
    /// Postal address, at most [`ADDRESS_MAX`](crate::domain::contacts::ADDRESS_MAX) characters.
    pub address: Option<String>,
}

impl From<ContactRequest> for ContactInput {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            phone_number: value.phone_number.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            address: value.address.unwrap_or_default(),
        }
    }
}

/// Non-positive identifiers can never match a stored contact.
fn contact_id(raw: i64) -> Result<ContactId, Error> {
    ContactId::new(raw).map_err(|_| contact_not_found(raw))
}

/// List every contact.
#[get("")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ApiResponse<Vec<ContactPayload>>>> {
    let contacts = state.contacts_query.list_contacts().await?;
    Ok(web::Json(ApiResponse::ok(
        "Contacts retrieved successfully.",
        contacts,
    )))
}

/// Fetch one contact.
#[get("/get/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ApiResponse<ContactPayload>>> {
    let id = contact_id(path.into_inner())?;
    let contact = state.contacts_query.get_contact(id).await?;
    Ok(web::Json(ApiResponse::ok(
        "Contact retrieved successfully.",
        contact,
    )))
}

/// Validate and add a contact; answers `201 Created` with a `Location`.
#[post("/add")]
pub async fn add_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .contacts
        .add_contact(ContactInput::from(payload.into_inner()))
        .await?;
    let location = format!("{CONTACTS_SCOPE}/get/{}", created.id);
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::ok("Contact added successfully.", created)))
}

/// Validate and replace a contact.
#[put("/update/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<web::Json<ApiResponse<ContactPayload>>> {
    let input = ContactInput::from(payload.into_inner());
    let raw = path.into_inner();
    let Ok(id) = ContactId::new(raw) else {
        ContactDraft::validate(&input).map_err(|errors| validation_failed(&errors))?;
        return Err(contact_not_found(raw));
    };
    let updated = state.contacts.update_contact(id, input).await?;
    Ok(web::Json(ApiResponse::ok(
        "Contact updated successfully.",
        updated,
    )))
}

/// Remove a contact.
#[delete("/delete/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ApiResponse<&'static str>>> {
    let id = contact_id(path.into_inner())?;
    state.contacts.delete_contact(id).await?;
    Ok(web::Json(ApiResponse::ok(
        "Contact deleted successfully.",
        "Deleted",
    )))
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
