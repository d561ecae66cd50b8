//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod contacts;
pub mod envelope;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the API routes and the extractor error handlers.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use addressbook::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::FormConfig::default().error_handler(error::form_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope(contacts::CONTACTS_SCOPE)
                .service(contacts::list_contacts)
                .service(contacts::get_contact)
                .service(contacts::add_contact)
                .service(contacts::update_contact)
                .service(contacts::delete_contact),
        )
        .service(
            web::scope(auth::AUTH_SCOPE)
                .service(auth::register)
                .service(auth::login)
                .service(auth::forgot_password)
                .service(auth::reset_password)
                .service(auth::reset_password_page)
                .service(auth::reset_password_form),
        );
}
