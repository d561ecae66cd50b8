//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{BuiltState, build_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio::task::JoinHandle;

use addressbook::Trace;
use addressbook::inbound::http::configure;
use addressbook::inbound::http::health::{HealthState, live, ready};
use addressbook::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live)
}

/// Running HTTP server and the notification worker it feeds.
pub struct RunningServer {
    /// Listener future; must be awaited to serve requests.
    pub server: Server,
    /// Background task draining queued notifications into the broker.
    pub notification_worker: JoinHandle<()>,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying settings and optional pools.
///
/// # Errors
/// Propagates [`std::io::Error`] when the signing secret is unusable or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<RunningServer> {
    let server_health_state = health_state.clone();
    let BuiltState {
        http_state,
        notification_worker,
    } = build_http_state(&config)?;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(RunningServer {
        server,
        notification_worker,
    })
}
