#[macro_use]
extern crate rocket;

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};

use crate::services::ticket_service::TicketService;

fn swagger_ui() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/openapi.json".to_string(),
        ..Default::default()
    }
}

/// Assembles the server around an already-connected ticket service.
pub fn build_rocket(ticket_service: TicketService) -> Rocket<Build> {
    rocket::build()
        .manage(ticket_service)
        .mount(
            "/api",
            openapi_get_routes![
                routes::ticket_route::list_tickets,
                routes::ticket_route::booking_report,
                routes::ticket_route::create_ticket,
                routes::ticket_route::update_ticket,
                routes::ticket_route::delete_ticket,
            ],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .register(
            "/",
            catchers![
                routes::catchers::not_found,
                routes::catchers::default,
            ],
        )
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
