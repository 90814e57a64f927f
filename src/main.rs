#[macro_use]
extern crate rocket;

use cinema_ticket_service::build_rocket;
use cinema_ticket_service::config::AppConfig;
use cinema_ticket_service::db::Database;
use cinema_ticket_service::services::ticket_service::TicketService;

#[launch]
async fn rocket() -> _ {
    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to the database
    let db = Database::new(&config)
        .await
        .expect("Failed to connect to database");

    if config.run_migrations {
        db.run_migrations()
            .await
            .expect("Failed to run database migrations");
    }

    let ticket_service = TicketService::new(db.get_pool().clone());

    build_rocket(ticket_service)
}
