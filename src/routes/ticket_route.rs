use crate::models::ticket::{BookingReportRow, MessageResponse, Ticket, TicketInput, TicketMessageResponse};
use crate::services::ticket_service::TicketService;
use crate::utils::error::AppError;
use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use rocket::State;
use rocket_okapi::openapi;

/// List every ticket with its member and payment
#[openapi(tag = "Tickets")]
#[get("/tickets")]
pub async fn list_tickets(
    ticket_service: &State<TicketService>,
) -> Result<Json<Vec<Ticket>>, AppError> {
    let tickets = ticket_service.list_tickets().await?;
    Ok(Json(tickets))
}

/// Booking history of a member
#[openapi(tag = "Tickets")]
#[get("/tickets/member/<id>")]
pub async fn booking_report(
    id: &str,
    ticket_service: &State<TicketService>,
) -> Result<Json<Vec<BookingReportRow>>, AppError> {
    let rows = ticket_service.booking_report(id).await?;
    Ok(Json(rows))
}

#[openapi(tag = "Tickets")]
#[post("/tickets", data = "<payload>")]
pub async fn create_ticket(
    payload: Result<Json<TicketInput>, json::Error<'_>>,
    ticket_service: &State<TicketService>,
) -> Result<Created<Json<TicketMessageResponse>>, AppError> {
    let input = payload.map_err(|e| AppError::BadRequest(e.to_string()))?;
    let ticket = ticket_service.create_ticket(input.into_inner()).await?;

    Ok(Created::new(format!("/api/tickets/{}", ticket.id)).body(Json(TicketMessageResponse {
        message: "Ticket created".to_string(),
        data: ticket,
    })))
}

#[openapi(tag = "Tickets")]
#[put("/tickets/<id>", data = "<payload>")]
pub async fn update_ticket(
    id: &str,
    payload: Result<Json<TicketInput>, json::Error<'_>>,
    ticket_service: &State<TicketService>,
) -> Result<Json<TicketMessageResponse>, AppError> {
    let input = match payload {
        Ok(input) => input.into_inner(),
        Err(e) => {
            // a missing ticket is reported before a malformed body
            ticket_service.find_ticket(id).await?;
            return Err(AppError::BadRequest(e.to_string()));
        }
    };

    let ticket = ticket_service.update_ticket(id, input).await?;
    Ok(Json(TicketMessageResponse {
        message: "Ticket updated".to_string(),
        data: ticket,
    }))
}

#[openapi(tag = "Tickets")]
#[delete("/tickets/<id>")]
pub async fn delete_ticket(
    id: &str,
    ticket_service: &State<TicketService>,
) -> Result<Json<MessageResponse>, AppError> {
    ticket_service.delete_ticket(id).await?;
    Ok(Json(MessageResponse {
        message: "Ticket deleted".to_string(),
    }))
}
