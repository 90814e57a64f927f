pub mod catchers;
pub mod ticket_route;
