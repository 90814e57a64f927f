pub mod member;
pub mod payment;
pub mod ticket;
