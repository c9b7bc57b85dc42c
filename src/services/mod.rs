pub mod booking_flow;
pub mod calendar;
pub mod store;
