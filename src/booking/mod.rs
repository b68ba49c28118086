//! Booking requests, their validation and the flow that turns one into
//! a calendar event.

pub mod availability;
pub mod error;
pub mod models;
pub mod service;
pub mod validate;

pub use availability::{AvailabilitySource, StaticAvailability};
pub use error::BookingError;
pub use models::{
    AvailabilityRequest, AvailabilitySlot, BookingRequest, BookingResult, BookingState,
    NormalizedBooking, ValidatedRequest,
};
pub use service::book;
pub use validate::validate;
