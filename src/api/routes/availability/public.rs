//! Public types for the availability API
use serde::{Deserialize, Serialize};

pub use crate::booking::AvailabilityRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct Slot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub received: AvailabilityRequest,
    pub available: Vec<Slot>,
}
