//! Availability lookup.
//!
//! There is no calendar read integration yet. [`StaticAvailability`]
//! is a placeholder that always offers the same two slots regardless of
//! the request, so callers can exercise the `/availability` contract.

use chrono::{DateTime, TimeZone, Utc};

use super::models::{AvailabilityRequest, AvailabilitySlot};

pub trait AvailabilitySource: Send + Sync {
    fn slots(&self, request: &AvailabilityRequest) -> Vec<AvailabilitySlot>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticAvailability;

fn at(hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2026, 2, 19, hour, minute, 0).single()
}

impl AvailabilitySource for StaticAvailability {
    fn slots(&self, request: &AvailabilityRequest) -> Vec<AvailabilitySlot> {
        tracing::debug!(
            "Serving placeholder availability for {:?} on {:?}",
            request.name,
            request.date
        );

        [((18, 0), (18, 30)), ((19, 0), (19, 30))]
            .into_iter()
            .filter_map(|((sh, sm), (eh, em))| {
                Some(AvailabilitySlot {
                    start: at(sh, sm)?,
                    end: at(eh, em)?,
                })
            })
            .collect()
    }
}
