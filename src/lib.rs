pub mod api;
pub mod booking;
pub mod cli;
pub mod core;
pub mod google;
