//! Data models for booking-curve tables.

pub mod booking;

pub use booking::{required_columns, BookingRecord};
