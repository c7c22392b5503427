//! Booking curves shared by the model tests.
//!
//! Two Monday departures reach 100 and 120 bookings; the validation flight
//! (also a Monday) is read 7 days out at 80 and closes at 110.

use airline_forecast_core::{BookingObservation, Dataset, ResolvedObservation};
use airline_forecast_data::FinalDemandResolver;
use chrono::NaiveDate;

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, month, day).unwrap()
}

pub fn obs(departure: (u32, u32), booking: (u32, u32), cum: u32) -> BookingObservation {
    BookingObservation::new(date(departure.0, departure.1), date(booking.0, booking.1), cum)
}

pub fn training_observations() -> Vec<BookingObservation> {
    vec![
        obs((3, 6), (2, 20), 40),
        obs((3, 6), (2, 27), 70),
        obs((3, 6), (3, 6), 100),
        obs((3, 13), (2, 27), 50),
        obs((3, 13), (3, 6), 80),
        obs((3, 13), (3, 13), 120),
    ]
}

pub fn validation_observations() -> Vec<BookingObservation> {
    vec![
        obs((3, 20), (3, 13), 80).with_naive_forecast(90.0),
        obs((3, 20), (3, 20), 110).with_naive_forecast(110.0),
    ]
}

pub fn training() -> Vec<ResolvedObservation> {
    FinalDemandResolver::resolve(Dataset::Training, &training_observations())
}

pub fn validation() -> Vec<ResolvedObservation> {
    FinalDemandResolver::resolve(Dataset::Validation, &validation_observations())
}
