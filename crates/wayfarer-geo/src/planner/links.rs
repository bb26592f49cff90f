//! Booking deeplinks.

use chrono::{Datelike, NaiveDate};

const FLIGHTS_BASE: &str = "https://www.google.com/travel/flights";
const HOTELS_BASE: &str = "https://www.booking.com/searchresults.html";

/// Google Flights search for flights to `destination`.
pub fn flights_link(destination: &str, depart: NaiveDate, ret: NaiveDate) -> String {
    format!(
        "{FLIGHTS_BASE}?q=Flights%20to%20{}%20on%20{depart}%20return%20{ret}",
        destination.replace(' ', "%20")
    )
}

/// Booking.com search for `city` between check-in and check-out.
pub fn hotels_link(city: &str, checkin: NaiveDate, checkout: NaiveDate) -> String {
    format!(
        "{HOTELS_BASE}?ss={}\
         &checkin_year={}&checkin_month={}&checkin_monthday={}\
         &checkout_year={}&checkout_month={}&checkout_monthday={}",
        city.replace(' ', "+"),
        checkin.year(),
        checkin.month(),
        checkin.day(),
        checkout.year(),
        checkout.month(),
        checkout.day()
    )
}
