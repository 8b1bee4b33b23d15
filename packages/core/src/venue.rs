//! Venue row type and the CSV column schema it is loaded from.

use serde::Serialize;

/// Input columns every venue CSV header must name, in canonical order.
///
/// `id` is not listed: it is assigned at load time.
pub const COLUMNS: [&str; 18] = [
    "name",
    "lat",
    "lng",
    "type",
    "address",
    "description",
    "phone",
    "website",
    "mon",
    "tue",
    "wed",
    "thu",
    "fri",
    "sat",
    "sun",
    "payment",
    "price",
    "info_website",
];

/// Weekday "open" flag columns, Monday first.
pub const WEEKDAY_COLUMNS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// One directory entry.
///
/// Serialises to a flat JSON object whose keys are the source column names,
/// with `id` first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub address: String,
    pub description: String,
    pub phone: String,
    pub website: String,
    pub mon: i64,
    pub tue: i64,
    pub wed: i64,
    pub thu: i64,
    pub fri: i64,
    pub sat: i64,
    pub sun: i64,
    pub payment: i64,
    pub price: f64,
    pub info_website: String,
}
