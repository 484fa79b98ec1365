//! ISO 4217 numeric currency codes accepted by the gateway.

/// Russian ruble.
pub const RUB: u16 = 643;
/// United States dollar.
pub const USD: u16 = 840;
/// Euro.
pub const EUR: u16 = 978;
/// Belarusian ruble.
pub const BYN: u16 = 933;
/// Kazakhstani tenge.
pub const KZT: u16 = 398;
/// Ukrainian hryvnia.
pub const UAH: u16 = 980;
