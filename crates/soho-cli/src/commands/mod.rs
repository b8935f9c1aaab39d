pub mod bookings;
pub mod context;
pub mod list;
pub mod logging;
pub mod migrate;
pub mod serve;
pub mod tick;
