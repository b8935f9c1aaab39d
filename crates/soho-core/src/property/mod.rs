//! Hotel property data and promotion handling.

mod model;
pub mod promotion;

pub use model::{Policies, Promotion, PropertyInfo, Restaurant, Room};
pub use promotion::{PromotionReply, PromotionStatus, find_match, next_available};
