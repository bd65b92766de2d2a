//! Value Object Module

pub mod featured;
pub mod price;
pub mod record_status;
pub mod slug;
