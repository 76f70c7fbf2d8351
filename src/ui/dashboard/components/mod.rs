//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod campaign_list;
pub mod footer;
pub mod header;
pub mod home;
pub mod logs;
pub mod metrics;
pub mod overlay;
