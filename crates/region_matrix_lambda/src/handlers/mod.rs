pub mod aggregate;
pub mod log_items;
