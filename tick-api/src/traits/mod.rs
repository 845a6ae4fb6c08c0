pub mod quote_store;
pub mod swap_store;
