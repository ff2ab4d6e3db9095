pub mod countries;
pub mod fetch;
