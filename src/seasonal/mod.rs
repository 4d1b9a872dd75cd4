pub mod builder;
pub mod completeness;
pub mod error;
pub mod store;
