pub mod error;
pub mod spatial;
pub mod top_values;
