pub mod batch;
pub mod cell_summary;
pub mod observation;
pub mod season;
