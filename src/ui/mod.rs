pub mod metrics;
pub mod panels;
pub mod plot;
pub mod table;
