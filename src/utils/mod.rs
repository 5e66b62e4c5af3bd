pub mod aggregator;
pub mod report;
pub mod time_format;
