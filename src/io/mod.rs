/// CSV export of the combined hourly series.
pub mod export;
