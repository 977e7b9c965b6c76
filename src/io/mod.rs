/// CSV export of impact reports.
pub mod export;
