//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod serde_date;

pub use aggregate_id::AggregateId;
