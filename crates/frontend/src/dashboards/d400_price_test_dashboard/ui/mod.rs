pub mod asin_table;
pub mod dashboard;

pub use dashboard::PriceTestDashboard;
