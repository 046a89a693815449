pub mod a001_product;
pub mod a002_test_group;
pub mod a003_price_test;
pub mod common;
