pub mod api_client;
pub mod api_utils;
pub mod charts;
pub mod class_names;
pub mod components;
pub mod config;
pub mod data_table;
pub mod date_utils;
pub mod format;
pub mod icons;
pub mod modal;
pub mod request_guard;
pub mod wizard;
