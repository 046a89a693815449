pub mod api;
pub mod sample;
pub mod ui;
pub mod view_model;
