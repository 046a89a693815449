pub mod add_dialog;
pub mod details;
pub mod list;
