pub mod create_dialog;
pub mod list;
