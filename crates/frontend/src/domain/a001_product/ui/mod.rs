pub mod columns;
pub mod list;
