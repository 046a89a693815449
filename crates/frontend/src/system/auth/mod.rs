pub mod api;
pub mod context;
pub mod lifecycle;
pub mod session;
pub mod storage;
