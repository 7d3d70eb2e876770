pub mod api;
pub mod config;
pub mod consts;
pub mod stats;

pub use shared::{ErrorKind, ServiceError, UserInfo};
