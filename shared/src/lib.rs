mod credential;
mod error;
mod timeperiod;
mod user;

pub mod github;

pub use credential::*;
pub use error::*;
pub use timeperiod::*;
pub use user::*;
