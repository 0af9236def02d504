pub mod admin;
pub mod enter;
pub mod fulfill;
pub mod upkeep;

pub use admin::*;
pub use enter::*;
pub use fulfill::*;
pub use upkeep::*;
