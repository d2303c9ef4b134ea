pub mod global_config;
pub mod pool;
pub mod user_position;

pub use global_config::*;
pub use pool::*;
pub use user_position::*;
