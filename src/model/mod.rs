pub mod types;
pub mod user;
pub mod utils;

pub use types::*;
pub use user::*;
pub use utils::*;
