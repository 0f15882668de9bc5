pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{SESSION_COOKIE, current_user, require_admin, require_user, session_cookie};
