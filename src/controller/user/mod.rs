pub mod http_handlers;
pub mod validation;

pub use http_handlers::{
    add_favorite, admin_users, get_notifications, list_favorites, login, logout, register,
    me, remove_favorite, update_notifications,
};
