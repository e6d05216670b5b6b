pub mod user_handler;

pub use user_handler::{
    __path_create_user, __path_get_me, __path_login, __path_refresh_token, create_user, get_me,
    login, refresh_token,
};
