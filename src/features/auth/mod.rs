mod validator;

pub mod guards;
pub mod model;
pub mod password;
pub mod services;

pub use validator::JwtValidator;
