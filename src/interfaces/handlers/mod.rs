pub mod assets;
pub mod auth;
pub mod json_error;
pub mod products;
pub mod system;
