pub mod bootstrap;
pub mod postgres;
