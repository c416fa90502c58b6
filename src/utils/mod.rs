pub mod env;
pub mod path;
