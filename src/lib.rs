extern crate chrono;
extern crate rayon;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;

pub mod dataset;
pub mod io;
pub mod lang;
pub mod logging;
pub mod pipeline;
pub mod syntax;
pub mod trees;
pub mod utils;

pub use pipeline::{Pipeline, Processed};
