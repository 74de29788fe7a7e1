pub mod chart;
pub mod config;
pub mod daily;
pub mod error;
pub mod io;
pub mod model;
pub mod partition;
pub mod personal_record;
pub mod source;
pub mod volume;

pub use error::{Result, ToolError};
