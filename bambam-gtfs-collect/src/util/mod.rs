pub mod fs;
pub mod time_source;
