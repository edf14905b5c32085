pub mod string_utils;
pub mod time_utils;

pub use string_utils::*;
pub use time_utils::*;
