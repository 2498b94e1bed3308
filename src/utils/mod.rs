/// Utility modules for string handling and timestamp rendering
pub mod datetime;
pub mod lines;
pub mod percent;
pub mod string_utils;
pub mod timezone;
