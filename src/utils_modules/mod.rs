pub mod calculate_utils;
pub mod io_utils;
pub mod json_utils;
pub mod logger_utils;
