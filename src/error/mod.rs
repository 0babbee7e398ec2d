mod app_error;
mod database_converter;
pub mod messages;

pub use app_error::{AppError, AppResult};
pub use database_converter::DatabaseErrorConverter;
