pub mod response;
pub mod error;

pub use response::{json_response, ApiResponse, JSON_CONTENT_TYPE, SUCCESS_CODE};
pub use error::{ApiError, AppError, GENERIC_ERROR_CODE};
