pub mod errors;
pub mod html;
pub mod json;
pub mod xlsx;

pub use crate::errors::ResultResp;
pub use errors::html_error_response;

// Normal HTML response
pub use html::{html_response, see_other};
pub use json::json_response;
pub use xlsx::xlsx_response;
