pub mod context;
pub mod demo_handler;
pub mod health_handler;
pub mod wrap;

pub use context::HttpContext;
pub use demo_handler::{greet, search, whoami};
pub use health_handler::health_check;
pub use wrap::{HandlerWrapper, WrappedFuture, DEFAULT_BODY_LIMIT};
