pub mod logging;
pub mod session;

pub use logging::logging_middleware;
pub use session::SessionContext;
