//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, resolution inputs)
//!     → middleware/locale.rs (Continue or Redirect)
//!     → response.rs (redirect / forwarded response)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{LocaleState, PathLocale};
pub use request::{MakeRequestUuid, RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;
