//! Background work around the HTTP server.
//!
//! ARCHITECTURE
//! ============
//! Nothing here sits on the request path. The updater keeps the content
//! checkout current; the browser launcher runs once at startup. Both are
//! best-effort: failures are logged and the server keeps serving.

pub mod browser;
pub mod updater;
