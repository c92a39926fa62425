//! URL handling module for Fathom
//!
//! Origin-host extraction is the only URL concern the crawler core has: the
//! host is the throttling key, and a URL whose host cannot be derived is
//! never admitted for download.

mod host;

pub use host::origin_host;
