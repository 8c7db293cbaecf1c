mod error;
mod resilient;
mod transport;

pub use error::{FetchError, TransportError};
pub use resilient::ResilientFetcher;
pub use transport::{FetchOptions, HttpTransport, ReqwestTransport};

#[cfg(test)]
pub use transport::testing;
