mod error;
mod live;
mod observer;
mod resolver;
mod types;

pub use live::LiveTrackingClient;
pub use observer::{Observer, StaticLocator};
pub use resolver::PositionResolver;
pub use types::{PositionSource, ResolverState, ResolverStatus, TrackedPosition};
