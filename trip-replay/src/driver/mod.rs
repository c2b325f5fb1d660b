//! Route selection flow.
//!
//! A [`DriverSession`] resolves routes through a [`RouteSource`], draws the
//! selected one and starts or cancels its replay.

mod session;
mod source;

pub use session::DriverSession;
pub use source::RouteSource;
