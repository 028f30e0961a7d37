//! Messaging between gridline and the host design tool.
//!
//! The host is a peer reached through a [`HostPort`]. Commands go out
//! without acknowledgment; the host reports its selection back as a
//! [`HostEvent`]. [`GridSession`] ties the two together to apply grids to
//! the selected frame.

pub mod builder;
pub mod messages;
pub mod port;
pub mod session;

pub use builder::*;
pub use messages::*;
pub use port::*;
pub use session::*;
