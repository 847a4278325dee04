//! Services backing the dashboard

mod connection;

pub use connection::{connect, Connection, DesktopError};
