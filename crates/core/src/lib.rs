//! Observable page navigation stack.
//!
//! See [`navigation::NavigationStack`] for the controller and
//! [`navigation::SharedNavigation`] for a thread-safe handle to it.

pub mod color;
pub mod helpers;
pub mod logging;
pub mod navigation;
pub mod settings;
