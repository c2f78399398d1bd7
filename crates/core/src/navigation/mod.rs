//! Page navigation stack.
//!
//! The module is split into:
//! - [`stack`]: the [`NavigationStack`] controller (push, pop, pop-to-root,
//!   back-button dispatch, stack editing)
//! - [`shared`]: a thread-safe handle serializing calls into one stack
//! - [`event`] and [`observable`]: the notifications the stack raises
//! - [`page`]: the capability pages must provide

pub mod error;
pub mod event;
pub mod observable;
pub mod page;
pub mod shared;
pub mod stack;

pub use self::error::NavigationError;
pub use self::event::{EventHub, Hub, NavigationEvent, Property, PropertyValue};
pub use self::observable::Observable;
pub use self::page::{same_page, ContentPage, Page, PageRef};
pub use self::shared::SharedNavigation;
pub use self::stack::NavigationStack;
