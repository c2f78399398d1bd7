//! Events raised by the navigation stack and the hub that delivers them.
//!
//! Listeners subscribe to an [`EventHub`] and receive every event on their own
//! `mpsc` channel, in emission order. A subscriber that drops its receiver is
//! forgotten on the next publish.
//!
//! ```
//! use pagestack_core::navigation::{ContentPage, NavigationEvent, NavigationStack};
//!
//! let mut nav = NavigationStack::with_root(ContentPage::new("Root").into_ref());
//! let events = nav.subscribe();
//!
//! nav.push(ContentPage::new("Details").into_ref());
//!
//! let pushed = events
//!     .try_iter()
//!     .find(|evt| matches!(evt, NavigationEvent::Pushed(_)));
//! assert!(pushed.is_some());
//! ```

use super::page::PageRef;
use crate::color::Color;
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

pub type Hub = Sender<NavigationEvent>;

/// Observable attributes of a navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    CurrentPage,
    Tint,
    BarBackgroundColor,
    BarTextColor,
    Title,
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Property::CurrentPage => "CurrentPage",
            Property::Tint => "Tint",
            Property::BarBackgroundColor => "BarBackgroundColor",
            Property::BarTextColor => "BarTextColor",
            Property::Title => "Title",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Snapshot of a property value carried by change notifications.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    Page(Option<PageRef>),
    Color(Color),
    Text(Option<String>),
}

impl From<Option<PageRef>> for PropertyValue {
    fn from(page: Option<PageRef>) -> Self {
        PropertyValue::Page(page)
    }
}

impl From<Color> for PropertyValue {
    fn from(color: Color) -> Self {
        PropertyValue::Color(color)
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(text: Option<String>) -> Self {
        PropertyValue::Text(text)
    }
}

#[derive(Debug, Clone)]
pub enum NavigationEvent {
    /// A page was pushed and is now the current page.
    Pushed(PageRef),
    /// A page was popped off the top of the stack.
    Popped(PageRef),
    /// Every page above the root was removed in one step.
    PoppedToRoot {
        root: PageRef,
        /// Removed pages, former top first.
        popped: Vec<PageRef>,
    },
    /// A page was inserted below `before`.
    PageInserted { page: PageRef, before: PageRef },
    /// A page that was not the current page was removed.
    PageRemoved(PageRef),
    /// Fired before a property is mutated; `value` is the old value.
    PropertyChanging {
        property: Property,
        value: PropertyValue,
    },
    /// Fired after a property was mutated; `value` is the new value.
    PropertyChanged {
        property: Property,
        value: PropertyValue,
    },
}

impl NavigationEvent {
    /// The property this event notifies about, if it is a property notification.
    pub fn property(&self) -> Option<Property> {
        match self {
            NavigationEvent::PropertyChanging { property, .. }
            | NavigationEvent::PropertyChanged { property, .. } => Some(*property),
            _ => None,
        }
    }
}

/// Fan-out of [`NavigationEvent`]s to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: Vec<Hub>,
}

impl EventHub {
    pub fn new() -> EventHub {
        EventHub::default()
    }

    /// Registers a new subscriber.
    ///
    /// # Returns
    ///
    /// The receiving end of a fresh channel. It sees every event published
    /// after this call; dropping it unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<NavigationEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Registers an existing sender, e.g. one shared by several stacks.
    pub fn attach(&mut self, hub: Hub) {
        self.subscribers.push(hub);
    }

    /// Number of subscribers still registered. Disconnected ones are only
    /// dropped on the next [`publish`](Self::publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `evt` to every live subscriber, in registration order.
    ///
    /// Subscribers whose receiver was dropped are removed. Publishing never
    /// fails and never blocks.
    ///
    /// # Arguments
    ///
    /// * `evt` - The event to deliver; cloned for all but the last subscriber
    pub fn publish(&mut self, evt: NavigationEvent) {
        tracing::trace!(event = ?evt, subscribers = self.subscribers.len(), "publishing");

        let Some((last, rest)) = self.subscribers.split_last() else {
            return;
        };

        let mut alive = Vec::with_capacity(self.subscribers.len());
        for hub in rest {
            alive.push(hub.send(evt.clone()).is_ok());
        }
        alive.push(last.send(evt).is_ok());

        let mut flags = alive.into_iter();
        self.subscribers.retain(|_| flags.next().unwrap_or(false));
    }
}
