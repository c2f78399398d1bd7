//! The navigation stack controller.
//!
//! [`NavigationStack`] keeps an ordered stack of shared pages. The bottom entry
//! is the root, the top entry is the current page.
//!
//! ```txt
//!   top     +-----------+  <- current_page()
//!           | Details   |
//!           +-----------+
//!           | List      |
//!           +-----------+
//!   bottom  | Root      |  <- root_page()
//!           +-----------+
//! ```
//!
//! # No-op rules
//!
//! - Pushing the page that is already on top does nothing.
//! - Popping (or popping to root) a stack with one page does nothing and
//!   returns `None`.
//! - `CurrentPage` notifications fire exactly when the top page changes
//!   identity, once per operation.
//!
//! # Event order
//!
//! Every operation that changes the top page publishes
//! `PropertyChanging(CurrentPage)` with the old top, mutates the stack,
//! publishes `PropertyChanged(CurrentPage)` with the new top and finally the
//! operation event (`Pushed`, `Popped` or `PoppedToRoot`).

use super::error::NavigationError;
use super::event::{EventHub, Hub, NavigationEvent, Property};
use super::observable::Observable;
use super::page::{describe, same_page, PageRef};
use crate::color::Color;
use crate::settings::NavigationSettings;
use std::sync::mpsc::Receiver;

#[derive(Debug)]
pub struct NavigationStack {
    /// Bottom (root) first, top (current) last.
    stack: Vec<PageRef>,
    hub: EventHub,
    tint: Observable<Color>,
    bar_background_color: Observable<Color>,
    bar_text_color: Observable<Color>,
    title: Observable<Option<String>>,
    /// Pop when the current page leaves a back-button press unhandled.
    back_button_pops: bool,
}

impl Default for NavigationStack {
    fn default() -> Self {
        NavigationStack::from_settings(&NavigationSettings::default())
    }
}

impl NavigationStack {
    /// Creates an empty stack. The first pushed page becomes the root.
    pub fn new() -> NavigationStack {
        NavigationStack::default()
    }

    /// Creates a stack holding `root` as its only page.
    pub fn with_root(root: PageRef) -> NavigationStack {
        let mut nav = NavigationStack::new();
        nav.stack.push(root);
        nav
    }

    /// Creates an empty stack with its appearance and back-button behavior
    /// taken from `settings`.
    pub fn from_settings(settings: &NavigationSettings) -> NavigationStack {
        NavigationStack {
            stack: Vec::new(),
            hub: EventHub::new(),
            tint: Observable::new(Property::Tint, settings.tint),
            bar_background_color: Observable::new(
                Property::BarBackgroundColor,
                settings.bar_background_color,
            ),
            bar_text_color: Observable::new(Property::BarTextColor, settings.bar_text_color),
            title: Observable::new(Property::Title, None),
            back_button_pops: settings.back_button_pops,
        }
    }

    /// Subscribes to every event this stack raises from now on.
    pub fn subscribe(&mut self) -> Receiver<NavigationEvent> {
        self.hub.subscribe()
    }

    /// Forwards every event this stack raises to `hub`.
    pub fn attach(&mut self, hub: Hub) {
        self.hub.attach(hub);
    }

    /// Returns the page on top of the stack.
    ///
    /// # Returns
    ///
    /// The current page, or `None` when nothing has been pushed yet.
    pub fn current_page(&self) -> Option<PageRef> {
        self.stack.last().cloned()
    }

    /// Returns the page at the bottom of the stack, `None` when empty.
    pub fn root_page(&self) -> Option<PageRef> {
        self.stack.first().cloned()
    }

    /// Number of pages in the stack, root included.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns an independent copy of the stack, bottom first.
    ///
    /// Popping the copy yields the current page first and the root last.
    pub fn stack_copy(&self) -> Vec<PageRef> {
        self.stack.clone()
    }

    /// Iterates the pages from the root to the current page.
    pub fn pages(&self) -> impl DoubleEndedIterator<Item = &PageRef> + ExactSizeIterator {
        self.stack.iter()
    }

    /// Whether [`pop`](Self::pop) would remove a page.
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Whether this exact page instance is somewhere in the stack.
    pub fn contains(&self, page: &PageRef) -> bool {
        self.position(page).is_some()
    }

    fn position(&self, page: &PageRef) -> Option<usize> {
        self.stack.iter().position(|entry| same_page(entry, page))
    }

    /// Pushes `page` on top of the stack and makes it the current page.
    ///
    /// Pushing the page that is already current is a no-op.
    pub fn push(&mut self, page: PageRef) {
        if let Some(top) = self.stack.last() {
            if same_page(top, &page) {
                tracing::trace!(page = %describe(&page), "page is already current, ignoring push");
                return;
            }
        }

        self.publish_current_changing();
        self.stack.push(page.clone());
        self.publish_current_changed();

        tracing::debug!(
            page = %describe(&page),
            depth = self.stack.len(),
            "pushed page"
        );

        self.hub.publish(NavigationEvent::Pushed(page));
    }

    /// Pops the current page and returns it.
    ///
    /// # Returns
    ///
    /// The removed page, or `None` without touching the stack or publishing
    /// anything when at most the root is left.
    pub fn pop(&mut self) -> Option<PageRef> {
        if self.stack.len() <= 1 {
            tracing::trace!(depth = self.stack.len(), "nothing to pop");
            return None;
        }

        self.publish_current_changing();
        let popped = self.stack.pop()?;
        self.publish_current_changed();

        tracing::debug!(
            page = %describe(&popped),
            depth = self.stack.len(),
            "popped page"
        );

        self.hub.publish(NavigationEvent::Popped(popped.clone()));

        Some(popped)
    }

    /// Removes every page above the root in a single transition.
    pub fn pop_to_root(&mut self) {
        if self.stack.len() <= 1 {
            tracing::trace!(depth = self.stack.len(), "already at root");
            return;
        }

        self.publish_current_changing();
        let popped: Vec<PageRef> = self.stack.drain(1..).rev().collect();
        self.publish_current_changed();

        let Some(root) = self.root_page() else {
            return;
        };

        tracing::debug!(
            root = %describe(&root),
            popped = popped.len(),
            "popped to root"
        );

        self.hub
            .publish(NavigationEvent::PoppedToRoot { root, popped });
    }

    /// Dispatches a back-button press to the current page.
    ///
    /// Only the current page is asked. If it handles the press the stack stays
    /// as it is and `true` is returned. Otherwise the stack navigates back and
    /// reports whether a page was actually popped.
    pub fn send_back_button_pressed(&mut self) -> bool {
        let Some(current) = self.current_page() else {
            tracing::trace!("back button pressed on an empty stack");
            return false;
        };

        if current.on_back_button_pressed() {
            tracing::debug!(page = %describe(&current), "back button handled by page");
            return true;
        }

        if !self.back_button_pops {
            return false;
        }

        self.pop().is_some()
    }

    /// Inserts `page` directly below `before`.
    ///
    /// The current page never changes, even when `before` is the current page.
    ///
    /// # Arguments
    ///
    /// * `page` - Page to insert; must not already be in the stack
    /// * `before` - Page that ends up directly above `page`
    ///
    /// # Errors
    ///
    /// * [`NavigationError::PageAlreadyInStack`] if `page` is already present
    /// * [`NavigationError::PageNotInStack`] if `before` is not in the stack
    pub fn insert_page_before(
        &mut self,
        page: PageRef,
        before: &PageRef,
    ) -> Result<(), NavigationError> {
        if self.contains(&page) {
            return Err(NavigationError::PageAlreadyInStack(describe(&page)));
        }

        let index = self
            .position(before)
            .ok_or_else(|| NavigationError::PageNotInStack(describe(before)))?;

        self.stack.insert(index, page.clone());

        tracing::debug!(
            page = %describe(&page),
            before = %describe(before),
            depth = self.stack.len(),
            "inserted page"
        );

        self.hub.publish(NavigationEvent::PageInserted {
            page,
            before: before.clone(),
        });

        Ok(())
    }

    /// Removes `page` from anywhere in the stack.
    ///
    /// Removing the current page navigates back exactly like [`pop`](Self::pop).
    /// The last remaining page cannot be removed.
    ///
    /// # Errors
    ///
    /// * [`NavigationError::Empty`] if the stack has no pages
    /// * [`NavigationError::PageNotInStack`] if `page` is not in the stack
    /// * [`NavigationError::CannotRemoveRoot`] if `page` is the only page left
    pub fn remove_page(&mut self, page: &PageRef) -> Result<(), NavigationError> {
        if self.stack.is_empty() {
            return Err(NavigationError::Empty);
        }

        let index = self
            .position(page)
            .ok_or_else(|| NavigationError::PageNotInStack(describe(page)))?;

        if index + 1 == self.stack.len() {
            return self
                .pop()
                .map(|_| ())
                .ok_or(NavigationError::CannotRemoveRoot);
        }

        let removed = self.stack.remove(index);

        tracing::debug!(
            page = %describe(&removed),
            depth = self.stack.len(),
            "removed page"
        );

        self.hub.publish(NavigationEvent::PageRemoved(removed));

        Ok(())
    }

    /// Accent color of the navigation bar.
    pub fn tint(&self) -> Color {
        *self.tint.get()
    }

    /// Sets the tint, notifying subscribers when it actually changes.
    ///
    /// # Arguments
    ///
    /// * `color` - The new tint
    ///
    /// # Returns
    ///
    /// `true` if the value changed and `Tint` notifications were published,
    /// `false` if `color` equals the current tint.
    pub fn set_tint(&mut self, color: Color) -> bool {
        self.tint.set(color, &mut self.hub)
    }

    pub fn bar_background_color(&self) -> Color {
        *self.bar_background_color.get()
    }

    /// Same as [`set_tint`](Self::set_tint), for the bar background.
    pub fn set_bar_background_color(&mut self, color: Color) -> bool {
        self.bar_background_color.set(color, &mut self.hub)
    }

    pub fn bar_text_color(&self) -> Color {
        *self.bar_text_color.get()
    }

    /// Same as [`set_tint`](Self::set_tint), for the bar text.
    pub fn set_bar_text_color(&mut self, color: Color) -> bool {
        self.bar_text_color.set(color, &mut self.hub)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.get().as_deref()
    }

    /// Sets or clears (`None`) the bar title. Returns whether it changed.
    pub fn set_title(&mut self, title: Option<String>) -> bool {
        self.title.set(title, &mut self.hub)
    }

    /// Whether an unhandled back-button press pops the current page.
    pub fn back_button_pops(&self) -> bool {
        self.back_button_pops
    }

    pub fn set_back_button_pops(&mut self, pops: bool) {
        self.back_button_pops = pops;
    }

    #[inline]
    fn publish_current_changing(&mut self) {
        let value = self.current_page().into();
        self.hub.publish(NavigationEvent::PropertyChanging {
            property: Property::CurrentPage,
            value,
        });
    }

    #[inline]
    fn publish_current_changed(&mut self) {
        let value = self.current_page().into();
        self.hub.publish(NavigationEvent::PropertyChanged {
            property: Property::CurrentPage,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RED;
    use crate::navigation::event::PropertyValue;
    use crate::navigation::page::ContentPage;
    use std::sync::Arc;

    fn page(title: &str) -> PageRef {
        ContentPage::new(title).into_ref()
    }

    fn back_page(title: &str, handles: bool) -> Arc<ContentPage> {
        Arc::new(ContentPage::new(title).handles_back(handles))
    }

    fn drain(rx: &Receiver<NavigationEvent>) -> Vec<NavigationEvent> {
        rx.try_iter().collect()
    }

    fn count(events: &[NavigationEvent], pred: impl Fn(&NavigationEvent) -> bool) -> usize {
        events.iter().filter(|evt| pred(evt)).count()
    }

    fn is_current(actual: Option<PageRef>, expected: &PageRef) -> bool {
        actual.is_some_and(|page| same_page(&page, expected))
    }

    #[test]
    fn test_push_on_empty_stack_sets_current_page() {
        let mut nav = NavigationStack::new();
        assert!(nav.current_page().is_none());

        let root = page("Root");
        nav.push(root.clone());

        assert!(is_current(nav.current_page(), &root));
        assert!(is_current(nav.root_page(), &root));
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn test_construct_with_root() {
        let root = page("Root");
        let nav = NavigationStack::with_root(root.clone());

        assert!(is_current(nav.current_page(), &root));
        assert_eq!(nav.stack_depth(), 1);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_push_fires_pushed_with_the_page() {
        let mut nav = NavigationStack::with_root(page("Root"));
        let rx = nav.subscribe();

        let second = page("Page 2");
        nav.push(second.clone());
        let third = page("Page 3");
        nav.push(third.clone());

        let pushed: Vec<PageRef> = drain(&rx)
            .into_iter()
            .filter_map(|evt| match evt {
                NavigationEvent::Pushed(page) => Some(page),
                _ => None,
            })
            .collect();

        assert_eq!(pushed.len(), 2);
        assert!(same_page(&pushed[0], &second));
        assert!(same_page(&pushed[1], &third));
        assert!(is_current(nav.current_page(), &third));
        assert_eq!(nav.stack_depth(), 3);
    }

    #[test]
    fn test_double_push_is_ignored() {
        let mut nav = NavigationStack::new();
        let root = page("Root");
        nav.push(root.clone());

        let rx = nav.subscribe();
        nav.push(root.clone());

        assert!(drain(&rx).is_empty());
        assert_eq!(nav.stack_depth(), 1);
        assert!(is_current(nav.current_page(), &root));
    }

    #[test]
    fn test_pop_returns_previous_top() {
        let mut nav = NavigationStack::new();
        let first = page("First");
        let second = page("Second");
        nav.push(first.clone());
        nav.push(second.clone());

        let rx = nav.subscribe();
        let depth_before = nav.stack_depth();
        let popped = nav.pop();

        assert!(popped.is_some_and(|popped| same_page(&popped, &second)));
        assert_eq!(nav.stack_depth(), depth_before - 1);
        assert!(is_current(nav.current_page(), &first));
        assert_eq!(
            count(&drain(&rx), |evt| matches!(evt, NavigationEvent::Popped(_))),
            1
        );

        assert!(nav.pop().is_none());
        assert!(nav.pop().is_none());
    }

    #[test]
    fn test_pop_last_page_keeps_root_current() {
        let root = page("Root");
        let mut nav = NavigationStack::with_root(root.clone());
        let rx = nav.subscribe();

        assert!(nav.pop().is_none());
        assert!(is_current(nav.current_page(), &root));
        assert_eq!(nav.stack_depth(), 1);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_pop_on_empty_stack_returns_none() {
        let mut nav = NavigationStack::new();
        assert!(nav.pop().is_none());
        assert_eq!(nav.stack_depth(), 0);
    }

    #[test]
    fn test_pop_to_root_fires_once() {
        let root = page("Root");
        let mut nav = NavigationStack::new();
        nav.push(root.clone());
        nav.push(page("Child 1"));
        nav.push(page("Child 2"));

        let rx = nav.subscribe();
        nav.pop_to_root();
        let events = drain(&rx);

        assert!(is_current(nav.current_page(), &root));
        assert_eq!(nav.stack_depth(), 1);
        assert_eq!(
            count(&events, |evt| matches!(
                evt,
                NavigationEvent::PoppedToRoot { .. }
            )),
            1
        );
        assert_eq!(
            count(&events, |evt| evt.property() == Some(Property::CurrentPage)),
            2
        );
        assert_eq!(
            count(&events, |evt| matches!(evt, NavigationEvent::Popped(_))),
            0
        );
    }

    #[test]
    fn test_pop_to_root_reports_popped_pages_top_first() {
        let root = page("Root");
        let child1 = page("Child 1");
        let child2 = page("Child 2");
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(child1.clone());
        nav.push(child2.clone());

        let rx = nav.subscribe();
        nav.pop_to_root();

        let Some(NavigationEvent::PoppedToRoot {
            root: event_root,
            popped,
        }) = drain(&rx).pop()
        else {
            panic!("expected PoppedToRoot as the last event");
        };

        assert!(same_page(&event_root, &root));
        assert_eq!(popped.len(), 2);
        assert!(same_page(&popped[0], &child2));
        assert!(same_page(&popped[1], &child1));
    }

    #[test]
    fn test_pop_to_root_at_root_is_noop() {
        let mut nav = NavigationStack::with_root(page("Root"));
        let rx = nav.subscribe();

        nav.pop_to_root();

        assert!(drain(&rx).is_empty());
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn test_stack_copy_pops_in_reverse_push_order() {
        let root = page("Root");
        let child1 = page("Child 1");
        let child2 = page("Child 2");
        let mut nav = NavigationStack::new();
        nav.push(root.clone());
        nav.push(child1.clone());
        nav.push(child2.clone());

        let mut copy = nav.stack_copy();

        assert!(copy.pop().is_some_and(|p| same_page(&p, &child2)));
        assert!(copy.pop().is_some_and(|p| same_page(&p, &child1)));
        assert!(copy.pop().is_some_and(|p| same_page(&p, &root)));
        assert!(copy.pop().is_none());

        assert_eq!(nav.stack_depth(), 3);
        assert!(is_current(nav.current_page(), &child2));
    }

    #[test]
    fn test_stack_copy_does_not_follow_later_mutation() {
        let mut nav = NavigationStack::with_root(page("Root"));
        let copy = nav.stack_copy();

        nav.push(page("Later"));

        assert_eq!(copy.len(), 1);
        assert_eq!(nav.stack_depth(), 2);
    }

    #[test]
    fn test_current_page_notifications_carry_old_and_new() {
        let root = page("Root");
        let next = page("Next");
        let mut nav = NavigationStack::with_root(root.clone());
        let rx = nav.subscribe();

        nav.push(next.clone());
        let events = drain(&rx);

        assert_eq!(events.len(), 3);
        match &events[0] {
            NavigationEvent::PropertyChanging {
                property: Property::CurrentPage,
                value: PropertyValue::Page(Some(old)),
            } => assert!(same_page(old, &root)),
            other => panic!("unexpected event {:?}", other),
        }
        match &events[1] {
            NavigationEvent::PropertyChanged {
                property: Property::CurrentPage,
                value: PropertyValue::Page(Some(new)),
            } => assert!(same_page(new, &next)),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(matches!(events[2], NavigationEvent::Pushed(_)));
    }

    #[test]
    fn test_first_push_reports_no_previous_page() {
        let mut nav = NavigationStack::new();
        let rx = nav.subscribe();

        nav.push(page("Root"));

        assert!(matches!(
            drain(&rx).first(),
            Some(NavigationEvent::PropertyChanging {
                property: Property::CurrentPage,
                value: PropertyValue::Page(None),
            })
        ));
    }

    #[test]
    fn test_back_button_reaches_current_page() {
        let current = back_page("Root", false);
        let mut nav = NavigationStack::with_root(current.clone());

        nav.send_back_button_pressed();

        assert_eq!(current.back_requests(), 1);
    }

    #[test]
    fn test_back_button_skips_non_current_page() {
        let root = back_page("Root", false);
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(page("Top"));

        nav.send_back_button_pressed();

        assert_eq!(root.back_requests(), 0);
    }

    #[test]
    fn test_back_button_navigates_back_when_unhandled() {
        let root = page("Root");
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(page("Second"));
        let rx = nav.subscribe();

        assert!(nav.send_back_button_pressed());
        assert!(is_current(nav.current_page(), &root));
        assert_eq!(
            count(&drain(&rx), |evt| matches!(evt, NavigationEvent::Popped(_))),
            1
        );
    }

    #[test]
    fn test_back_button_handled_by_page_keeps_stack() {
        let root = back_page("Root", false);
        let second = back_page("Second", true);
        let mut nav = NavigationStack::with_root(root);
        nav.push(second.clone());
        let rx = nav.subscribe();

        assert!(nav.send_back_button_pressed());

        let second: PageRef = second;
        assert!(is_current(nav.current_page(), &second));
        assert_eq!(nav.stack_depth(), 2);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_back_button_on_single_page_is_not_handled() {
        let root = page("Root");
        let mut nav = NavigationStack::with_root(root.clone());
        let rx = nav.subscribe();

        assert!(!nav.send_back_button_pressed());
        assert!(is_current(nav.current_page(), &root));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_back_button_on_empty_stack() {
        let mut nav = NavigationStack::new();
        assert!(!nav.send_back_button_pressed());
    }

    #[test]
    fn test_back_button_without_fallback_pop() {
        let mut nav = NavigationStack::with_root(page("Root"));
        nav.push(page("Second"));
        nav.set_back_button_pops(false);

        assert!(!nav.send_back_button_pressed());
        assert_eq!(nav.stack_depth(), 2);
    }

    #[test]
    fn test_tint_change_is_notified() {
        let mut nav = NavigationStack::new();
        assert_eq!(nav.tint(), Color::Default);
        let rx = nav.subscribe();

        assert!(nav.set_tint(RED));

        assert_eq!(nav.tint(), RED);
        assert_eq!(
            count(&drain(&rx), |evt| matches!(
                evt,
                NavigationEvent::PropertyChanged {
                    property: Property::Tint,
                    ..
                }
            )),
            1
        );
    }

    #[test]
    fn test_tint_double_set_is_silent() {
        let mut nav = NavigationStack::new();
        let rx = nav.subscribe();

        let tint = nav.tint();
        assert!(!nav.set_tint(tint));

        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn test_bar_colors_and_title_are_observable() {
        let mut nav = NavigationStack::new();
        let rx = nav.subscribe();

        nav.set_bar_background_color(RED);
        nav.set_bar_text_color(crate::color::WHITE);
        nav.set_title(Some("Mail".to_string()));
        nav.set_title(Some("Mail".to_string()));

        let changed: Vec<Property> = drain(&rx)
            .into_iter()
            .filter_map(|evt| match evt {
                NavigationEvent::PropertyChanged { property, .. } => Some(property),
                _ => None,
            })
            .collect();

        assert_eq!(
            changed,
            vec![
                Property::BarBackgroundColor,
                Property::BarTextColor,
                Property::Title
            ]
        );
        assert_eq!(nav.title(), Some("Mail"));
    }

    #[test]
    fn test_settings_seed_appearance() {
        let settings = NavigationSettings {
            tint: RED,
            back_button_pops: false,
            ..Default::default()
        };
        let nav = NavigationStack::from_settings(&settings);

        assert_eq!(nav.tint(), RED);
        assert!(!nav.back_button_pops());
        assert_eq!(nav.stack_depth(), 0);
    }

    #[test]
    fn test_insert_page_before_keeps_current() {
        let root = page("Root");
        let top = page("Top");
        let middle = page("Middle");
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(top.clone());
        let rx = nav.subscribe();

        nav.insert_page_before(middle.clone(), &top).unwrap();

        let titles: Vec<_> = nav.pages().map(|p| p.title().unwrap_or("")).collect();
        assert_eq!(titles, vec!["Root", "Middle", "Top"]);
        assert!(is_current(nav.current_page(), &top));

        let events = drain(&rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavigationEvent::PageInserted { .. }));
    }

    #[test]
    fn test_insert_page_before_rejects_bad_input() {
        let root = page("Root");
        let stranger = page("Stranger");
        let mut nav = NavigationStack::with_root(root.clone());

        assert_eq!(
            nav.insert_page_before(root.clone(), &root),
            Err(NavigationError::PageAlreadyInStack("\"Root\"".to_string()))
        );
        assert_eq!(
            nav.insert_page_before(page("New"), &stranger),
            Err(NavigationError::PageNotInStack("\"Stranger\"".to_string()))
        );
        assert_eq!(nav.stack_depth(), 1);
    }

    #[test]
    fn test_remove_non_current_page() {
        let root = page("Root");
        let middle = page("Middle");
        let top = page("Top");
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(middle.clone());
        nav.push(top.clone());
        let rx = nav.subscribe();

        nav.remove_page(&middle).unwrap();

        assert_eq!(nav.stack_depth(), 2);
        assert!(!nav.contains(&middle));
        assert!(is_current(nav.current_page(), &top));
        let events = drain(&rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], NavigationEvent::PageRemoved(_)));
    }

    #[test]
    fn test_remove_current_page_pops() {
        let root = page("Root");
        let top = page("Top");
        let mut nav = NavigationStack::with_root(root.clone());
        nav.push(top.clone());
        let rx = nav.subscribe();

        nav.remove_page(&top).unwrap();

        assert!(is_current(nav.current_page(), &root));
        assert_eq!(
            count(&drain(&rx), |evt| matches!(evt, NavigationEvent::Popped(_))),
            1
        );
    }

    #[test]
    fn test_remove_errors() {
        let root = page("Root");
        let mut nav = NavigationStack::new();
        assert_eq!(nav.remove_page(&root), Err(NavigationError::Empty));

        nav.push(root.clone());
        assert_eq!(
            nav.remove_page(&root),
            Err(NavigationError::CannotRemoveRoot)
        );
        assert!(matches!(
            nav.remove_page(&page("Other")),
            Err(NavigationError::PageNotInStack(_))
        ));
    }

    #[test]
    fn test_attached_hub_sees_events() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut nav = NavigationStack::new();
        nav.attach(tx);

        nav.push(page("Root"));

        assert_eq!(rx.try_iter().count(), 3);
    }
}
