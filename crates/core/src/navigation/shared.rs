use super::error::NavigationError;
use super::event::{Hub, NavigationEvent};
use super::page::PageRef;
use super::stack::NavigationStack;
use crate::color::Color;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard};

/// A cloneable, thread-safe handle to a [`NavigationStack`].
///
/// Every call takes the lock for the whole operation, including the events it
/// publishes, so calls from different threads are applied one at a time and
/// subscribers never see an event that disagrees with the stack state.
///
/// Pages must not call back into the same handle from
/// [`Page::on_back_button_pressed`](super::Page::on_back_button_pressed);
/// the lock is held while the page is asked.
///
/// # Example
///
/// ```
/// use pagestack_core::navigation::{ContentPage, SharedNavigation};
/// use std::thread;
///
/// let nav = SharedNavigation::with_root(ContentPage::new("Root").into_ref());
///
/// let worker = nav.clone();
/// thread::spawn(move || worker.push(ContentPage::new("Details").into_ref()))
///     .join()
///     .unwrap();
///
/// assert_eq!(nav.stack_depth(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedNavigation {
    inner: Arc<Mutex<NavigationStack>>,
}

impl SharedNavigation {
    pub fn new(stack: NavigationStack) -> SharedNavigation {
        SharedNavigation {
            inner: Arc::new(Mutex::new(stack)),
        }
    }

    pub fn with_root(root: PageRef) -> SharedNavigation {
        SharedNavigation::new(NavigationStack::with_root(root))
    }

    /// Runs `f` with exclusive access to the stack.
    ///
    /// Use this to group several operations into one atomic step.
    pub fn with<R>(&self, f: impl FnOnce(&mut NavigationStack) -> R) -> R {
        f(&mut *self.lock())
    }

    // Operations never panic halfway through a mutation, so a poisoned lock
    // still guards a consistent stack.
    fn lock(&self) -> MutexGuard<'_, NavigationStack> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("navigation lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// See [`NavigationStack::subscribe`].
    pub fn subscribe(&self) -> Receiver<NavigationEvent> {
        self.lock().subscribe()
    }

    pub fn attach(&self, hub: Hub) {
        self.lock().attach(hub);
    }

    /// Pushes `page` and publishes its events before any other call can run.
    pub fn push(&self, page: PageRef) {
        self.lock().push(page);
    }

    /// Pops the current page.
    ///
    /// # Returns
    ///
    /// The removed page, or `None` when at most the root is left.
    pub fn pop(&self) -> Option<PageRef> {
        self.lock().pop()
    }

    pub fn pop_to_root(&self) {
        self.lock().pop_to_root();
    }

    /// Dispatches a back-button press while holding the lock.
    ///
    /// A page that panics here poisons the lock; the stack is left as it was
    /// and later calls keep working.
    pub fn send_back_button_pressed(&self) -> bool {
        self.lock().send_back_button_pressed()
    }

    /// Inserts `page` directly below `before`.
    ///
    /// # Errors
    ///
    /// Same as [`NavigationStack::insert_page_before`].
    pub fn insert_page_before(
        &self,
        page: PageRef,
        before: &PageRef,
    ) -> Result<(), NavigationError> {
        self.lock().insert_page_before(page, before)
    }

    /// Removes `page` from anywhere in the stack.
    ///
    /// # Errors
    ///
    /// Same as [`NavigationStack::remove_page`].
    pub fn remove_page(&self, page: &PageRef) -> Result<(), NavigationError> {
        self.lock().remove_page(page)
    }

    pub fn current_page(&self) -> Option<PageRef> {
        self.lock().current_page()
    }

    pub fn root_page(&self) -> Option<PageRef> {
        self.lock().root_page()
    }

    pub fn stack_depth(&self) -> usize {
        self.lock().stack_depth()
    }

    /// Snapshot of the stack, bottom first. Later calls don't affect it.
    pub fn stack_copy(&self) -> Vec<PageRef> {
        self.lock().stack_copy()
    }

    pub fn can_go_back(&self) -> bool {
        self.lock().can_go_back()
    }

    pub fn contains(&self, page: &PageRef) -> bool {
        self.lock().contains(page)
    }

    pub fn tint(&self) -> Color {
        self.lock().tint()
    }

    /// Sets the tint.
    ///
    /// # Returns
    ///
    /// `true` if the tint changed and notifications were published.
    pub fn set_tint(&self, color: Color) -> bool {
        self.lock().set_tint(color)
    }

    pub fn bar_background_color(&self) -> Color {
        self.lock().bar_background_color()
    }

    pub fn set_bar_background_color(&self, color: Color) -> bool {
        self.lock().set_bar_background_color(color)
    }

    pub fn bar_text_color(&self) -> Color {
        self.lock().bar_text_color()
    }

    pub fn set_bar_text_color(&self, color: Color) -> bool {
        self.lock().set_bar_text_color(color)
    }

    /// Owned copy of the title; the lock is released before returning.
    pub fn title(&self) -> Option<String> {
        self.lock().title().map(str::to_string)
    }

    pub fn set_title(&self, title: Option<String>) -> bool {
        self.lock().set_title(title)
    }
}
