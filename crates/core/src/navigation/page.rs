//! The page capability the navigation stack works with.
//!
//! The stack never inspects page content. It only needs to ask the current
//! page whether it wants to consume a back-button press, and to compare pages
//! by identity. Pages are shared: the stack holds [`PageRef`] handles and never
//! copies the page behind them.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared, non-exclusive handle to a page.
pub type PageRef = Arc<dyn Page>;

/// A navigable page.
///
/// Both methods have defaults, so a page that neither has a title nor cares
/// about the back button is just `impl Page for MyPage {}`.
pub trait Page: fmt::Debug + Send + Sync {
    /// Human readable title, used for logging and by the script front-end.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Called when the back button is pressed while this page is on top.
    ///
    /// Returns `true` if the page handled the request, in which case the stack
    /// will not navigate back.
    fn on_back_button_pressed(&self) -> bool {
        false
    }
}

/// Returns `true` if both handles point at the same page.
#[inline]
pub fn same_page(a: &PageRef, b: &PageRef) -> bool {
    // Compare data pointers only; vtable pointers of the same type may differ
    // between codegen units.
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Label used in logs and error messages.
pub(crate) fn describe(page: &PageRef) -> String {
    match page.title() {
        Some(title) => format!("{:?}", title),
        None => format!("{:p}", Arc::as_ptr(page) as *const ()),
    }
}

/// A general purpose page with a title and a configurable back-button answer.
///
/// It records how many back-button requests reached it, which makes it handy
/// in scripts and tests.
///
/// # Example
///
/// ```
/// use pagestack_core::navigation::{ContentPage, Page};
///
/// let page = ContentPage::new("Settings").handles_back(true);
/// assert!(page.on_back_button_pressed());
/// assert_eq!(page.back_requests(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ContentPage {
    title: Option<String>,
    handles_back: AtomicBool,
    back_requests: AtomicUsize,
}

impl ContentPage {
    pub fn new(title: impl Into<String>) -> ContentPage {
        ContentPage {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn untitled() -> ContentPage {
        ContentPage::default()
    }

    /// Sets whether this page consumes back-button presses.
    pub fn handles_back(self, handles: bool) -> ContentPage {
        self.handles_back.store(handles, Ordering::SeqCst);
        self
    }

    pub fn set_handles_back(&self, handles: bool) {
        self.handles_back.store(handles, Ordering::SeqCst);
    }

    /// Number of back-button requests this page has received.
    pub fn back_requests(&self) -> usize {
        self.back_requests.load(Ordering::SeqCst)
    }

    pub fn into_ref(self) -> PageRef {
        Arc::new(self)
    }
}

impl Page for ContentPage {
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn on_back_button_pressed(&self) -> bool {
        self.back_requests.fetch_add(1, Ordering::SeqCst);
        self.handles_back.load(Ordering::SeqCst)
    }
}
