/// Errors returned by the stack editing operations.
///
/// The plain navigation operations (push, pop, pop-to-root, back button) never
/// fail; they report no-ops through their return values instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The referenced page is not part of the navigation stack
    #[error("page {0} is not in the navigation stack")]
    PageNotInStack(String),

    /// The page is already part of the navigation stack
    #[error("page {0} is already in the navigation stack")]
    PageAlreadyInStack(String),

    /// The root page cannot be removed while it is also the current page
    #[error("cannot remove the root page while it is the current page")]
    CannotRemoveRoot,

    /// The operation needs at least one page on the stack
    #[error("the navigation stack is empty")]
    Empty,
}
