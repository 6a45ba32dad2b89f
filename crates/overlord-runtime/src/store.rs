//! The shared-store mutation contract.

use overlord_event::Request;

/// Total state-transition function over the shared store.
///
/// The scheduler owns one value of the implementing type and applies every
/// dispatched request to it, in emission order, before waking any waiting
/// process. `apply` must be total: a request kind the state does not
/// recognize leaves it unchanged, silently.
///
/// Processes never mutate the store directly — they emit requests, which
/// serializes every mutation through the single-threaded dispatch loop.
///
/// # Example
///
/// ```
/// use overlord_event::Request;
/// use overlord_runtime::Reduce;
///
/// #[derive(Default)]
/// struct Tally {
///     doors_opened: u32,
/// }
///
/// impl Reduce for Tally {
///     fn apply(&mut self, req: &Request) {
///         if req.is("DOOR_OPENED") {
///             self.doors_opened += 1;
///         }
///         // everything else: inert
///     }
/// }
///
/// let mut tally = Tally::default();
/// tally.apply(&Request::new("DOOR_OPENED"));
/// tally.apply(&Request::new("SOMETHING_ELSE"));
/// assert_eq!(tally.doors_opened, 1);
/// ```
pub trait Reduce {
    /// Applies one request to the state.
    ///
    /// Must not panic on unknown kinds or malformed payloads; ignoring
    /// them is the contract.
    fn apply(&mut self, req: &Request);
}
