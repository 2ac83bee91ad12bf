//! One-shot initialisation primitives for process-wide resources.
//!
//! [`InitOnce`] wraps a [`tokio::sync::OnceCell`] holding the *outcome* of an
//! initialisation attempt rather than the value alone. The first caller runs
//! the initialiser; every concurrent and later caller observes that same
//! stored outcome, including a stored failure. A failed attempt is final:
//! the initialiser never reruns on retry.
//!
//! Resources built on this primitive are owned by the caller and passed
//! explicitly to whatever needs them; nothing here registers process-global
//! state.

use tokio::sync::OnceCell;

/// A cell whose value is produced by exactly one initialisation attempt.
///
/// # Examples
/// ```
/// use backend::bootstrap::InitOnce;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cell: InitOnce<u32, String> = InitOnce::new();
/// assert!(cell.get().is_none());
///
/// let value = cell.init(|| async { Ok(7) }).await.expect("init succeeds");
/// assert_eq!(*value, 7);
/// assert_eq!(cell.get(), Some(&7));
/// # }
/// ```
#[derive(Debug)]
pub struct InitOnce<T, E> {
    cell: OnceCell<Result<T, E>>,
}

impl<T, E: Clone> InitOnce<T, E> {
    /// Build an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Run `init` unless an attempt already completed, and return the stored
    /// outcome.
    ///
    /// Under concurrency exactly one caller executes `init`; the rest wait
    /// and receive the same outcome. Once an attempt has completed, later
    /// calls return the stored outcome without running their initialiser,
    /// even when the stored outcome is a failure.
    pub async fn init<F, Fut>(&self, init: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.cell.get_or_init(init).await {
            Ok(value) => Ok(value),
            Err(err) => Err(err.clone()),
        }
    }

    /// The initialised value, or `None` while no attempt has succeeded.
    pub fn get(&self) -> Option<&T> {
        self.cell.get().and_then(|outcome| outcome.as_ref().ok())
    }

    /// Take the value out of the cell, leaving it empty.
    ///
    /// Returns `None` when no successful attempt is stored; calling it again
    /// is a no-op. Exclusive access guarantees no initialisation is in
    /// flight. The cell is reset, so a later [`InitOnce::init`] may run
    /// again.
    pub fn take(&mut self) -> Option<T> {
        self.cell.take().and_then(Result::ok)
    }
}

impl<T, E: Clone> Default for InitOnce<T, E> {
    fn default() -> Self {
        Self::new()
    }
}
