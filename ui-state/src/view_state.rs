//! A reactive holder for a single view-bound asynchronous load.
//!
//! [`AsyncViewState`] owns the three fields a loading view renders from
//! (value, busy flag, failure) and settles them from exactly one invocation
//! of an externally supplied data accessor. The hosting framework drives the
//! future returned by [`AsyncViewState::activate`] on its event loop; if the
//! view is torn down first, the future is dropped and the fetch result is
//! discarded without touching the published state.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::rc::{Rc, Weak};

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use scopeguard::guard;

/// Fallback message for accessor failures that carry no error value.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch stats";

/// Error-shaped failure exposed to the view after an unsuccessful load.
///
/// Accessor errors are flattened to their display text; the view only needs
/// a message to show next to the stale/empty panel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The three fields republished to observers.
///
/// After settlement at most one of `value` and `failure` is set, and `busy`
/// is true only inside the window between activation and settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot<T> {
    pub value: Option<T>,
    pub busy: bool,
    pub failure: Option<FetchError>,
}

impl<T> ViewSnapshot<T> {
    /// True between activation and settlement.
    pub fn is_loading(&self) -> bool {
        self.busy
    }

    /// True once the single fetch has succeeded or failed.
    pub fn is_settled(&self) -> bool {
        !self.busy && (self.value.is_some() || self.failure.is_some())
    }
}

impl<T> Default for ViewSnapshot<T> {
    fn default() -> Self {
        Self {
            value: None,
            busy: false,
            failure: None,
        }
    }
}

type Listener<T> = Rc<dyn Fn(&ViewSnapshot<T>)>;

type Accessor<T> =
    Box<dyn FnOnce() -> LocalBoxFuture<'static, anyhow::Result<T>>>;

type FetchOutcome<T> = Result<anyhow::Result<T>, Box<dyn Any + Send>>;

struct Shared<T> {
    snapshot: RefCell<ViewSnapshot<T>>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener_id: Cell<u64>,
}

impl<T: Clone> Shared<T> {
    /// Hand the current snapshot to every registered listener.
    fn publish(&self) {
        // Copy the listener list out first so a callback can subscribe or
        // unsubscribe without hitting a reborrow.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        let snapshot = self.snapshot.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// State holder for a single asynchronous load.
///
/// Construct it around a zero-argument data accessor, then call
/// [`activate`](Self::activate) once from the hosting view's mount callback.
/// The accessor runs exactly once per instance; there is no re-fetch
/// trigger, so `Loading → Success` and `Loading → Failure` are both terminal.
pub struct AsyncViewState<T> {
    shared: Rc<Shared<T>>,
    accessor: RefCell<Option<Accessor<T>>>,
}

impl<T: Clone + 'static> AsyncViewState<T> {
    /// Wrap a data accessor without starting it. The holder reports idle
    /// (not busy, nothing loaded) until activation.
    pub fn new<F, Fut>(accessor: F) -> Self
    where
        F: FnOnce() -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<T>> + 'static,
    {
        Self {
            shared: Rc::new(Shared {
                snapshot: RefCell::new(ViewSnapshot::default()),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
            }),
            accessor: RefCell::new(Some(Box::new(move || {
                accessor().boxed_local()
            }))),
        }
    }

    /// Start the single fetch.
    ///
    /// The first call consumes the accessor, flips the snapshot to busy, and
    /// returns the future that drives the fetch to settlement; the hosting
    /// framework spawns it on its single-threaded executor. Dropping that
    /// future before completion (view teardown) discards the result without
    /// any further state mutation. Repeat calls log a warning and return a
    /// future that does nothing.
    pub fn activate(&self) -> LocalBoxFuture<'static, ()> {
        let taken = self.accessor.borrow_mut().take();
        let job = match taken {
            Some(accessor) => {
                self.shared.snapshot.borrow_mut().busy = true;
                self.shared.publish();
                Some((accessor(), Rc::clone(&self.shared)))
            }
            None => {
                tracing::warn!(
                    "view state activated more than once; ignoring"
                );
                None
            }
        };

        async move {
            let Some((fetch, shared)) = job else {
                return;
            };
            let outcome = AssertUnwindSafe(fetch).catch_unwind().await;
            settle(&shared, outcome);
        }
        .boxed_local()
    }

    /// Owned copy of the three observed fields.
    pub fn current_state(&self) -> ViewSnapshot<T> {
        self.shared.snapshot.borrow().clone()
    }

    /// Observe every republish (the activation flip and the settlement
    /// write). The listener stays registered until the returned guard is
    /// dropped. Listeners are not called with the state at subscription
    /// time; read [`current_state`](Self::current_state) for that.
    pub fn subscribe(
        &self,
        listener: impl Fn(&ViewSnapshot<T>) + 'static,
    ) -> Subscription<T> {
        let id = self.shared.next_listener_id.get();
        self.shared.next_listener_id.set(id + 1);
        self.shared
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }
    }
}

/// Record the fetch outcome and notify observers.
fn settle<T: Clone>(shared: &Rc<Shared<T>>, outcome: FetchOutcome<T>) {
    // Guaranteed-run finalizer: the busy flag clears and observers hear
    // about settlement no matter which arm below runs, so the view can
    // never report perpetual loading after the fetch completes.
    let shared = guard(Rc::clone(shared), |shared| {
        shared.snapshot.borrow_mut().busy = false;
        shared.publish();
    });

    match outcome {
        Ok(Ok(value)) => {
            tracing::debug!("fetch settled successfully");
            shared.snapshot.borrow_mut().value = Some(value);
        }
        Ok(Err(error)) => {
            tracing::error!(%error, "fetch failed");
            shared.snapshot.borrow_mut().failure =
                Some(FetchError::new(error.to_string()));
        }
        Err(_panic) => {
            // The accessor future panicked: there is no error value to
            // surface, so normalize to the fixed fallback message and keep
            // the failure field error-shaped.
            tracing::error!("fetch panicked");
            shared.snapshot.borrow_mut().failure =
                Some(FetchError::new(FETCH_FAILURE_MESSAGE));
        }
    }
}

/// Removes its listener from the holder when dropped.
pub struct Subscription<T> {
    id: u64,
    shared: Weak<Shared<T>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
