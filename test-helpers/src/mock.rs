//! Scripted data accessors standing in for the backend stats fetch.

use std::cell::Cell;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

/// A scripted stand-in for a view's data accessor.
///
/// Counts invocations and settles according to the chosen script, so tests
/// can assert both the single-call contract and the observable state
/// sequence around settlement.
pub struct ScriptedAccessor<T> {
    calls: Rc<Cell<usize>>,
    script: Script<T>,
}

enum Script<T> {
    Resolve(T),
    Reject(String),
    Panic,
    Deferred(oneshot::Receiver<anyhow::Result<T>>),
}

/// Settles a deferred accessor from the test body.
pub struct SettleHandle<T>(oneshot::Sender<anyhow::Result<T>>);

impl<T: 'static> ScriptedAccessor<T> {
    /// Resolves immediately with `value`.
    pub fn resolving(value: T) -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            script: Script::Resolve(value),
        }
    }

    /// Rejects immediately with an error carrying `message`.
    pub fn rejecting(message: &str) -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            script: Script::Reject(message.to_string()),
        }
    }

    /// Fails without an error value by panicking inside the accessor future.
    pub fn panicking() -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
            script: Script::Panic,
        }
    }

    /// Stays pending until the returned handle settles it.
    pub fn deferred() -> (Self, SettleHandle<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                calls: Rc::new(Cell::new(0)),
                script: Script::Deferred(rx),
            },
            SettleHandle(tx),
        )
    }

    /// Shared invocation counter; grab it before handing the accessor off.
    pub fn calls(&self) -> Rc<Cell<usize>> {
        self.calls.clone()
    }

    /// The zero-argument asynchronous closure handed to the view state.
    pub fn into_accessor(
        self,
    ) -> impl FnOnce() -> LocalBoxFuture<'static, anyhow::Result<T>> {
        let Self { calls, script } = self;
        move || {
            calls.set(calls.get() + 1);
            let fetch: LocalBoxFuture<'static, anyhow::Result<T>> =
                match script {
                    Script::Resolve(value) => {
                        async move { Ok(value) }.boxed_local()
                    }
                    Script::Reject(message) => {
                        async move { Err(anyhow::anyhow!(message)) }
                            .boxed_local()
                    }
                    Script::Panic => async move {
                        panic!("scripted accessor failure")
                    }
                    .boxed_local(),
                    Script::Deferred(rx) => async move {
                        rx.await
                            .expect("settle handle dropped without settling")
                    }
                    .boxed_local(),
                };
            fetch
        }
    }
}

impl<T> SettleHandle<T> {
    /// Complete the deferred fetch successfully.
    pub fn resolve(self, value: T) {
        let _ = self.0.send(Ok(value));
    }

    /// Complete the deferred fetch with an error carrying `message`.
    pub fn reject(self, message: &str) {
        let _ = self.0.send(Err(anyhow::anyhow!("{message}")));
    }
}
