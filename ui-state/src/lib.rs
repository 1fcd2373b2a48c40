//! View-bound asynchronous loading state for the stats frontend.
//!
//! The hosting view framework owns rendering and lifecycle; this crate owns
//! the state synchronization in between. A view constructs an
//! [`AsyncViewState`] around a data accessor, calls
//! [`AsyncViewState::activate`] from its mount callback, spawns the returned
//! future on its single-threaded executor, and re-renders from
//! [`AsyncViewState::current_state`] (or a [`view_state::Subscription`])
//! whenever the holder republishes.

pub mod stats;
pub mod view_state;

pub use view_state::{
    AsyncViewState, FETCH_FAILURE_MESSAGE, FetchError, Subscription,
    ViewSnapshot,
};
