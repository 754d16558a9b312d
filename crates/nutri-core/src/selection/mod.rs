//! The selection state machine.
//!
//! Each side has a group filter and a food pick that change independently.
//! A [`FixedInstance`] remembers the comparison on display so a render only
//! touches the side that actually changed. [`dispatch_at`] is the single
//! entry point: every event re-runs the whole pipeline against the session.

mod dispatch;
mod instance;
mod resolve;
mod slot_selection;
mod state;

pub use dispatch::{Frame, SelectionEvent, dispatch, dispatch_at, dispatch_settled};
pub use instance::FixedInstance;
pub use resolve::{InstanceChange, NoSelectionReason, Resolution, resolve, valid_selection};
pub use slot_selection::SlotSelection;
pub use state::{Notice, SessionState};
