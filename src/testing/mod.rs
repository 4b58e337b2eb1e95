//! Headless testing kit: a recording backend, the [`Pilot`], and text dumps.
//!
//! [`RecordingBackend`] stands in for a graphics backend and records every
//! draw call. [`Pilot`] runs a [`Ui`](crate::ui::Ui) frame by frame against
//! it, and [`dump_tree`] captures a laid-out scene as text for snapshots.

pub mod backend;
pub mod pilot;
pub mod snapshot;

pub use backend::{DrawCall, RecordingBackend};
pub use pilot::Pilot;
pub use snapshot::{dump_subtree, dump_tree};
