//! Event system: input sampling, the per-frame state machine, and dispatch.

pub mod dispatch;
pub mod input;
pub mod manager;
pub mod types;

pub use dispatch::{bubble_path, builtin_state, dispatch_event, DispatchOutcome};
pub use input::{FrameInput, Key, KeyEvent, Modifiers};
pub use manager::EventManager;
pub use types::{EventContext, EventType, Handler, UiEvent};
