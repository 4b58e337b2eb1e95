//! Interactive and custom node state.

use std::collections::BTreeMap;
use std::fmt;

/// Built-in interactive states, each able to carry a style overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKind {
    Hover,
    Active,
    Focus,
    Disabled,
}

impl StateKind {
    /// Overlay application order; later entries win.
    pub const PRIORITY: [StateKind; 4] = [
        StateKind::Hover,
        StateKind::Active,
        StateKind::Focus,
        StateKind::Disabled,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateKind::Hover => "hover",
            StateKind::Active => "active",
            StateKind::Focus => "focus",
            StateKind::Disabled => "disabled",
        }
    }

    pub fn from_name(name: &str) -> Option<StateKind> {
        StateKind::PRIORITY
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-node state flags.
///
/// Read through [`get`](Self::get); write through
/// [`Scene::set_state`](crate::scene::Scene::set_state) so listeners run and
/// the layout is marked dirty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeState {
    hovered: bool,
    active: bool,
    focused: bool,
    disabled: bool,
    custom: BTreeMap<String, bool>,
}

impl NodeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a built-in state.
    pub fn get(&self, kind: StateKind) -> bool {
        match kind {
            StateKind::Hover => self.hovered,
            StateKind::Active => self.active,
            StateKind::Focus => self.focused,
            StateKind::Disabled => self.disabled,
        }
    }

    /// Write a built-in state. Returns whether the value changed.
    pub(crate) fn set(&mut self, kind: StateKind, value: bool) -> bool {
        let slot = match kind {
            StateKind::Hover => &mut self.hovered,
            StateKind::Active => &mut self.active,
            StateKind::Focus => &mut self.focused,
            StateKind::Disabled => &mut self.disabled,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Read a state by name; built-in names read the built-in flag and
    /// unknown names are false.
    pub fn custom(&self, name: &str) -> bool {
        match StateKind::from_name(name) {
            Some(kind) => self.get(kind),
            None => self.custom.get(name).copied().unwrap_or(false),
        }
    }

    /// Write a state by name. Built-in names write the built-in flag.
    /// Returns whether the value changed.
    pub(crate) fn set_custom(&mut self, name: &str, value: bool) -> bool {
        if let Some(kind) = StateKind::from_name(name) {
            return self.set(kind, value);
        }
        let previous = self.custom.insert(name.to_string(), value);
        previous.unwrap_or(false) != value
    }

    /// Built-in states currently true, in overlay priority order.
    pub fn active_kinds(&self) -> Vec<StateKind> {
        StateKind::PRIORITY
            .into_iter()
            .filter(|k| self.get(*k))
            .collect()
    }

    /// True when any built-in state is set.
    pub fn any_interactive(&self) -> bool {
        self.hovered || self.active || self.focused || self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_reports_changes() {
        let mut state = NodeState::new();
        assert!(state.set(StateKind::Hover, true));
        assert!(!state.set(StateKind::Hover, true));
        assert!(state.hovered);
        assert!(state.any_interactive());
    }

    #[test]
    fn active_kinds_in_priority_order() {
        let mut state = NodeState::new();
        state.set(StateKind::Disabled, true);
        state.set(StateKind::Hover, true);
        assert_eq!(state.active_kinds(), vec![StateKind::Hover, StateKind::Disabled]);
    }

    #[test]
    fn custom_states() {
        let mut state = NodeState::new();
        assert!(!state.custom("selected"));
        assert!(state.set_custom("selected", true));
        assert!(state.custom("selected"));
        assert!(!state.set_custom("selected", true));
        assert!(!state.set_custom("expanded", false));
        assert!(!state.any_interactive());
    }

    #[test]
    fn builtin_names_route_to_flags() {
        let mut state = NodeState::new();
        assert!(state.set_custom("Hover", true));
        assert!(state.get(StateKind::Hover));
        assert!(state.custom("hover"));
        assert_eq!(state.active_kinds(), vec![StateKind::Hover]);
        assert!(state.custom.is_empty());
    }

    #[test]
    fn names() {
        assert_eq!(StateKind::from_name("Focus"), Some(StateKind::Focus));
        assert_eq!(StateKind::from_name("pressed"), None);
        assert_eq!(StateKind::Active.to_string(), "active");
    }
}
