// File: crates/candlebrush-core/src/keyboard.rs
// Summary: Document-level keyboard listener registry with RAII listener handles.
// Notes:
// - Single-threaded: listeners are `Rc<dyn Fn>` and the hub lives behind `Rc`.
// - Dispatch snapshots the listener list first, so a listener may drop its own handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Numeric key code, as reported by `KeyboardEvent.which`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(27);

    /// Legacy code for a DOM `KeyboardEvent.code` name such as `KeyA`, `Digit1` or `ArrowLeft`.
    pub fn from_dom_code(code: &str) -> Option<KeyCode> {
        let numbered = |prefix: &str, base: u32, max: u32| {
            code.strip_prefix(prefix)
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n <= max)
                .map(|n| KeyCode(base + n))
        };
        if let Some(&[c]) = code.strip_prefix("Key").map(str::as_bytes) {
            return c.is_ascii_uppercase().then_some(KeyCode(u32::from(c)));
        }
        if let Some(k) = numbered("Digit", 48, 9).or_else(|| numbered("Numpad", 96, 9)) {
            return Some(k);
        }
        if let Some(k) = numbered("F", 111, 12).filter(|k| k.0 > 111) {
            return Some(k);
        }
        let n = match code {
            "Backspace" => 8,
            "Tab" => 9,
            "Enter" | "NumpadEnter" => 13,
            "ShiftLeft" | "ShiftRight" => 16,
            "ControlLeft" | "ControlRight" => 17,
            "AltLeft" | "AltRight" => 18,
            "Pause" => 19,
            "CapsLock" => 20,
            "Escape" => 27,
            "Space" => 32,
            "PageUp" => 33,
            "PageDown" => 34,
            "End" => 35,
            "Home" => 36,
            "ArrowLeft" => 37,
            "ArrowUp" => 38,
            "ArrowRight" => 39,
            "ArrowDown" => 40,
            "Insert" => 45,
            "Delete" => 46,
            _ => return None,
        };
        Some(KeyCode(n))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub code: KeyCode,
}

impl KeyEvent {
    pub fn up(code: KeyCode) -> Self { Self { kind: KeyEventKind::Up, code } }
    pub fn down(code: KeyCode) -> Self { Self { kind: KeyEventKind::Down, code } }
}

type Listener = Rc<dyn Fn(&KeyEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, KeyEventKind, Listener)>,
    added: u64,
    removed: u64,
}

/// Stand-in for the host document's key event target.
#[derive(Default)]
pub struct KeyboardHub {
    registry: RefCell<Registry>,
}

impl KeyboardHub {
    pub fn new() -> Rc<Self> { Rc::new(Self::default()) }

    /// Register `f` for events of `kind`. The listener stays registered until the
    /// returned handle is dropped.
    pub fn add_listener(self: &Rc<Self>, kind: KeyEventKind, f: impl Fn(&KeyEvent) + 'static) -> ListenerHandle {
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.added += 1;
        reg.listeners.push((id, kind, Rc::new(f)));
        ListenerHandle { hub: Rc::downgrade(self), id }
    }

    fn remove_listener(&self, id: u64) -> bool {
        let mut reg = self.registry.borrow_mut();
        let before = reg.listeners.len();
        reg.listeners.retain(|(lid, _, _)| *lid != id);
        let removed = reg.listeners.len() != before;
        if removed { reg.removed += 1; }
        removed
    }

    /// Deliver `event` to every listener registered for its kind; returns how many ran.
    pub fn dispatch(&self, event: &KeyEvent) -> usize {
        let targets: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, l)| Rc::clone(l))
            .collect();
        for l in &targets { l(event); }
        targets.len()
    }

    /// Currently registered listeners for `kind`.
    pub fn listener_count(&self, kind: KeyEventKind) -> usize {
        self.registry.borrow().listeners.iter().filter(|(_, k, _)| *k == kind).count()
    }

    /// Lifetime totals: `(registrations, removals)`.
    pub fn totals(&self) -> (u64, u64) {
        let reg = self.registry.borrow();
        (reg.added, reg.removed)
    }
}

/// Removes its listener from the hub when dropped. Outliving the hub is fine.
#[must_use = "dropping the handle unregisters the listener"]
pub struct ListenerHandle {
    hub: Weak<KeyboardHub>,
    id: u64,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.remove_listener(self.id);
        }
    }
}
