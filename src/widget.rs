//! The slice of the panel toolbar the filter box lives in: a container tree
//! and a text input box that reports value changes and key presses.

use crate::events::{Emitter, Subscription};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Space,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    Enter,
    Escape,
    Tab,
    Backspace,
    Char(char),
}

/// A key press routed through the input box.
///
/// Listeners share the event by reference; stopping propagation keeps the
/// hosting toolbar from seeing it.
#[derive(Debug)]
pub struct KeyboardEvent {
    key_code: KeyCode,
    propagation_stopped: Cell<bool>,
}

impl KeyboardEvent {
    pub fn new(key_code: KeyCode) -> Self {
        Self {
            key_code,
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn key_code(&self) -> KeyCode {
        self.key_code
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

struct InputBoxInner {
    value: RefCell<String>,
    placeholder: String,
    did_change: Emitter<String>,
    key_down: Emitter<KeyboardEvent>,
    key_up: Emitter<KeyboardEvent>,
}

/// Text input widget. Clones are handles to the same box.
#[derive(Clone)]
pub struct InputBox {
    inner: Rc<InputBoxInner>,
}

impl InputBox {
    pub fn new(placeholder: &str) -> Self {
        Self {
            inner: Rc::new(InputBoxInner {
                value: RefCell::new(String::new()),
                placeholder: placeholder.to_string(),
                did_change: Emitter::new(),
                key_down: Emitter::new(),
                key_up: Emitter::new(),
            }),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.inner.placeholder
    }

    pub fn value(&self) -> String {
        self.inner.value.borrow().clone()
    }

    /// Replace the text. Fires `did_change` with the full new value unless
    /// the text is unchanged.
    pub fn set_value(&self, value: &str) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value.to_string();
        }
        self.inner.did_change.fire(&value.to_string());
    }

    pub fn on_did_change<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&String) + 'static,
    {
        self.inner.did_change.subscribe(listener)
    }

    pub fn on_key_down<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&KeyboardEvent) + 'static,
    {
        self.inner.key_down.subscribe(listener)
    }

    pub fn on_key_up<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&KeyboardEvent) + 'static,
    {
        self.inner.key_up.subscribe(listener)
    }

    /// Dispatch a key-down while the box has focus and return the event so
    /// the caller can decide whether to bubble it further.
    pub fn key_down(&self, key_code: KeyCode) -> KeyboardEvent {
        let event = KeyboardEvent::new(key_code);
        self.inner.key_down.fire(&event);
        event
    }

    pub fn key_up(&self, key_code: KeyCode) -> KeyboardEvent {
        let event = KeyboardEvent::new(key_code);
        self.inner.key_up.fire(&event);
        event
    }
}

/// A node of the toolbar: css classes, child nodes and at most one input box.
#[derive(Default)]
pub struct Container {
    classes: Vec<String>,
    children: Vec<Container>,
    input: Option<InputBox>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: &str) -> Self {
        let mut container = Self::new();
        container.add_class(class);
        container
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn append(&mut self, child: Container) -> &mut Container {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn children(&self) -> &[Container] {
        &self.children
    }

    pub fn set_input(&mut self, input: InputBox) {
        self.input = Some(input);
    }

    /// First input box found in this subtree, depth first.
    pub fn find_input(&self) -> Option<&InputBox> {
        self.input
            .as_ref()
            .or_else(|| self.children.iter().find_map(Container::find_input))
    }
}
