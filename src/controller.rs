//! The filter box action item.
//!
//! [`FilterInputItem`] renders the input box into the panel toolbar and keeps
//! the panel's filter in step with the text: every change is parsed into
//! [`FilterOptions`], handed to the [`FilterSink`] as a whole, and followed by
//! exactly one refresh.

use crate::config::{ConfigError, Messages, PLACEHOLDER_KEY, TOOLTIP_KEY};
use crate::events::{Disposable, DisposableStore};
use crate::filter::{FilterKeywords, FilterOptions};
use crate::widget::{Container, InputBox, KeyCode, KeyboardEvent};
use log::{debug, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

pub const FILTER_ACTION_ID: &str = "workbench.markers.panel.action.filter";
pub const FILTER_ACTION_CLASS: &str = "markers-panel-action-filter";
pub const INPUT_BOX_CONTAINER_CLASS: &str = "input-box-container";

/// Receives the parsed filter and re-renders the results.
pub trait FilterSink {
    /// The filter currently applied.
    fn filter_options(&self) -> &FilterOptions;

    /// Replace the applied filter.
    fn apply_filter(&mut self, options: FilterOptions);

    fn refresh(&mut self);
}

/// Something that can be placed in the panel toolbar.
pub trait ActionItem {
    fn render(&mut self, container: &mut Container);
    fn dispose(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterAction {
    id: String,
    label: String,
    class: String,
    enabled: bool,
}

impl FilterAction {
    pub fn new(messages: &Messages) -> Self {
        Self {
            id: FILTER_ACTION_ID.to_string(),
            label: messages.lookup(TOOLTIP_KEY).to_string(),
            class: FILTER_ACTION_CLASS.to_string(),
            enabled: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

pub struct FilterInputItem<S: FilterSink + 'static> {
    action: FilterAction,
    sink: Rc<RefCell<S>>,
    keywords: Rc<FilterKeywords>,
    placeholder: String,
    input: Option<InputBox>,
    to_dispose: DisposableStore,
}

impl<S: FilterSink + 'static> FilterInputItem<S> {
    /// Create the item. Keywords and placeholder are resolved from `messages`
    /// once, here.
    pub fn new(sink: Rc<RefCell<S>>, messages: &Messages) -> Result<Self, ConfigError> {
        Ok(Self {
            action: FilterAction::new(messages),
            sink,
            keywords: Rc::new(FilterKeywords::resolve(messages)?),
            placeholder: messages.lookup(PLACEHOLDER_KEY).to_string(),
            input: None,
            to_dispose: DisposableStore::new(),
        })
    }

    pub fn action(&self) -> &FilterAction {
        &self.action
    }

    /// The rendered input box, if any.
    pub fn input_box(&self) -> Option<&InputBox> {
        self.input.as_ref()
    }

    pub fn is_disposed(&self) -> bool {
        self.to_dispose.is_disposed()
    }

    fn attach(&mut self, input: &InputBox) {
        let sink = Rc::clone(&self.sink);
        let keywords = Rc::clone(&self.keywords);
        self.to_dispose.add(input.on_did_change(move |value| {
            let options = FilterOptions::parse(value, &keywords);
            debug!(
                "filter changed: errors={} warnings={} infos={} text={:?}",
                options.filter_errors(),
                options.filter_warnings(),
                options.filter_infos(),
                options.filter_value()
            );
            let mut sink = sink.borrow_mut();
            sink.apply_filter(options);
            sink.refresh();
        }));
        self.to_dispose.add(input.on_key_down(handle_keyboard_event));
        self.to_dispose.add(input.on_key_up(handle_keyboard_event));
    }
}

impl<S: FilterSink + 'static> ActionItem for FilterInputItem<S> {
    fn render(&mut self, container: &mut Container) {
        if self.is_disposed() {
            warn!("render called on a disposed filter item, ignoring");
            return;
        }
        // a second render replaces the first input box
        self.to_dispose.clear();

        container.add_class(&self.action.class);
        let input = InputBox::new(&self.placeholder);
        input.set_value(self.sink.borrow().filter_options().complete_value());
        self.attach(&input);

        container
            .append(Container::with_class(INPUT_BOX_CONTAINER_CLASS))
            .set_input(input.clone());
        self.input = Some(input);
    }

    fn dispose(&mut self) {
        if !self.to_dispose.is_disposed() {
            trace!("disposing filter item '{}'", self.action.id);
        }
        self.to_dispose.dispose();
    }
}

/// The toolbar binds space and the horizontal arrows to its own navigation;
/// inside the input box those keys belong to the text.
fn handle_keyboard_event(event: &KeyboardEvent) {
    match event.key_code() {
        KeyCode::Space | KeyCode::LeftArrow | KeyCode::RightArrow => event.stop_propagation(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_keyboard_event() {
        for key in [KeyCode::Space, KeyCode::LeftArrow, KeyCode::RightArrow] {
            let event = KeyboardEvent::new(key);
            handle_keyboard_event(&event);
            assert!(event.is_propagation_stopped(), "{:?} should be stopped", key);
        }
        for key in [
            KeyCode::UpArrow,
            KeyCode::DownArrow,
            KeyCode::Enter,
            KeyCode::Escape,
            KeyCode::Tab,
            KeyCode::Char('e'),
        ] {
            let event = KeyboardEvent::new(key);
            handle_keyboard_event(&event);
            assert!(!event.is_propagation_stopped(), "{:?} should propagate", key);
        }
    }

    #[test]
    fn test_filter_action_uses_messages() {
        let action = FilterAction::new(&Messages::new().with(TOOLTIP_KEY, "Filtern"));
        assert_eq!(action.id(), FILTER_ACTION_ID);
        assert_eq!(action.label(), "Filtern");
        assert_eq!(action.class(), FILTER_ACTION_CLASS);
        assert!(action.enabled());
    }
}
