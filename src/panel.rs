use crate::controller::FilterSink;
use crate::filter::FilterOptions;
use crate::model::MarkersModel;

type RefreshHook = Box<dyn FnMut(&MarkersModel)>;

/// The problems panel: owns the markers model and re-renders on refresh.
#[derive(Default)]
pub struct MarkersPanel {
    model: MarkersModel,
    refresh_count: usize,
    on_refresh: Option<RefreshHook>,
}

impl MarkersPanel {
    pub fn new(model: MarkersModel) -> Self {
        Self {
            model,
            refresh_count: 0,
            on_refresh: None,
        }
    }

    /// Install the renderer called on every refresh.
    pub fn on_refresh<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&MarkersModel) + 'static,
    {
        self.on_refresh = Some(Box::new(hook));
        self
    }

    pub fn model(&self) -> &MarkersModel {
        &self.model
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    pub fn refresh_panel(&mut self) {
        self.refresh_count += 1;
        if let Some(hook) = self.on_refresh.as_mut() {
            hook(&self.model);
        }
    }
}

impl FilterSink for MarkersPanel {
    fn filter_options(&self) -> &FilterOptions {
        self.model.filter_options()
    }

    fn apply_filter(&mut self, options: FilterOptions) {
        self.model.update(options);
    }

    fn refresh(&mut self) {
        self.refresh_panel();
    }
}
