pub mod cli;
pub mod config;
pub mod controller;
pub mod display;
pub mod events;
pub mod filter;
pub mod model;
pub mod panel;
pub mod widget;

use anyhow::Context;
use log::{debug, info};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

pub use cli::{Cli, ColorMode, OutputFormat, cli_parse};
pub use config::{ConfigError, Messages, default_messages, load_messages};
pub use controller::{ActionItem, FilterAction, FilterInputItem, FilterSink};
pub use events::{Disposable, DisposableStore, Emitter, Subscription};
pub use filter::{FilterKeywords, FilterOptions};
pub use model::{Marker, MarkersError, MarkersModel, Severity, load_markers_from_path};
pub use panel::MarkersPanel;
pub use widget::{Container, InputBox, KeyCode, KeyboardEvent};

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub format: OutputFormat,
    pub quiet: bool,
}

fn render_panel(model: &MarkersModel, options: SessionOptions) -> String {
    match options.format {
        OutputFormat::Text => display::format_panel_text(model, options.quiet),
        OutputFormat::Json => format!("{}\n", display::format_panel_json(model)),
    }
}

/// Drive a filter box from `input`, one line per change, rendering the panel
/// to `output` initially and after every refresh.
///
/// Returns the number of refreshes. A line equal to the current text is not a
/// change and does not refresh. The first failed write ends the session.
pub fn run_session<R, W>(
    model: MarkersModel,
    messages: &Messages,
    options: SessionOptions,
    input: R,
    mut output: W,
) -> anyhow::Result<usize>
where
    R: BufRead,
    W: Write + 'static,
{
    output
        .write_all(render_panel(&model, options).as_bytes())
        .context("Failed to write output")?;

    let write_error: Rc<RefCell<Option<io::Error>>> = Rc::new(RefCell::new(None));
    let hook_error = Rc::clone(&write_error);
    let panel = Rc::new(RefCell::new(MarkersPanel::new(model).on_refresh(
        move |model| {
            if hook_error.borrow().is_some() {
                return;
            }
            let written = output
                .write_all(render_panel(model, options).as_bytes())
                .and_then(|()| output.flush());
            if let Err(err) = written {
                *hook_error.borrow_mut() = Some(err);
            }
        },
    )));

    let mut item = FilterInputItem::new(Rc::clone(&panel), messages)
        .context("Invalid filter messages")?;
    let mut toolbar = Container::with_class("markers-panel-actions");
    item.render(&mut toolbar);
    let filter_box = item
        .input_box()
        .cloned()
        .context("filter input box was not rendered")?;

    let result = input.lines().try_for_each(|line| {
        let line = line.context("Failed to read filter input")?;
        filter_box.set_value(&line);
        match write_error.borrow_mut().take() {
            Some(err) => Err::<(), _>(err).context("Failed to write output"),
            None => Ok(()),
        }
    });
    item.dispose();
    result?;

    let refreshes = panel.borrow().refresh_count();
    Ok(refreshes)
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let messages = load_messages(cli.messages.as_deref()).context("Failed to load messages")?;
    let markers = load_markers_from_path(&cli.markers)?;
    info!(
        "loaded {} markers from {}",
        markers.len(),
        cli.markers.display()
    );

    let options = SessionOptions {
        format: cli.format,
        quiet: cli.quiet,
    };
    let stdin = io::stdin();
    let refreshes = run_session(
        MarkersModel::new(markers),
        &messages,
        options,
        stdin.lock(),
        io::stdout(),
    )?;
    debug!("filter session ended after {} refreshes", refreshes);

    Ok(())
}
