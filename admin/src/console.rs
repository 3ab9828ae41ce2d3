use crate::ui::{Availability, ControlState, Field, Presenter, ResultArea, Status};
use gpmf_common::chain::ExplorerLinks;
use log::Level;
use std::{
    collections::HashMap,
    io::{stdout, Write},
    sync::Mutex,
};
use strum::IntoEnumIterator;

// Presenter writing through the logger and remembering the last value of every field.
// Alerts and results the logger would drop are written to `output` instead.
pub struct ConsolePresenter {
    fields: Mutex<HashMap<Field, String>>,
    controls: Mutex<ControlState>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::with_output(Box::new(stdout()))
    }
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output: Box<dyn Write + Send>) -> Self {
        Self {
            fields: Mutex::new(HashMap::new()),
            controls: Mutex::new(ControlState::default()),
            output: Mutex::new(output),
        }
    }

    // Every field in display order, "-" when never set
    pub fn render_fields(&self) -> Vec<String> {
        let fields = self.fields.lock().unwrap_or_else(|e| e.into_inner());
        Field::iter()
            .map(|field| format!("{}: {}", field, fields.get(&field).map(String::as_str).unwrap_or("-")))
            .collect()
    }

    pub fn render_controls(&self) -> Vec<String> {
        let controls = *self.controls.lock().unwrap_or_else(|e| e.into_inner());
        controls
            .all()
            .into_iter()
            .map(|(control, availability)| match availability {
                Availability::Enabled => format!("{}: enabled", control),
                other => format!("{}: disabled ({})", control, other),
            })
            .collect()
    }

    // Messages the operator must see whatever the configured log level
    fn emit(&self, level: Level, message: &str) {
        if log::log_enabled!(level) {
            log::log!(level, "{}", message);
            return;
        }

        let mut output = self.output.lock().unwrap_or_else(|e| e.into_inner());
        if writeln!(output, "{}", message).and_then(|_| output.flush()).is_err() {
            eprintln!("{}", message);
        }
    }
}

impl Presenter for ConsolePresenter {
    fn set_text(&self, field: Field, text: &str) {
        let previous = self
            .fields
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(field, text.to_owned());

        // only changes are worth a line, `status` shows everything
        if previous.as_deref() != Some(text) && log::log_enabled!(Level::Info) {
            log::info!("{}: {}", field, text);
        }
    }

    fn show_result(&self, area: ResultArea, text: &str, status: Status) {
        let level = match status {
            Status::Failure => Level::Warn,
            _ => Level::Info,
        };
        self.emit(level, &format!("[{}]\n{}", area, text));
    }

    fn set_links(&self, links: &ExplorerLinks) {
        if log::log_enabled!(Level::Info) {
            log::info!("Contract: {}", links.contract);
            log::info!("Token tracker: {}", links.token_tracker);
            log::info!("Holders: {}", links.holders);
        }
    }

    fn apply_controls(&self, state: &ControlState) {
        *self.controls.lock().unwrap_or_else(|e| e.into_inner()) = *state;
    }

    fn alert(&self, message: &str) {
        self.emit(Level::Info, message);
    }
}
