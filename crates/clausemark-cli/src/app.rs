use clausemark_engine::{LoadOptions, TermMarker, ViewEvent, ViewState, ViewUpdate, io};
use log::warn;
use ratatui::widgets::ListState;
use std::path::{Path, PathBuf};

use crate::settings::{Check, apply_checks};

pub struct App {
    document_path: PathBuf,
    options: LoadOptions,
    checks: Vec<Check>,
    pub view: ViewState,
    pub control_state: ListState,
    /// Term markers of the visible clauses, refreshed whenever visibility changes.
    pub markers: Vec<TermMarker>,
    pub focused_marker: Option<usize>,
    pub scroll: u16,
    pub status: Option<String>,
}

impl App {
    pub fn new(document_path: PathBuf, options: LoadOptions, checks: Vec<Check>) -> Self {
        let mut app = Self {
            document_path,
            options,
            checks,
            view: ViewState::empty(),
            control_state: ListState::default(),
            markers: Vec::new(),
            focused_marker: None,
            scroll: 0,
            status: None,
        };
        app.reload();
        app
    }

    /// Fetches the document again and replaces the whole view state. A failed
    /// fetch leaves the empty view.
    pub fn reload(&mut self) {
        match io::load_view(&self.document_path, &self.options) {
            Ok(mut view) => {
                apply_checks(&mut view, &self.checks);
                self.view = view;
                self.status = None;
            }
            Err(e) => {
                warn!("Failed to load {}: {e}", self.document_path.display());
                self.view = ViewState::empty();
                self.status = Some(format!("Error loading document: {e}"));
            }
        }

        let first = (!self.view.controls().is_empty()).then_some(0);
        self.control_state.select(first);
        self.refresh_markers();
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn next_control(&mut self) {
        let len = self.view.controls().len();
        if len == 0 {
            return;
        }
        let i = match self.control_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.control_state.select(Some(i));
    }

    pub fn previous_control(&mut self) {
        let len = self.view.controls().len();
        if len == 0 {
            return;
        }
        let i = match self.control_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.control_state.select(Some(i));
    }

    pub fn toggle_selected_control(&mut self) {
        let Some(control) = self
            .control_state
            .selected()
            .and_then(|i| self.view.controls().get(i))
        else {
            return;
        };
        let event = ViewEvent::Toggle {
            dimension: control.dimension.clone(),
            value: control.value.clone(),
        };
        if self.view.apply(event) == ViewUpdate::Visibility {
            self.scroll = 0;
            self.refresh_markers();
        }
    }

    pub fn next_term(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let i = match self.focused_marker {
            Some(i) => (i + 1) % self.markers.len(),
            None => 0,
        };
        self.focus_term(i);
    }

    pub fn previous_term(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let i = match self.focused_marker {
            Some(0) | None => self.markers.len() - 1,
            Some(i) => i - 1,
        };
        self.focus_term(i);
    }

    pub fn leave_term(&mut self) {
        self.focused_marker = None;
        self.view.apply(ViewEvent::HoverLeave);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(5);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(5);
    }

    fn focus_term(&mut self, index: usize) {
        let Some(marker) = self.markers.get(index) else {
            return;
        };
        let term = marker.term.key.clone();
        self.focused_marker = Some(index);
        self.view.apply(ViewEvent::HoverEnter { term });
    }

    fn refresh_markers(&mut self) {
        self.markers = self.view.term_markers();
        self.leave_term();
    }
}
