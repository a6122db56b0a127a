//! The SimpleSearch widget: mount, load once, then react to events.
//!
//! Lifecycle:
//!
//! 1. [`SimpleSearch::mount`] looks up the input, wraps it in a container with
//!    an empty result list, then validates the settings. Problems are logged
//!    as a single diagnostic line and leave the widget [`WidgetState::Inert`].
//! 2. [`SimpleSearch::init`] fetches and parses the source page exactly once,
//!    applies the deep link, and binds events ([`WidgetState::Active`]).
//! 3. [`SimpleSearch::handle`] runs the filter and renders on input or
//!    pointer-enter, and clears the list on pointer-leave.

use std::fmt;

use crate::config::Settings;
use crate::error::{Result, SearchError};
use crate::fetch::{self, PageSource};
use crate::page::Page;
use crate::render;
use crate::scroll;
use crate::types::{CandidateItem, RenderedList};
use crate::{NAME, VERSION};

/// Class of the `div` wrapping the input and the result list.
pub const CONTAINER_CLASS: &str = "SimpleSearchContainer";

/// Class of the result `ul`.
pub const LIST_CLASS: &str = "SimpleSearchList";

const MISSING_INPUT: &str = "Search field could not be found, please check the selector!";

/// Events the host forwards to the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The input's value changed.
    Input,
    /// The pointer entered the input.
    PointerEnter,
    /// The pointer left the container.
    PointerLeave,
}

/// Where the widget is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetState {
    /// Validation failed at mount; the widget never does anything.
    Inert,
    /// Mounted and valid, waiting for [`SimpleSearch::init`].
    Ready,
    /// Source page loaded and events bound.
    Active,
    /// Loading the source page failed. Events stay unbound.
    Failed(String),
}

/// One widget instance. Owns its settings and the candidates of its source page.
#[derive(Debug, Clone)]
pub struct SimpleSearch<N> {
    settings: Settings,
    input: Option<N>,
    container: Option<N>,
    list: Option<N>,
    candidates: Vec<CandidateItem>,
    rendered: RenderedList,
    state: WidgetState,
}

/// Log the validation diagnostic: `SimpleSearch - <version>: <message>`.
fn error_message(message: &str) {
    tracing::error!("{NAME} - {VERSION}: {message}");
}

impl<N: Copy + Eq + fmt::Debug> SimpleSearch<N> {
    /// Mount a widget on the input matched by `input_selector`.
    ///
    /// Never fails: configuration problems are logged and leave the widget
    /// inert. When the input exists the page is scaffolded before `page` and
    /// `elements` are checked, so an invalid configuration still leaves the
    /// input wrapped in its container.
    pub fn mount<P: Page<Node = N>>(page: &mut P, input_selector: &str, settings: Settings) -> Self {
        let mut widget = Self {
            settings,
            input: None,
            container: None,
            list: None,
            candidates: Vec::new(),
            rendered: RenderedList::default(),
            state: WidgetState::Ready,
        };

        let input = match page.query_selector(input_selector) {
            Ok(Some(node)) => node,
            Ok(None) => return widget.inert(MISSING_INPUT),
            Err(e) => {
                tracing::debug!(selector = input_selector, error = %e, "input selector rejected");
                return widget.inert(MISSING_INPUT);
            }
        };
        widget.input = Some(input);

        if let Err(e) = widget.scaffold(page, input) {
            return widget.inert(&format!("Could not build the result list: {e}"));
        }

        match widget.settings.validate() {
            Ok(()) => {
                tracing::debug!(?input, "widget mounted");
                widget
            }
            Err(SearchError::Config(message)) => widget.inert(&message),
            Err(e) => widget.inert(&e.to_string()),
        }
    }

    fn inert(mut self, message: &str) -> Self {
        error_message(message);
        self.state = WidgetState::Inert;
        self
    }

    /// Wrap the input in a container and append the empty result list.
    fn scaffold<P: Page<Node = N>>(&mut self, page: &mut P, input: N) -> Result<()> {
        let container = page.create_element("div");
        page.set_attribute(container, "class", CONTAINER_CLASS)?;
        page.insert_after(input, container)?;
        page.append_child(container, input)?;
        self.container = Some(container);

        let list = page.create_element("ul");
        if let Some(placeholder) = &self.settings.placeholder {
            page.set_attribute(list, "placeholder", placeholder)?;
        }
        page.set_attribute(list, "class", LIST_CLASS)?;
        page.append_child(container, list)?;
        self.list = Some(list);
        Ok(())
    }

    /// Load the source page once, apply the deep link and bind events.
    ///
    /// Does nothing unless the widget is [`WidgetState::Ready`], so the page
    /// is fetched at most once per instance.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse error. The widget is then
    /// [`WidgetState::Failed`] and ignores events, as if it were never loaded.
    pub async fn init<P, S>(&mut self, page: &mut P, source: &S) -> Result<()>
    where
        P: Page<Node = N>,
        S: PageSource,
    {
        if self.state != WidgetState::Ready {
            tracing::debug!(state = ?self.state, "init skipped");
            return Ok(());
        }

        let location = page.location().clone();
        let fetched = match fetch::load_source(source, &location, &self.settings).await {
            Ok(fetched) => fetched,
            Err(e) => {
                tracing::warn!(error = %e, "source page could not be loaded; widget stays inactive");
                self.state = WidgetState::Failed(e.to_string());
                return Err(e);
            }
        };
        tracing::debug!(url = %fetched.url, title = %fetched.title, "source page loaded");
        self.candidates = fetched.candidates;

        if let Err(e) = scroll::apply_deep_link(page, &self.settings) {
            tracing::warn!(error = %e, "deep link skipped");
        }

        self.state = WidgetState::Active;
        tracing::debug!(candidates = self.candidates.len(), "widget active");
        Ok(())
    }

    /// React to a host event. Ignored unless the widget is [`WidgetState::Active`].
    ///
    /// # Errors
    ///
    /// Returns an error if the page rejects a list mutation.
    pub fn handle<P: Page<Node = N>>(&mut self, page: &mut P, event: WidgetEvent) -> Result<()> {
        if self.state != WidgetState::Active {
            tracing::trace!(?event, state = ?self.state, "event ignored");
            return Ok(());
        }
        match event {
            WidgetEvent::Input | WidgetEvent::PointerEnter => {
                let term = self
                    .input
                    .map(|input| page.input_value(input))
                    .unwrap_or_default();
                self.search_filter(page, &term)
            }
            WidgetEvent::PointerLeave => self.clear_filter(page),
        }
    }

    /// Clear the list, then render the result of filtering the candidates by `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page rejects a list mutation.
    pub fn search_filter<P: Page<Node = N>>(&mut self, page: &mut P, term: &str) -> Result<()> {
        let rendered = render::plan(term, &self.candidates, &self.settings);
        tracing::trace!(term, entries = rendered.len(), "filter");
        self.clear_filter(page)?;

        if let Some(list) = self.list {
            let source_page = self.settings.page().unwrap_or_default();
            render::render_list(page, list, &rendered, source_page)?;
        }
        self.rendered = rendered;
        Ok(())
    }

    /// Remove every entry from the result list. Safe on an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the page rejects the mutation.
    pub fn clear_filter<P: Page<Node = N>>(&mut self, page: &mut P) -> Result<()> {
        if let Some(list) = self.list {
            page.clear_children(list)?;
        }
        self.rendered.clear();
        Ok(())
    }

    /// Whether mount succeeded and the widget may be initialised or used.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, WidgetState::Ready | WidgetState::Active)
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn candidates(&self) -> &[CandidateItem] {
        &self.candidates
    }

    pub fn rendered(&self) -> &RenderedList {
        &self.rendered
    }

    pub fn input(&self) -> Option<N> {
        self.input
    }

    pub fn container(&self) -> Option<N> {
        self.container
    }

    pub fn list(&self) -> Option<N> {
        self.list
    }
}
