//! Homepage runtime. Every handler takes `&mut self` and runs to
//! completion, so events are processed strictly one after another.

use std::sync::Arc;

use tracing::{debug, error};

use crate::{
    application::error::error_chain,
    infra::telemetry::{LOAD_FAILURES_TOTAL, SEARCHES_TOTAL},
};

use super::{
    error::RenderError,
    loader::ContentLoader,
    page::{PageComposer, PageComposition},
    panel::{Navigation, SearchPanel},
    search::{SearchType, search},
    sections::{RenderedSection, Section, SectionRenderer},
    state::AppState,
};

/// Where a click landed relative to the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SearchForm,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

pub struct Homepage {
    renderer: SectionRenderer,
    composer: PageComposer,
    state: Option<Arc<AppState>>,
    sections: Vec<RenderedSection>,
    panel: Option<SearchPanel>,
}

impl Homepage {
    pub fn new(renderer: SectionRenderer, composer: PageComposer) -> Self {
        Self {
            renderer,
            composer,
            state: None,
            sections: Vec::new(),
            panel: None,
        }
    }

    /// Load both documents and render the sections. Failures are logged
    /// and leave the page in its pre-load state.
    pub async fn load(&mut self, loader: &ContentLoader) -> LoadOutcome {
        let result = match loader.load().await {
            Ok(state) => self.install(Arc::new(state)).map_err(|err| {
                error!(
                    target = "frontpage::homepage",
                    error = %err,
                    causes = ?error_chain(&err),
                    "Error rendering content sections"
                );
            }),
            Err(err) => {
                error!(
                    target = "frontpage::homepage",
                    error = %err,
                    causes = ?error_chain(&err),
                    "Error loading content data"
                );
                Err(())
            }
        };

        match result {
            Ok(()) => LoadOutcome::Loaded,
            Err(()) => {
                metrics::counter!(LOAD_FAILURES_TOTAL).increment(1);
                LoadOutcome::Failed
            }
        }
    }

    /// Install loaded documents and render every bootstrap section once.
    /// Nothing is installed when a section fails to render.
    pub fn install(&mut self, state: Arc<AppState>) -> Result<(), RenderError> {
        let mut sections = Vec::new();
        for section in Section::bootstrap_order() {
            if let Some(rendered) = self.renderer.render(*section, &state)? {
                sections.push(rendered);
            }
        }

        self.sections = sections;
        self.state = Some(state);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    pub fn sections(&self) -> &[RenderedSection] {
        &self.sections
    }

    pub fn panel(&self) -> Option<&SearchPanel> {
        self.panel.as_ref()
    }

    /// Search form submission. Blank queries and submissions before the
    /// documents have loaded do nothing.
    pub fn submit(&mut self, query: &str, search_type: SearchType) -> Option<&SearchPanel> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let state = self.state.as_ref()?;

        let results = search(&state.store, query, search_type);
        metrics::counter!(SEARCHES_TOTAL, "type" => search_type.as_str()).increment(1);
        debug!(
            target = "frontpage::search",
            query,
            search_type = search_type.as_str(),
            results = results.len(),
            "Search submitted"
        );

        let panel = self.panel.get_or_insert_with(SearchPanel::new);
        panel.populate(&results, query, &state.links);
        Some(&*panel)
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Outside
            && let Some(panel) = self.panel.as_mut()
        {
            panel.dismiss();
        }
    }

    pub fn focus_search(&mut self) {
        if let Some(panel) = self.panel.as_mut() {
            panel.reveal();
        }
    }

    pub fn hover_result(&mut self, row: usize) {
        if let Some(panel) = self.panel.as_mut() {
            panel.hover(row);
        }
    }

    pub fn leave_result(&mut self, row: usize) {
        if let Some(panel) = self.panel.as_mut() {
            panel.leave(row);
        }
    }

    /// Click on a result row. Rows sit inside the search form, so the
    /// panel stays open.
    pub fn click_result(&mut self, row: usize) -> Option<Navigation> {
        self.click(ClickTarget::SearchForm);
        self.panel.as_ref()?.click(row)
    }

    /// Current page: the host markup with bootstrap adjustments, rendered
    /// sections and, once a search ran, the results panel.
    pub fn compose(&self, host: &str) -> Result<String, RenderError> {
        let panel = self.panel.as_ref().map(SearchPanel::render).transpose()?;
        self.composer.compose(
            host,
            &PageComposition {
                sections: &self.sections,
                panel: panel.as_deref(),
            },
        )
    }
}
