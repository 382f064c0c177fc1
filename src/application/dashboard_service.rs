// Dashboard service - Builds sections from the manifest and keeps one visible
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::application::chart_renderer::ChartRenderer;
use crate::application::document_host::{DocumentHost, FrameScheduler};
use crate::application::resize_sync::ResizeSynchronizer;
use crate::domain::layout::Figure;
use crate::domain::manifest::{ordinal_slug, Manifest, SectionContent, SectionSpec};
use crate::domain::section::{ContentKind, IdAllocator, Section};
use crate::domain::slug::slugify;
use crate::domain::visibility::VisibilityController;

/// Shown in sections with neither chart data nor embedded markup.
pub const PLACEHOLDER_MARKUP: &str =
    r#"<div class="chart-placeholder">No hay datos para este gráfico.</div>"#;

pub struct DashboardService {
    document: Rc<dyn DocumentHost>,
    renderer: Rc<dyn ChartRenderer>,
    resize: ResizeSynchronizer,
    visibility: RefCell<VisibilityController>,
}

impl DashboardService {
    pub fn new(
        document: Rc<dyn DocumentHost>,
        renderer: Rc<dyn ChartRenderer>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> Rc<Self> {
        let resize = ResizeSynchronizer::new(Rc::clone(&renderer), scheduler);
        Rc::new(Self {
            document,
            renderer,
            resize,
            visibility: RefCell::new(VisibilityController::new()),
        })
    }

    /// Build one section per manifest entry, in manifest order, then show the
    /// first one. A missing or empty manifest leaves the dashboard empty.
    pub async fn build(self: &Rc<Self>, manifest: Option<Manifest>) -> Vec<Section> {
        if !self.document.has_containers() {
            tracing::warn!("navigation or sections container missing, nothing to build");
            return Vec::new();
        }

        let specs = match manifest.map(Manifest::into_sections) {
            Some(Ok(specs)) => specs,
            Some(Err(problem)) => {
                tracing::warn!(?problem, "no visualizations found in manifest");
                return Vec::new();
            }
            None => {
                tracing::warn!("no visualizations found, manifest was not loaded");
                return Vec::new();
            }
        };

        let mut ids = IdAllocator::new();
        let mut sections = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let ordinal = index + 1;
            let id = ids.allocate(&base_slug(spec, ordinal));
            let label = spec.label(ordinal);

            self.document
                .append_nav_control(&id, &label, self.click_handler(&id));
            self.document.append_section(&id, &label);

            let content = self.render_content(&id, spec).await;
            sections.push(Section::new(id, label, content));
        }

        if let Some(first) = ids.first() {
            self.activate(first);
        }

        tracing::info!(sections = sections.len(), "dashboard built");
        sections
    }

    /// Mark exactly the nodes bound to `id` as active and re-flow its chart.
    pub fn activate(&self, id: &str) {
        let visibility = {
            let mut visibility = self.visibility.borrow_mut();
            visibility.activate(id);
            visibility.clone()
        };

        let matched = self
            .document
            .sync_active(&|bound| visibility.is_active(bound));
        if !matched {
            tracing::debug!(id, "activated id matches no section");
            return;
        }
        if let Some(chart) = self.document.active_chart() {
            self.resize.remeasure(&chart);
        }
    }

    /// Last requested active id.
    pub fn active(&self) -> Option<String> {
        self.visibility.borrow().active().map(str::to_string)
    }

    /// One more re-measure of the active chart after the first paint.
    pub fn settle_after_paint(&self) {
        if let Some(chart) = self.document.active_chart() {
            self.resize.remeasure_after_paint(&chart);
        }
    }

    fn click_handler(self: &Rc<Self>, id: &str) -> Box<dyn Fn()> {
        let service: Weak<Self> = Rc::downgrade(self);
        let id = id.to_string();
        Box::new(move || {
            if let Some(service) = service.upgrade() {
                service.activate(&id);
            }
        })
    }

    async fn render_content(&self, id: &str, spec: &SectionSpec) -> ContentKind {
        let content = spec.content();
        match content {
            SectionContent::Chart(chart) => {
                if let Some(figure) = Figure::compose(chart) {
                    self.render_chart(id, &figure).await;
                }
            }
            SectionContent::Markup(markup) => self.document.set_chart_markup(id, markup),
            SectionContent::Placeholder => self.document.set_chart_markup(id, PLACEHOLDER_MARKUP),
        }
        ContentKind::from(content)
    }

    async fn render_chart(&self, id: &str, figure: &Figure) {
        match self.renderer.render(id, figure).await {
            Ok(()) => {
                self.resize.attach(id);
                self.resize.remeasure(id);
            }
            Err(err) => {
                tracing::warn!(section = id, error = %err, "chart could not be rendered");
            }
        }
    }
}

/// Slug of the title, or of the ordinal fallback when the title is missing
/// or slugs to nothing.
fn base_slug(spec: &SectionSpec, ordinal: usize) -> String {
    let slug = slugify(&spec.slug_source(ordinal));
    if slug.is_empty() {
        ordinal_slug(ordinal)
    } else {
        slug
    }
}
