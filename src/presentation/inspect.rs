// Headless build report for `chart-deck inspect`
use serde::Serialize;
use std::rc::Rc;

use crate::application::dashboard_service::DashboardService;
use crate::application::manifest_source::ManifestSource;
use crate::domain::layout::Figure;
use crate::domain::section::{ContentKind, Section};
use crate::infrastructure::headless_renderer::HeadlessRenderer;
use crate::infrastructure::memory_document::{MemoryDocument, MemoryScheduler};

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub manifest: String,
    pub active: Option<String>,
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub id: String,
    pub label: String,
    pub content: ContentKind,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
}

/// Load the manifest and run the whole build against an in-memory page.
pub async fn inspect(source: &dyn ManifestSource) -> InspectReport {
    let document = Rc::new(MemoryDocument::new());
    let renderer = Rc::new(HeadlessRenderer::new());
    let scheduler = Rc::new(MemoryScheduler::new());
    let service = DashboardService::new(document.clone(), renderer.clone(), scheduler.clone());

    let sections = service.build(source.load().await).await;
    service.settle_after_paint();
    scheduler.run_frames();
    scheduler.run_deferred();

    let active = document.active_section_ids();
    InspectReport {
        manifest: source.location().to_string(),
        active: active.first().cloned(),
        sections: sections
            .into_iter()
            .map(|section| section_report(section, &document, &renderer, &active))
            .collect(),
    }
}

fn section_report(
    section: Section,
    document: &MemoryDocument,
    renderer: &HeadlessRenderer,
    active: &[String],
) -> SectionReport {
    SectionReport {
        active: active.contains(&section.id),
        markup: document.chart_markup(&section.id),
        figure: renderer.figure(&section.id),
        id: section.id,
        label: section.label,
        content: section.content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::manifest_source::LoadError;
    use crate::domain::manifest::Manifest;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticSource(serde_json::Value);

    #[async_trait(?Send)]
    impl ManifestSource for StaticSource {
        fn location(&self) -> &str {
            "memory"
        }

        async fn fetch(&self) -> Result<Manifest, LoadError> {
            Ok(Manifest::from_value(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn test_report_lists_sections_and_figures() {
        let source = StaticSource(json!({
            "sections": [
                {"title": "Tasa de desocupación", "plotly": {"data": [{"y": [7.1, 6.8]}], "layout": {}}},
                {"title": "Notas", "html": "<p>Fuente: INE</p>"}
            ]
        }));
        let report = inspect(&source).await;

        assert_eq!(report.manifest, "memory");
        assert_eq!(report.active.as_deref(), Some("tasa-de-desocupacion"));
        assert_eq!(report.sections.len(), 2);
        assert!(report.sections[0].active);
        assert!(!report.sections[1].active);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["sections"][0]["content"], "chart");
        assert_eq!(value["sections"][0]["figure"]["layout"]["hovermode"], "x unified");
        assert_eq!(value["sections"][0]["figure"]["config"]["displaylogo"], false);
        assert_eq!(value["sections"][1]["markup"], "<p>Fuente: INE</p>");
        assert!(value["sections"][1].get("figure").is_none());
    }

    #[tokio::test]
    async fn test_empty_manifest_reports_nothing() {
        let report = inspect(&StaticSource(json!({"sections": []}))).await;
        assert!(report.sections.is_empty());
        assert_eq!(report.active, None);
    }
}
