// Manifest domain model - the `plots.json` document describing every section
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Top-level manifest. Parsing is best-effort: anything that is not a
/// `{ "sections": [...] }` object yields a manifest without sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    sections: Option<Vec<SectionSpec>>,
}

/// Why a manifest produced no sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeProblem {
    MissingSections,
    Empty,
}

impl Manifest {
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self {
            sections: Some(sections),
        }
    }

    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Value>(body).map(Self::from_value)
    }

    pub fn from_value(value: Value) -> Self {
        let sections = match value {
            Value::Object(mut root) => match root.remove("sections") {
                Some(Value::Array(entries)) => Some(
                    entries
                        .into_iter()
                        .enumerate()
                        .map(|(index, entry)| SectionSpec::from_entry(index, entry))
                        .collect(),
                ),
                _ => None,
            },
            _ => None,
        };
        Self { sections }
    }

    /// Usable section specs in manifest order, or the reason there are none.
    pub fn into_sections(self) -> Result<Vec<SectionSpec>, ShapeProblem> {
        match self.sections {
            None => Err(ShapeProblem::MissingSections),
            Some(sections) if sections.is_empty() => Err(ShapeProblem::Empty),
            Some(sections) => Ok(sections),
        }
    }
}

/// Keys read for each entry field, most preferred first. The pipeline
/// writes the short names; the descriptive ones are accepted as well.
const TITLE_KEYS: &[&str] = &["title"];
const CHART_KEYS: &[&str] = &["plotly", "chartSpec"];
const MARKUP_KEYS: &[&str] = &["html", "embeddedMarkup"];

/// One manifest entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionSpec {
    pub title: Option<String>,
    pub chart_spec: Option<ChartSpec>,
    pub embedded_markup: Option<String>,
}

/// Figure payload as produced by the notebook pipeline. Both halves are
/// opaque to the dashboard; `layout` is only merged, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub layout: Option<Value>,
}

/// Which render path a section takes. First match wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionContent<'a> {
    Chart(&'a ChartSpec),
    Markup(&'a str),
    Placeholder,
}

impl SectionSpec {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn from_entry(index: usize, entry: Value) -> Self {
        let Value::Object(mut fields) = entry else {
            tracing::warn!(position = index + 1, "manifest entry is not an object, rendering placeholder");
            return Self::default();
        };
        Self {
            title: first_readable(&mut fields, TITLE_KEYS),
            chart_spec: first_readable(&mut fields, CHART_KEYS),
            embedded_markup: first_readable(&mut fields, MARKUP_KEYS),
        }
    }

    /// Title if present and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Navigation label; `ordinal` is the 1-indexed manifest position.
    pub fn label(&self, ordinal: usize) -> String {
        match self.title() {
            Some(title) => title.to_string(),
            None => format!("Gráfico {}", ordinal),
        }
    }

    /// Text the base slug is derived from.
    pub fn slug_source(&self, ordinal: usize) -> String {
        match self.title() {
            Some(title) => title.to_string(),
            None => ordinal_slug(ordinal),
        }
    }

    pub fn content(&self) -> SectionContent<'_> {
        if let Some(chart) = self.chart_spec.as_ref().filter(|c| c.is_renderable()) {
            return SectionContent::Chart(chart);
        }
        match self.embedded_markup.as_deref() {
            Some(markup) if !markup.is_empty() => SectionContent::Markup(markup),
            _ => SectionContent::Placeholder,
        }
    }
}

impl ChartSpec {
    /// Both `data` and `layout` must be present and truthy.
    pub fn is_renderable(&self) -> bool {
        self.data.as_ref().is_some_and(truthy) && self.layout.as_ref().is_some_and(truthy)
    }
}

/// Truthiness as the page script sees it: `null`, `false`, `0` and `""`
/// count as absent; arrays and objects are present even when empty.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Fallback slug source for untitled entries, e.g. `grafico-3`.
pub fn ordinal_slug(ordinal: usize) -> String {
    format!("{}-{}", super::slug::PLACEHOLDER_SLUG, ordinal)
}

/// First key among `keys` whose value reads as `T`; wrong types are skipped.
fn first_readable<T: DeserializeOwned>(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<T> {
    keys.iter()
        .filter_map(|key| fields.remove(*key))
        .find_map(|value| serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_pipeline_keys() {
        let manifest = Manifest::from_json(
            r#"{"sections":[{"title":"Tasa","plotly":{"data":[{"y":[1,2]}],"layout":{"title":"x"}}},{"html":"<p>hi</p>"}]}"#,
        )
        .unwrap();
        let sections = manifest.into_sections().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title(), Some("Tasa"));
        assert!(matches!(sections[0].content(), SectionContent::Chart(_)));
        assert_eq!(sections[1].content(), SectionContent::Markup("<p>hi</p>"));
    }

    #[test]
    fn test_accepts_descriptive_aliases() {
        let manifest = Manifest::from_value(json!({
            "sections": [{"chartSpec": {"data": [], "layout": {}}, "embeddedMarkup": "<b>x</b>"}]
        }));
        let sections = manifest.into_sections().unwrap();
        assert!(matches!(sections[0].content(), SectionContent::Chart(_)));
    }

    #[test]
    fn test_entry_with_both_chart_keys_keeps_its_fields() {
        let manifest = Manifest::from_value(json!({
            "sections": [{
                "title": "Tasa",
                "plotly": {"data": [{"y": [1]}], "layout": {"title": "short"}},
                "chartSpec": {"data": [], "layout": {"title": "long"}},
                "html": "<p>a</p>",
                "embeddedMarkup": "<p>b</p>"
            }]
        }));
        let sections = manifest.into_sections().unwrap();
        assert_eq!(sections[0].title(), Some("Tasa"));
        assert_eq!(sections[0].embedded_markup.as_deref(), Some("<p>a</p>"));
        match sections[0].content() {
            SectionContent::Chart(chart) => assert_eq!(chart.layout, Some(json!({"title": "short"}))),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_preferred_key_falls_back_to_alias() {
        let manifest = Manifest::from_value(json!({
            "sections": [{"plotly": "oops", "chartSpec": {"data": [], "layout": {}}}]
        }));
        let sections = manifest.into_sections().unwrap();
        assert!(matches!(sections[0].content(), SectionContent::Chart(_)));
    }

    #[test]
    fn test_missing_or_malformed_sections() {
        assert_eq!(
            Manifest::from_value(json!({})).into_sections(),
            Err(ShapeProblem::MissingSections)
        );
        assert_eq!(
            Manifest::from_value(json!({"sections": "nope"})).into_sections(),
            Err(ShapeProblem::MissingSections)
        );
        assert_eq!(
            Manifest::from_value(json!([1, 2])).into_sections(),
            Err(ShapeProblem::MissingSections)
        );
        assert_eq!(
            Manifest::from_value(json!({"sections": []})).into_sections(),
            Err(ShapeProblem::Empty)
        );
        assert!(Manifest::from_json("{not json").is_err());
    }

    #[test]
    fn test_bad_entries_degrade_to_placeholder() {
        let manifest = Manifest::from_value(json!({
            "sections": [null, 7, {"title": 12, "plotly": "oops", "html": ""}]
        }));
        let sections = manifest.into_sections().unwrap();
        assert_eq!(sections.len(), 3);
        for spec in &sections {
            assert_eq!(spec.content(), SectionContent::Placeholder);
            assert_eq!(spec.title(), None);
        }
    }

    #[test]
    fn test_chart_needs_data_and_layout() {
        let missing_layout = SectionSpec {
            chart_spec: Some(ChartSpec {
                data: Some(json!([])),
                layout: None,
            }),
            embedded_markup: Some("<i>fallback</i>".to_string()),
            ..SectionSpec::default()
        };
        assert_eq!(missing_layout.content(), SectionContent::Markup("<i>fallback</i>"));

        let null_data = SectionSpec {
            chart_spec: Some(ChartSpec {
                data: Some(Value::Null),
                layout: Some(json!({})),
            }),
            ..SectionSpec::default()
        };
        assert_eq!(null_data.content(), SectionContent::Placeholder);
    }

    #[test]
    fn test_falsy_chart_halves_are_absent() {
        let zero_data = Manifest::from_value(json!({
            "sections": [
                {"plotly": {"data": 0, "layout": {}}, "html": "<i>fallback</i>"},
                {"plotly": {"data": [], "layout": ""}},
                {"plotly": {"data": false, "layout": {}}},
                {"plotly": {"data": "x", "layout": 1}}
            ]
        }))
        .into_sections()
        .unwrap();
        assert_eq!(zero_data[0].content(), SectionContent::Markup("<i>fallback</i>"));
        assert_eq!(zero_data[1].content(), SectionContent::Placeholder);
        assert_eq!(zero_data[2].content(), SectionContent::Placeholder);
        assert!(matches!(zero_data[3].content(), SectionContent::Chart(_)));
    }

    #[test]
    fn test_label_and_slug_source_fallbacks() {
        let untitled = SectionSpec::default();
        assert_eq!(untitled.label(3), "Gráfico 3");
        assert_eq!(untitled.slug_source(3), "grafico-3");

        let empty = SectionSpec::titled("");
        assert_eq!(empty.label(1), "Gráfico 1");

        let titled = SectionSpec::titled("Ocupados");
        assert_eq!(titled.label(9), "Ocupados");
        assert_eq!(titled.slug_source(9), "Ocupados");
    }
}
