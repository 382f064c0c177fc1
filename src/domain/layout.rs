// Layout composition - manifest layout merged with the house chart style
use serde::Serialize;
use serde_json::{Map, Value};

use super::manifest::ChartSpec;

/// Toolbar buttons that are always removed.
pub const REMOVED_MODEBAR_BUTTONS: &[&str] = &[
    "lasso2d",
    "select2d",
    "toggleSpikelines",
    "autoScale2d",
    "zoomIn2d",
    "zoomOut2d",
];

/// Literal values usable in the override table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideValue {
    Str(&'static str),
    Int(i64),
    Bool(bool),
    Object(&'static [(&'static str, OverrideValue)]),
}

impl OverrideValue {
    pub fn to_value(&self) -> Value {
        match *self {
            OverrideValue::Str(s) => Value::from(s),
            OverrideValue::Int(n) => Value::from(n),
            OverrideValue::Bool(b) => Value::from(b),
            OverrideValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_value()))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Manifest value wins unless it is absent or null.
    Fallback,
    /// Override always wins.
    Force,
}

/// One row of the merge table. `path` addresses a key inside the layout;
/// intermediate objects keep every other field the manifest supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOverride {
    pub path: &'static [&'static str],
    pub value: OverrideValue,
    pub precedence: Precedence,
}

const fn force(path: &'static [&'static str], value: OverrideValue) -> LayoutOverride {
    LayoutOverride {
        path,
        value,
        precedence: Precedence::Force,
    }
}

/// Unified hover cursor with vertical spikelines across the plot area.
pub const LAYOUT_OVERRIDES: &[LayoutOverride] = &[
    LayoutOverride {
        path: &["hovermode"],
        value: OverrideValue::Str("x unified"),
        precedence: Precedence::Fallback,
    },
    force(
        &["hoverlabel"],
        OverrideValue::Object(&[
            ("align", OverrideValue::Str("left")),
            ("bgcolor", OverrideValue::Str("white")),
            ("bordercolor", OverrideValue::Str("#E5E5E5")),
            (
                "font",
                OverrideValue::Object(&[("family", OverrideValue::Str("Georgia, serif"))]),
            ),
        ]),
    ),
    // -1 disables the distance cutoff
    force(&["spikedistance"], OverrideValue::Int(-1)),
    force(&["xaxis", "showspikes"], OverrideValue::Bool(true)),
    force(&["xaxis", "spikemode"], OverrideValue::Str("across")),
    force(&["xaxis", "spikesnap"], OverrideValue::Str("cursor")),
    force(&["xaxis", "spikethickness"], OverrideValue::Int(1)),
    force(&["xaxis", "spikecolor"], OverrideValue::Str("#9E9E9E")),
    force(&["yaxis", "showspikes"], OverrideValue::Bool(false)),
    force(&["paper_bgcolor"], OverrideValue::Str("white")),
    force(&["plot_bgcolor"], OverrideValue::Str("white")),
];

impl LayoutOverride {
    pub fn apply(&self, root: &mut Map<String, Value>) {
        let Some((leaf, parents)) = self.path.split_last() else {
            return;
        };

        let mut target = root;
        for key in parents {
            let slot = target
                .entry(*key)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            target = next;
        }

        match self.precedence {
            Precedence::Force => {
                target.insert(leaf.to_string(), self.value.to_value());
            }
            Precedence::Fallback => {
                if target.get(*leaf).is_none_or(|v| v.is_null()) {
                    target.insert(leaf.to_string(), self.value.to_value());
                }
            }
        }
    }
}

/// Merge `base` with [`LAYOUT_OVERRIDES`]. A missing or non-object base is
/// treated as `{}`.
pub fn compose_layout(base: Option<&Value>) -> Value {
    compose_with(base, LAYOUT_OVERRIDES)
}

pub fn compose_with(base: Option<&Value>, overrides: &[LayoutOverride]) -> Value {
    let mut layout = match base {
        Some(Value::Object(fields)) => fields.clone(),
        _ => Map::new(),
    };
    for rule in overrides {
        rule.apply(&mut layout);
    }
    Value::Object(layout)
}

/// Non-layout options passed alongside every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub responsive: bool,
    pub displaylogo: bool,
    pub mode_bar_buttons_to_remove: &'static [&'static str],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            displaylogo: false,
            mode_bar_buttons_to_remove: REMOVED_MODEBAR_BUTTONS,
        }
    }
}

/// Everything the charting library needs for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Value,
    pub layout: Value,
    pub config: RenderOptions,
}

impl Figure {
    /// `None` unless the chart carries both data and layout.
    pub fn compose(spec: &ChartSpec) -> Option<Self> {
        if !spec.is_renderable() {
            return None;
        }
        Some(Self {
            data: spec.data.clone().unwrap_or(Value::Null),
            layout: compose_layout(spec.layout.as_ref()),
            config: RenderOptions::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_empty_layout_gets_full_style() {
        let layout = compose_layout(None);
        assert_eq!(
            layout,
            json!({
                "hovermode": "x unified",
                "hoverlabel": {
                    "align": "left",
                    "bgcolor": "white",
                    "bordercolor": "#E5E5E5",
                    "font": {"family": "Georgia, serif"}
                },
                "spikedistance": -1,
                "xaxis": {
                    "showspikes": true,
                    "spikemode": "across",
                    "spikesnap": "cursor",
                    "spikethickness": 1,
                    "spikecolor": "#9E9E9E"
                },
                "yaxis": {"showspikes": false},
                "paper_bgcolor": "white",
                "plot_bgcolor": "white"
            })
        );
    }

    #[test]
    fn test_manifest_hovermode_is_kept() {
        let layout = compose_layout(Some(&json!({"hovermode": "closest"})));
        assert_eq!(layout["hovermode"], "closest");

        let layout = compose_layout(Some(&json!({"hovermode": null})));
        assert_eq!(layout["hovermode"], "x unified");
    }

    #[test]
    fn test_forced_fields_beat_manifest() {
        let base = json!({
            "spikedistance": 20,
            "yaxis": {"showspikes": true, "title": {"text": "%"}},
            "paper_bgcolor": "black",
            "plot_bgcolor": "#111",
            "hoverlabel": {"bgcolor": "black", "namelength": -1}
        });
        let layout = compose_layout(Some(&base));
        assert_eq!(layout["spikedistance"], -1);
        assert_eq!(layout["yaxis"], json!({"showspikes": false, "title": {"text": "%"}}));
        assert_eq!(layout["paper_bgcolor"], "white");
        assert_eq!(layout["plot_bgcolor"], "white");
        assert_eq!(layout["hoverlabel"]["bgcolor"], "white");
        assert!(layout["hoverlabel"].get("namelength").is_none());
    }

    #[test]
    fn test_xaxis_passthrough_with_forced_spikes() {
        let base = json!({
            "title": {"text": "Desocupación"},
            "xaxis": {"title": "Año", "showspikes": false, "spikecolor": "red", "tickangle": 45}
        });
        let layout = compose_layout(Some(&base));
        assert_eq!(
            layout["xaxis"],
            json!({
                "title": "Año",
                "showspikes": true,
                "spikecolor": "#9E9E9E",
                "tickangle": 45,
                "spikemode": "across",
                "spikesnap": "cursor",
                "spikethickness": 1
            })
        );
        assert_eq!(layout["title"], json!({"text": "Desocupación"}));
    }

    #[test]
    fn test_non_object_inputs_are_replaced() {
        let layout = compose_layout(Some(&json!("not a layout")));
        assert_eq!(layout["plot_bgcolor"], "white");

        let layout = compose_layout(Some(&json!({"xaxis": 3})));
        assert_eq!(layout["xaxis"]["showspikes"], true);
    }

    #[test]
    fn test_manifest_key_order_is_preserved() {
        let layout = compose_layout(Some(&json!({"width": 800, "paper_bgcolor": "red", "height": 400})));
        let keys: Vec<&str> = layout.as_object().unwrap().keys().map(String::as_str).take(3).collect();
        assert_eq!(keys, vec!["width", "paper_bgcolor", "height"]);
    }

    #[test]
    fn test_render_options_serialize_for_plotly() {
        let options = serde_json::to_value(RenderOptions::default()).unwrap();
        assert_eq!(
            options,
            json!({
                "responsive": true,
                "displaylogo": false,
                "modeBarButtonsToRemove": [
                    "lasso2d", "select2d", "toggleSpikelines", "autoScale2d", "zoomIn2d", "zoomOut2d"
                ]
            })
        );
    }

    #[test]
    fn test_figure_requires_data_and_layout() {
        let spec = ChartSpec {
            data: Some(json!([{"x": [1], "y": [2]}])),
            layout: Some(json!({})),
        };
        let figure = Figure::compose(&spec).unwrap();
        assert_eq!(figure.data, json!([{"x": [1], "y": [2]}]));
        assert_eq!(figure.layout["hovermode"], "x unified");

        assert!(Figure::compose(&ChartSpec::default()).is_none());
    }

    #[test]
    fn test_custom_table() {
        const TABLE: &[LayoutOverride] = &[LayoutOverride {
            path: &["margin", "t"],
            value: OverrideValue::Int(40),
            precedence: Precedence::Fallback,
        }];
        let layout = compose_with(Some(&json!({"margin": {"l": 10}})), TABLE);
        assert_eq!(layout, json!({"margin": {"l": 10, "t": 40}}));
    }
}
