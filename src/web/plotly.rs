// Chart renderer backed by the page's global `Plotly`
use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect, JSON};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use std::rc::Rc;
use web_sys::Element;

use super::dom::WebDocument;
use crate::application::chart_renderer::{ChartError, ChartRenderer};
use crate::domain::layout::Figure;

pub struct PlotlyRenderer {
    document: Rc<WebDocument>,
}

impl PlotlyRenderer {
    pub fn new(document: Rc<WebDocument>) -> Self {
        Self { document }
    }

    fn container(&self, target: &str) -> Result<Element, ChartError> {
        self.document
            .chart_container(target)
            .ok_or_else(|| ChartError::MissingContainer(target.to_string()))
    }
}

fn plotly() -> Option<JsValue> {
    let window = web_sys::window()?;
    let plotly = Reflect::get(&window, &JsValue::from_str("Plotly")).ok()?;
    if plotly.is_undefined() || plotly.is_null() {
        None
    } else {
        Some(plotly)
    }
}

fn method(object: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(object, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("`{}` is not a function", name)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
    JSON::parse(&text)
}

fn reason(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

#[async_trait(?Send)]
impl ChartRenderer for PlotlyRenderer {
    fn is_available(&self) -> bool {
        plotly().is_some()
    }

    async fn render(&self, target: &str, figure: &Figure) -> Result<(), ChartError> {
        let plotly = plotly().ok_or(ChartError::Unavailable)?;
        let container = self.container(target)?;
        let failed = |err: JsValue| ChartError::Render {
            target: target.to_string(),
            reason: reason(err),
        };

        let new_plot = method(&plotly, "newPlot").map_err(failed)?;
        let args = Array::of4(
            &container,
            &to_js(&figure.data).map_err(failed)?,
            &to_js(&figure.layout).map_err(failed)?,
            &to_js(&figure.config).map_err(failed)?,
        );
        let completion = new_plot.apply(&plotly, &args).map_err(failed)?;
        JsFuture::from(Promise::resolve(&completion))
            .await
            .map_err(failed)?;
        Ok(())
    }

    fn resize(&self, target: &str) -> Result<(), ChartError> {
        let plotly = plotly().ok_or(ChartError::Unavailable)?;
        let container = self.container(target)?;
        let failed = |err: JsValue| ChartError::Resize {
            target: target.to_string(),
            reason: reason(err),
        };

        let plots = Reflect::get(&plotly, &JsValue::from_str("Plots")).map_err(failed)?;
        let resize = method(&plots, "resize").map_err(failed)?;
        resize.call1(&plots, &container).map_err(failed)?;
        Ok(())
    }
}
