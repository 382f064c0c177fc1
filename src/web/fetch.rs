// Manifest source using the browser's fetch
use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use crate::application::manifest_source::{LoadError, ManifestSource};
use crate::domain::manifest::Manifest;

pub struct FetchManifestSource {
    url: String,
}

impl FetchManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn transport(&self, err: JsValue) -> LoadError {
        LoadError::Transport {
            location: self.url.clone(),
            reason: format!("{:?}", err),
        }
    }
}

#[async_trait(?Send)]
impl ManifestSource for FetchManifestSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Manifest, LoadError> {
        let window = web_sys::window().ok_or_else(|| self.transport(JsValue::from_str("no window")))?;

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);
        let request =
            Request::new_with_str_and_init(&self.url, &init).map_err(|e| self.transport(e))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .and_then(|value| value.dyn_into())
            .map_err(|e| self.transport(e))?;
        if !response.ok() {
            return Err(LoadError::Status {
                location: self.url.clone(),
                status: response.status(),
            });
        }

        let body = JsFuture::from(response.text().map_err(|e| self.transport(e))?)
            .await
            .map_err(|e| self.transport(e))?
            .as_string()
            .unwrap_or_default();
        Manifest::from_json(&body).map_err(|source| LoadError::Parse {
            location: self.url.clone(),
            source,
        })
    }
}
