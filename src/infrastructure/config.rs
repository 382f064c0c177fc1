use serde::Deserialize;

/// Runtime settings. Every field has a default so a missing file or a
/// partial one is fine.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Manifest path or URL, relative to the page when fetched in a browser.
    pub manifest: String,
    /// Directory served by `chart-deck serve`.
    pub site_dir: String,
    pub bind: String,
    pub elements: ElementIds,
}

/// Ids of the elements the page must provide.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ElementIds {
    pub nav: String,
    pub sections: String,
    pub modal: String,
    pub title_input: String,
    pub subtitle_input: String,
    pub footer_input: String,
    pub main_title: String,
    pub subtitle: String,
    pub footer_text: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            manifest: "plots.json".to_string(),
            site_dir: "docs".to_string(),
            bind: "127.0.0.1:8080".to_string(),
            elements: ElementIds::default(),
        }
    }
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            nav: "nav-links".to_string(),
            sections: "dynamic-sections".to_string(),
            modal: "configModal".to_string(),
            title_input: "title-input".to_string(),
            subtitle_input: "subtitle-input".to_string(),
            footer_input: "footer-input".to_string(),
            main_title: "main-title".to_string(),
            subtitle: "subtitle".to_string(),
            footer_text: "footer-text".to_string(),
        }
    }
}

/// Load `config/dashboard.{toml,json,yaml}` (optional) overlaid with
/// `CHART_DECK__*` environment variables.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    load_dashboard_config_from("config/dashboard")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dashboard_config_from(base: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(base).required(false))
        .add_source(config::Environment::with_prefix("CHART_DECK").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
