// Configuration modal - copies form text into the page header and footer
use crate::application::document_host::ConfigSurface;
use crate::infrastructure::config::ElementIds;

pub const EXAMPLE_TITLE: &str = "Análisis de Desempleo: Región de Los Ríos";
pub const EXAMPLE_SUBTITLE: &str = "ENE 2010–2025 | Visualizaciones interactivas";
pub const EXAMPLE_FOOTER: &str =
    "Desarrollado por el Centro de Estudios Regionales\nUniversidad Austral de Chile";

/// The three operations the page markup invokes.
pub struct ConfigPanel<'a, S: ConfigSurface + ?Sized> {
    surface: &'a S,
    elements: &'a ElementIds,
}

impl<'a, S: ConfigSurface + ?Sized> ConfigPanel<'a, S> {
    pub fn new(surface: &'a S, elements: &'a ElementIds) -> Self {
        Self { surface, elements }
    }

    pub fn open(&self) {
        self.surface.set_modal_visible(true);
    }

    pub fn close(&self) {
        self.surface.set_modal_visible(false);
    }

    /// Copy non-blank fields into their targets and close the modal.
    pub fn apply(&self) {
        if let Some(title) = self.trimmed(&self.elements.title_input) {
            self.surface.set_text(&self.elements.main_title, &title);
        }
        if let Some(subtitle) = self.trimmed(&self.elements.subtitle_input) {
            self.surface.set_text(&self.elements.subtitle, &subtitle);
        }
        if let Some(footer) = self.trimmed(&self.elements.footer_input) {
            self.surface
                .set_markup(&self.elements.footer_text, &footer_markup(&footer));
        }
        self.close();
    }

    pub fn load_example(&self) {
        self.surface
            .set_field_value(&self.elements.title_input, EXAMPLE_TITLE);
        self.surface
            .set_field_value(&self.elements.subtitle_input, EXAMPLE_SUBTITLE);
        self.surface
            .set_field_value(&self.elements.footer_input, EXAMPLE_FOOTER);
    }

    fn trimmed(&self, field: &str) -> Option<String> {
        self.surface
            .field_value(field)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Escape the footer text and turn its line breaks into `<br>`.
pub fn footer_markup(text: &str) -> String {
    htmlize::escape_text(text).replace('\n', "<br>")
}
