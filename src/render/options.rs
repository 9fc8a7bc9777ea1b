//! Rendering options and configuration.

use super::JsonFormat;

/// Twentieths of a point per inch.
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Physical page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// US Letter, 8.5 x 11 inches
    #[default]
    Letter,
    /// ISO A4, 210 x 297 mm
    A4,
}

impl PageSize {
    /// Page width in twips.
    pub fn width_twips(self) -> u32 {
        match self {
            PageSize::Letter => 12240,
            PageSize::A4 => 11906,
        }
    }

    /// Page height in twips.
    pub fn height_twips(self) -> u32 {
        match self {
            PageSize::Letter => 15840,
            PageSize::A4 => 16838,
        }
    }

    /// Largest margin that still leaves an inch of content width, in inches.
    pub fn max_margin_inches(self) -> f32 {
        (self.width_twips() as f32 / TWIPS_PER_INCH - 1.0) / 2.0
    }

    /// CSS `@page` size keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            PageSize::Letter => "letter",
            PageSize::A4 => "A4",
        }
    }
}

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Font family for every text run
    pub font_family: String,

    /// Body text size in half-points
    pub font_size: u32,

    /// Name line size in half-points
    pub name_size: u32,

    /// Hyperlink color (hex, no leading `#`)
    pub link_color: String,

    /// Physical page size
    pub page: PageSize,

    /// Margin in inches, overriding the document's own margin
    pub margin_override: Option<f32>,

    /// JSON output layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font family.
    pub fn with_font(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set the body text size in points.
    pub fn with_font_size_pt(mut self, points: f32) -> Self {
        self.font_size = (points * 2.0).round().max(2.0) as u32;
        self
    }

    /// Set the hyperlink color.
    pub fn with_link_color(mut self, color: impl Into<String>) -> Self {
        self.link_color = color.into().trim_start_matches('#').to_string();
        self
    }

    /// Set the page size.
    pub fn with_page(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    /// Override the document margin (inches).
    pub fn with_margin(mut self, inches: f32) -> Self {
        self.margin_override = Some(inches.max(0.0));
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Effective margin for a document, in inches.
    ///
    /// Clamped to `[0, page.max_margin_inches()]`; NaN becomes zero.
    pub fn margin_for(&self, document_margin: f32) -> f32 {
        self.margin_override
            .unwrap_or(document_margin)
            .max(0.0)
            .min(self.page.max_margin_inches())
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size: 22,
            name_size: 36,
            link_color: "0563C1".to_string(),
            page: PageSize::Letter,
            margin_override: None,
            json_format: JsonFormat::Pretty,
        }
    }
}
