//! Import options and configuration.

/// Options for importing Markdown résumés.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Upper-case section titles on import
    pub uppercase_titles: bool,

    /// Title of the section whose single line is taken verbatim
    pub skills_title: String,

    /// Export filename assigned to the imported document
    pub filename: Option<String>,
}

impl ImportOptions {
    /// Create new import options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep section titles as written.
    pub fn preserve_title_case(mut self) -> Self {
        self.uppercase_titles = false;
        self
    }

    /// Set the title of the single-line skills section.
    pub fn with_skills_title(mut self, title: impl Into<String>) -> Self {
        self.skills_title = title.into();
        self
    }

    /// Set the filename of the imported document.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            uppercase_titles: true,
            skills_title: "SKILLS".to_string(),
            filename: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_options_builder() {
        let options = ImportOptions::new()
            .preserve_title_case()
            .with_skills_title("TECHNOLOGIES")
            .with_filename("cv");

        assert!(!options.uppercase_titles);
        assert_eq!(options.skills_title, "TECHNOLOGIES");
        assert_eq!(options.filename.as_deref(), Some("cv"));
    }

    #[test]
    fn test_default_options() {
        let options = ImportOptions::default();
        assert!(options.uppercase_titles);
        assert_eq!(options.skills_title, "SKILLS");
        assert!(options.filename.is_none());
    }
}
