//! Description text: free-form lines, optionally `-` bulleted.

/// Bullet marker recognised at the start of a description line.
pub const BULLET_MARKER: char = '-';

/// One non-empty line of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptionLine<'a> {
    /// Whether the line started with a bullet marker
    pub bullet: bool,

    /// Line text with the marker and surrounding whitespace removed
    pub text: &'a str,
}

/// Split a description into its non-empty lines.
pub fn description_lines(text: &str) -> Vec<DescriptionLine<'_>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix(BULLET_MARKER) {
            Some(rest) => DescriptionLine {
                bullet: true,
                text: rest.trim_start(),
            },
            None => DescriptionLine {
                bullet: false,
                text: line,
            },
        })
        .collect()
}

/// Whether any line of the description is bulleted.
pub fn has_bullets(lines: &[DescriptionLine<'_>]) -> bool {
    lines.iter().any(|line| line.bullet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_lines() {
        let lines = description_lines("- Built **things**\n\n  plain line  \n-tight");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].bullet);
        assert_eq!(lines[0].text, "Built **things**");
        assert!(!lines[1].bullet);
        assert_eq!(lines[1].text, "plain line");
        assert_eq!(lines[2].text, "tight");
        assert!(has_bullets(&lines));
    }

    #[test]
    fn test_empty_description() {
        assert!(description_lines("").is_empty());
        assert!(description_lines("\n \n").is_empty());
    }
}
