use super::*;

#[derive(thiserror::Error, Debug)]
#[error("No input text, pass --text or --input")]
pub struct MissingInputError;

/// Lines of an exhibit, top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    /// A literal is always a single line.
    pub fn from_literal(text: &str) -> Self {
        Self {
            lines: vec![text.to_owned()],
        }
    }

    pub fn from_contents(contents: &str) -> Self {
        Self {
            lines: contents.lines().map(str::to_owned).collect(),
        }
    }

    pub fn read_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Reading input file {}", path.display()))?;
        Ok(Self::from_contents(&contents))
    }

    /// Literal text wins over the input file.
    pub fn from_sources(text: Option<&str>, input: Option<&Path>) -> Result<Self> {
        match (text, input) {
            (Some(text), _) => Ok(Self::from_literal(text)),
            (None, Some(path)) => Self::read_from_file(path),
            (None, None) => Err(MissingInputError.into()),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_is_one_line() {
        let text = TextBlock::from_literal("Hello, world");
        assert_eq!(text.lines(), ["Hello, world"]);
    }

    #[test]
    fn contents_keep_order() {
        let text = TextBlock::from_contents("first\r\nsecond\n\nfourth\n");
        assert_eq!(text.lines(), ["first", "second", "", "fourth"]);
    }

    #[test]
    fn empty_file_has_no_lines() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let text = TextBlock::read_from_file(file.path()).unwrap();
        assert_eq!(text.line_count(), 0);
    }

    #[test]
    fn literal_wins_over_file() {
        let text = TextBlock::from_sources(Some("Hi"), Some(Path::new("missing.txt"))).unwrap();
        assert_eq!(text.lines(), ["Hi"]);
    }

    #[test]
    fn missing_sources() {
        let err = TextBlock::from_sources(None, None).unwrap_err();
        assert!(err.is::<MissingInputError>());

        let err = TextBlock::from_sources(None, Some(Path::new("missing.txt"))).unwrap_err();
        assert!(!err.is::<MissingInputError>());
    }
}
