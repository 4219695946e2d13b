use std::collections::{BTreeMap, BTreeSet};

use crate::config::ReportConfig;
use crate::error::ExportError;
use crate::template::{parse_placeholders, Block, Segment};

/// Conditional template renderer.
///
/// A block whose placeholders all refer to fields still at their defaults
/// renders as nothing. A separator block follows a clause that rendered, and
/// is only written out once another non-empty block comes after it.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: ReportConfig,
}

impl Renderer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Field names referenced by `text`, in order of appearance.
    pub fn placeholders(text: &str) -> Result<Vec<String>, ExportError> {
        Ok(parse_placeholders(text)?
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Field(name) => Some(name.to_string()),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    /// Render one text block. Elided blocks render as an empty string.
    pub fn render_block(
        &self,
        text: &str,
        fields: &BTreeMap<String, String>,
        defaulted: &BTreeSet<String>,
    ) -> Result<String, ExportError> {
        let segments = parse_placeholders(text)?;

        let names = segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(*name),
            Segment::Literal(_) => None,
        });
        // every name is resolved first, so an unknown field fails even an elidable block
        let mut referenced = false;
        let mut all_defaulted = true;
        for name in names {
            if !fields.contains_key(name) {
                return Err(ExportError::MissingField {
                    name: name.to_string(),
                });
            }
            referenced = true;
            all_defaulted &= defaulted.contains(name);
        }
        if referenced && all_defaulted {
            return Ok(String::new());
        }

        let mut out = String::new();
        for segment in &segments {
            match segment {
                Segment::Literal(literal) => out.push_str(literal),
                Segment::Field(name) => {
                    // presence checked above
                    if let Some(value) = fields.get(*name) {
                        out.push_str(self.display(value));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Render a template into report text.
    pub fn render(
        &self,
        blocks: &[Block],
        fields: &BTreeMap<String, String>,
        defaulted: &BTreeSet<String>,
    ) -> Result<String, ExportError> {
        let mut out = String::new();
        let mut pending_separator = false;
        let mut previous_was_separator = false;
        let mut last_clause_empty = true;

        for block in blocks {
            match block {
                Block::Separator => {
                    // only a clause that actually rendered gets a separator after it
                    if !previous_was_separator && !last_clause_empty {
                        pending_separator = true;
                    }
                    previous_was_separator = true;
                }
                Block::Text(text) => {
                    previous_was_separator = false;
                    let rendered = self.render_block(text, fields, defaulted)?;
                    last_clause_empty = rendered.is_empty();
                    if last_clause_empty {
                        continue;
                    }
                    if pending_separator {
                        out.push_str(&self.config.separator);
                        pending_separator = false;
                    }
                    out.push_str(&rendered);
                }
            }
        }
        Ok(out)
    }

    /// Render one spreadsheet cell. The find/replace table is only applied
    /// when substitution changed the text.
    pub fn render_cell(
        &self,
        text: &str,
        fields: &BTreeMap<String, String>,
        defaulted: &BTreeSet<String>,
    ) -> Result<String, ExportError> {
        let rendered = self.render_block(text, fields, defaulted)?;
        if rendered == text {
            return Ok(rendered);
        }
        Ok(self
            .config
            .xls_replace_strings
            .iter()
            .filter(|(from, _)| !from.is_empty())
            .fold(rendered, |acc, (from, to)| acc.replace(from.as_str(), to)))
    }

    fn display<'a>(&'a self, value: &'a str) -> &'a str {
        self.config
            .replace_data
            .get(value)
            .map(String::as_str)
            .unwrap_or(value)
    }
}
