use std::path::Path;

use serde::Deserialize;

use crate::error::ExportError;

/// Text template shipped with the program.
pub const DEFAULT_TEXT_TEMPLATE: &str = include_str!("../templates/text_template.json");

/// One block of a report template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBlock")]
pub enum Block {
    /// Literal text with `{name}` placeholders.
    Text(String),
    /// Conditional separator between two non-empty clauses.
    Separator,
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Text(text.into())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBlock {
    Text(String),
    Marker { separator: bool },
}

impl TryFrom<RawBlock> for Block {
    type Error = String;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        match raw {
            RawBlock::Text(text) => Ok(Block::Text(text)),
            RawBlock::Marker { separator: true } => Ok(Block::Separator),
            RawBlock::Marker { separator: false } => {
                Err("separator marker must be {\"separator\": true}".to_string())
            }
        }
    }
}

/// An ordered list of blocks, loaded from a JSON array whose items are
/// strings or `{"separator": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TextTemplate {
    pub blocks: Vec<Block>,
}

impl TextTemplate {
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        let template: TextTemplate = serde_json::from_str(json)
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        // reject bad placeholders at load time rather than mid-report
        for block in &template.blocks {
            if let Block::Text(text) = block {
                parse_placeholders(text)?;
            }
        }
        Ok(template)
    }

    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExportError::TemplateNotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), "loading text template");
        Self::from_json(&json)
    }

    /// Load `path`, or the bundled template if it does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ExportError> {
        match path {
            Some(path) => match Self::load(path) {
                Err(ExportError::TemplateNotFound(missing)) => {
                    tracing::warn!(path = %missing, "text template not found, using bundled template");
                    Self::bundled()
                }
                other => other,
            },
            None => Self::bundled(),
        }
    }

    pub fn bundled() -> Result<Self, ExportError> {
        Self::from_json(DEFAULT_TEXT_TEMPLATE)
    }
}

/// A parsed piece of block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(String),
    Field(&'a str),
}

/// Split `text` into literals and `{name}` placeholders. `{{` and `}}` stand
/// for literal braces.
pub fn parse_placeholders(text: &str) -> Result<Vec<Segment<'_>>, ExportError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(pos) = rest.find(['{', '}']) {
        literal.push_str(&rest[..pos]);
        let brace = &rest[pos..];
        if let Some(after) = brace.strip_prefix("{{") {
            literal.push('{');
            rest = after;
        } else if let Some(after) = brace.strip_prefix("}}") {
            literal.push('}');
            rest = after;
        } else if brace.starts_with('}') {
            return Err(ExportError::TemplateParse(format!(
                "single '}}' encountered in {text:?}"
            )));
        } else {
            let close = brace.find('}').ok_or_else(|| {
                ExportError::TemplateParse(format!("unclosed '{{' in {text:?}"))
            })?;
            let name = &brace[1..close];
            if name.is_empty() || name.contains(['{', ':', '!', '[', '.']) {
                return Err(ExportError::TemplateParse(format!(
                    "invalid placeholder {{{name}}} in {text:?}"
                )));
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(name));
            rest = &brace[close + 1..];
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
