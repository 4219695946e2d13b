use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Turn a rendered text report into a DOCX document.
///
/// The title becomes a heading, every line of `text` a paragraph (blank
/// lines stay as empty paragraphs) and `**bold**` segments bold runs.
pub fn generate_docx(title: &str, text: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new().add_style(
        Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(styles.title_size * 2) // OOXML uses half-points
            .bold(),
    );

    if !title.is_empty() {
        docx = docx.add_paragraph(
            Paragraph::new().style("Title").add_run(
                Run::new()
                    .add_text(title)
                    .fonts(RunFonts::new().ascii(&styles.heading_font)),
            ),
        );
    }

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
            continue;
        }
        let mut para = Paragraph::new().align(AlignmentType::Left);
        for run in parse_inline(line, styles) {
            para = para.add_run(run);
        }
        docx = docx.add_paragraph(para);
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    tracing::debug!(bytes = buf.get_ref().len(), "generated DOCX report");
    Ok(buf.into_inner())
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Split `**bold**` segments into runs. An unclosed `**` is kept as text.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let after_start = &remaining[start + 2..];
        let Some(end) = after_start.find("**") else {
            break;
        };
        if start > 0 {
            runs.push(body_run(&remaining[..start], styles));
        }
        runs.push(body_run(&after_start[..end], styles).bold());
        remaining = &after_start[end + 2..];
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }
    runs
}
