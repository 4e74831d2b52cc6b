use crate::text;
use liturgia_fetch::FetchError;
use liturgia_model::{LiturgyPage, ReadingBlock, SectionKind};

pub const DEFAULT_WIDTH: usize = 120;

/// Layout options for [`render_page`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Column width for body text.
    pub width: usize,
    /// Print a label line (e.g., "Salmo Responsorial") before each section.
    pub section_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            section_labels: false,
        }
    }
}

/// Render a normalized page as plain text.
///
/// The header (date, liturgical day, color) comes first, then every block:
/// a blank line, the reference, the heading, a blank line, and the body
/// wrapped to `options.width`.
pub fn render_page(page: &LiturgyPage, options: &RenderOptions) -> String {
    let mut lines = vec![
        text::normalize_text(&page.date),
        text::normalize_text(&page.liturgical_day),
        page.liturgical_color.to_string(),
    ];

    let mut previous: Option<SectionKind> = None;
    for block in &page.blocks {
        if options.section_labels && previous != Some(block.section) {
            lines.push(String::new());
            lines.push(format!("== {} ==", block.section.label()));
        }
        previous = Some(block.section);
        render_block(block, options.width, &mut lines);
    }

    tracing::debug!(blocks = page.blocks.len(), lines = lines.len(), "Rendered page");
    text::collapse_blank_lines(&lines.join("\n")) + "\n"
}

fn render_block(block: &ReadingBlock, width: usize, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(text::normalize_text(&block.reference));
    lines.push(text::normalize_text(&block.heading));
    lines.push(String::new());
    lines.extend(text::wrap(&text::normalize_text(&block.body), width));
}

/// A message for the reader explaining why there is nothing to show.
pub fn render_error(err: &FetchError) -> String {
    match err {
        FetchError::Http { status } => {
            format!("Erro de conexão: o servidor respondeu com o código de status {status}.")
        }
        FetchError::Timeout => "A requisição demorou muito (timeout) e foi cancelada.".to_string(),
        FetchError::Connection => {
            "Erro de conexão. Verifique sua conexão com a internet.".to_string()
        }
        FetchError::Unexpected { message } => format!("Ocorreu um erro inesperado: {message}"),
        FetchError::Malformed(m) => format!(
            "A liturgia recebida está incompleta (campo ausente: {}).",
            m.missing_field
        ),
    }
}
