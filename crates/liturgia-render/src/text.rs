use unicode_normalization::UnicodeNormalization;

/// Clean a reading for display: NFC composition, non-breaking and other
/// Unicode spaces turned into plain spaces, CRLF folded, trailing spaces cut.
///
/// The endpoint mixes precomposed and decomposed accents (ã, ç, é) and pads
/// verse lines with `\u{a0}`, both of which throw off column counting in
/// [`wrap`].
pub fn normalize_text(input: &str) -> String {
    let cleaned: String = input
        .nfc()
        .filter(|c| *c != '\r')
        .map(|c| if c != '\n' && c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut out = String::with_capacity(cleaned.len());
    for (i, line) in cleaned.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.trim_end());
    }
    out.truncate(out.trim_end_matches('\n').len());
    out
}

/// Keep at most one blank line between paragraphs of a rendered page.
pub fn collapse_blank_lines(input: &str) -> String {
    input
        .lines()
        .scan(false, |prev_blank, line| {
            let blank = line.trim().is_empty();
            let keep = !(blank && *prev_blank);
            *prev_blank = blank;
            Some(keep.then_some(line))
        })
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedy word wrap to `width` columns.
///
/// Source line breaks start a new line; blank source lines are kept as
/// empty lines. A word longer than `width` gets a line of its own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }

        lines.push(current);
    }

    lines
}
