//! Sentence segmentation and paragraph markup.
//!
//! Sentence boundaries follow a deliberately simple rule: a whitespace run
//! preceded by `.`, `!` or `?` and followed by an ASCII uppercase letter.
//! Abbreviations and numbers are not special-cased.

/// A paragraph is closed once its buffer grows past this many characters.
pub const PARAGRAPH_THRESHOLD: usize = 200;

/// Collapses every whitespace run to one space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            let mut end_of_run = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end_of_run = next_idx + next.len_utf8();
                chars.next();
            }
            match chars.peek() {
                Some(&(_, next)) if next.is_ascii_uppercase() => {
                    sentences.push(&text[start..idx]);
                    start = end_of_run;
                }
                _ => {}
            }
            // the run itself is whitespace, so it can never end a sentence
            prev = Some(' ');
            continue;
        }
        prev = Some(ch);
    }

    sentences.push(&text[start..]);
    sentences
}

/// Groups sentences into paragraphs and wraps each in `<p>`.
pub fn format_paragraphs(text: &str) -> String {
    paragraphs(text)
        .iter()
        .map(|p| format!("<p>{}</p>", p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn paragraphs(text: &str) -> Vec<String> {
    let text = normalize_whitespace(text);
    if text.is_empty() {
        return Vec::new();
    }

    let mut paragraphs = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    for sentence in split_sentences(&text) {
        buffer.push_str(sentence);
        buffer.push(' ');
        buffer_chars += sentence.chars().count() + 1;
        if buffer_chars > PARAGRAPH_THRESHOLD {
            paragraphs.push(buffer.trim().to_string());
            buffer.clear();
            buffer_chars = 0;
        }
    }

    let rest = buffer.trim();
    if !rest.is_empty() {
        paragraphs.push(rest.to_string());
    }
    paragraphs
}
