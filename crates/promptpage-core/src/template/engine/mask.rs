//! Code masking
//!
//! Fenced code blocks and inline code spans are overwritten with [`MASK`]
//! bytes before scanning, so bracket text inside code never becomes a
//! placeholder. Masking is byte-for-byte: every masked byte becomes one
//! `MASK` byte and line breaks are kept, so offsets into the masked text are
//! valid offsets into the original.

/// Filler byte for masked code; not a valid placeholder character
pub(crate) const MASK: char = '\u{1A}';

/// An open code fence: marker character and run length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Strip up to three spaces of indentation
fn unindent(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(' ');
    (line.len() - rest.len() <= 3).then_some(rest)
}

fn run_length(text: &str, marker: char) -> usize {
    text.chars().take_while(|&c| c == marker).count()
}

impl Fence {
    fn opening(line: &str) -> Option<Fence> {
        let rest = unindent(line)?;
        let marker = rest.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = run_length(rest, marker);
        if len < 3 {
            return None;
        }
        // Info strings of backtick fences may not contain backticks
        if marker == '`' && rest[len..].contains('`') {
            return None;
        }
        Some(Fence { marker, len })
    }

    fn closes(&self, line: &str) -> bool {
        let Some(rest) = unindent(line) else {
            return false;
        };
        let len = run_length(rest, self.marker);
        len >= self.len && rest[len..].trim().is_empty()
    }
}

/// Append `text` with every byte except line breaks replaced by `MASK`
fn blank_out(text: &str, out: &mut String) {
    for c in text.chars() {
        if c == '\n' || c == '\r' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat(MASK).take(c.len_utf8()));
        }
    }
}

/// Append `paragraph` with its inline code spans masked
///
/// A span opens with a run of N backticks and closes at the next run of
/// exactly N backticks. A run without a partner is literal text.
fn mask_inline(paragraph: &str, out: &mut String) {
    let bytes = paragraph.as_bytes();
    let mut pos = 0;
    let mut copied = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'`' {
            pos += 1;
            continue;
        }

        let open = pos;
        let len = run_length(&paragraph[open..], '`');
        let mut search = open + len;
        let mut close = None;

        while search < bytes.len() {
            if bytes[search] != b'`' {
                search += 1;
                continue;
            }
            let run = run_length(&paragraph[search..], '`');
            if run == len {
                close = Some(search + run);
                break;
            }
            search += run;
        }

        match close {
            Some(end) => {
                out.push_str(&paragraph[copied..open]);
                blank_out(&paragraph[open..end], out);
                copied = end;
                pos = end;
            }
            None => pos = open + len,
        }
    }

    out.push_str(&paragraph[copied..]);
}

/// Mask fenced code blocks and inline code spans in `text`
///
/// The result has exactly the same byte length as `text`. An unclosed fence
/// runs to the end of the input. Inline spans never cross a blank line.
pub(crate) fn mask_code(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut paragraph = String::new();
    let mut fence: Option<Fence> = None;

    for line in text.split_inclusive('\n') {
        if let Some(open) = fence {
            blank_out(line, &mut masked);
            if open.closes(line) {
                fence = None;
            }
            continue;
        }

        if let Some(open) = Fence::opening(line) {
            mask_inline(&paragraph, &mut masked);
            paragraph.clear();
            blank_out(line, &mut masked);
            fence = Some(open);
        } else if line.trim().is_empty() {
            mask_inline(&paragraph, &mut masked);
            paragraph.clear();
            masked.push_str(line);
        } else {
            paragraph.push_str(line);
        }
    }

    mask_inline(&paragraph, &mut masked);
    masked
}
