use std::ops::Range;

use super::tree::{NodeKind, SourceFile};

#[derive(Debug)]
enum Edit {
    Replace(Range<usize>, String),
    Remove(Range<usize>),
}

impl Edit {
    fn range(&self) -> &Range<usize> {
        match self {
            Edit::Replace(range, _) | Edit::Remove(range) => range,
        }
    }
}

/// Prints a file back to source text by splicing its edits into the
/// original source. Unchanged regions are copied byte for byte.
pub fn print(file: &SourceFile) -> String {
    let source = file.source();
    let edits = collect_edits(file);

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut squeeze = false;
    for edit in edits {
        let range = edit.range().clone();
        push_chunk(&mut out, &source[cursor..range.start], squeeze);
        squeeze = false;
        match edit {
            Edit::Replace(_, text) => out.push_str(&text),
            Edit::Remove(_) => {
                trim_trailing_newlines(&mut out, 2);
                squeeze = true;
            }
        }
        cursor = range.end;
    }
    push_chunk(&mut out, &source[cursor..], squeeze);
    if squeeze && cursor >= source.trim_end().len() {
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
    }
    out
}

fn collect_edits(file: &SourceFile) -> Vec<Edit> {
    let source = file.source();
    let mut removals: Vec<Range<usize>> = Vec::new();
    let mut replacements: Vec<Edit> = Vec::new();

    let mut stack = vec![file.root()];
    while let Some(id) = stack.pop() {
        let node = file.node(id);
        if node.removed {
            removals.push(whole_lines(source, node.span.clone()));
            continue;
        }
        let rewritable = node.kind.is_text() || node.kind == NodeKind::PackageName;
        if rewritable && node.text != file.original_text(id) {
            replacements.push(Edit::Replace(node.span.clone(), node.text.clone()));
        }
        stack.extend(node.children.iter().copied());
    }

    removals.sort_by_key(|r| r.start);
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(removals.len());
    for range in removals {
        match merged.last_mut() {
            Some(last)
                if range.start <= last.end
                    || source[last.end..range.start].trim().is_empty() =>
            {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }

    let mut edits: Vec<Edit> = replacements
        .into_iter()
        .filter(|e| !merged.iter().any(|r| overlaps(r, e.range())))
        .collect();
    edits.extend(merged.into_iter().map(Edit::Remove));
    edits.sort_by_key(|e| e.range().start);
    edits
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Widens `span` to whole lines when nothing else shares those lines.
fn whole_lines(source: &str, span: Range<usize>) -> Range<usize> {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let start = if source[line_start..span.start].trim().is_empty() {
        line_start
    } else {
        span.start
    };
    let line_end = source[span.end..].find('\n').map_or(source.len(), |i| span.end + i + 1);
    let end = if source[span.end..line_end].trim().is_empty() {
        line_end
    } else {
        span.end
    };
    start..end
}

/// Appends `chunk`; after a removal, keeps at most one blank line at the
/// junction. The text before the removal is trimmed when the edit is
/// applied, see `trim_trailing_newlines`.
fn push_chunk(out: &mut String, chunk: &str, squeeze: bool) {
    if !squeeze {
        out.push_str(chunk);
        return;
    }
    let trailing = out.len() - out.trim_end_matches('\n').len();
    let body = chunk.trim_start_matches('\n');
    let leading = chunk.len() - body.len();
    let keep = if out.is_empty() { 0 } else { leading.min(2usize.saturating_sub(trailing)) };
    out.extend(std::iter::repeat_n('\n', keep));
    out.push_str(body);
}

fn trim_trailing_newlines(out: &mut String, max: usize) {
    let body = out.trim_end_matches('\n').len();
    if out.len() - body > max {
        out.truncate(body + max);
    }
}
