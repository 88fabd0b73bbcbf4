//! Single-pass literal substitution over non-overlapping spans

/// Replace occurrences of each needle with its replacement in one pass.
///
/// All occurrences are located in the original text first. Spans are taken
/// in start order; at equal starts the longest needle wins, and a span that
/// overlaps one already taken is dropped. Replacement text is never scanned
/// again, so inserted tokens cannot be corrupted by later needles.
///
/// Returns the new text and the number of spans replaced.
pub fn substitute(text: &str, replacements: &[(&str, &str)]) -> (String, usize) {
    let mut spans: Vec<(usize, usize, usize)> = Vec::new();
    for (index, (needle, _)) in replacements.iter().enumerate() {
        if needle.is_empty() {
            continue;
        }
        for (start, found) in text.match_indices(*needle) {
            spans.push((start, start + found.len(), index));
        }
    }

    if spans.is_empty() {
        return (text.to_string(), 0);
    }

    spans.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));

    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;

    for (start, end, index) in spans {
        if start < cursor {
            continue;
        }
        output.push_str(&text[cursor..start]);
        output.push_str(replacements[index].1);
        cursor = end;
        replaced += 1;
    }
    output.push_str(&text[cursor..]);

    (output, replaced)
}
