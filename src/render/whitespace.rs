//! Normalizes the whitespace left behind in rendered output.

/// Collapses every run of whitespace into a single space and trims the
/// result.
///
/// A run of whitespace that touches one of the `suppressed` offsets, i.e. the
/// place where a variable or block rendered nothing, and is followed by
/// closing punctuation is removed entirely. For example `"saved it ."` becomes
/// `"saved it."` when the space was left behind by a suppressed block, but an
/// authored `"wait : now"` is left alone.
pub fn collapse(s: &str, suppressed: &[usize]) -> String {
    let mut out = String::with_capacity(s.len());
    let mut suppressed = suppressed.iter().copied().peekable();
    let mut iter = s.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !c.is_whitespace() {
            out.push(c);
            continue;
        }

        // Find the end of this whitespace run.
        //
        // xxxx   xxxx
        //     ^  ^
        //     i  j
        let mut j = i + c.len_utf8();
        while let Some(&(k, c)) = iter.peek() {
            if !c.is_whitespace() {
                break;
            }
            j = k + c.len_utf8();
            iter.next();
        }

        while suppressed.next_if(|&m| m < i).is_some() {}
        let touches_suppressed = suppressed.peek().map_or(false, |&m| m <= j);
        let before_punct = iter.peek().map_or(false, |&(_, c)| is_closing_punct(c));

        if !(touches_suppressed && before_punct) {
            out.push(' ');
        }
    }

    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_owned()
    }
}

fn is_closing_punct(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ':' | ';' | ')')
}
