use std::fmt::{self, Debug, Formatter};

/// Pre-rendered text which is written verbatim by [`Debug`], allowing custom layouts to be placed
/// inside `debug_list` and friends without extra quoting.
pub(crate) struct Verbatim(pub String);

impl Debug for Verbatim {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefixes every line of `text`, using `first` for the first line and `rest` for the remainder.
/// Used to draw nested structures such as tree branches.
pub(crate) fn indent_lines(text: &str, first: &str, rest: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(if i == 0 { first } else { rest });
        out.push_str(line);
    }
    out
}
