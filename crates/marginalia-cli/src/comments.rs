//! Doc-comment extraction from source files

use std::ops::Range;

/// A `/** ... */` block, delimiters included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment<'a> {
    pub text: &'a str,
    /// Byte range within the source file
    pub range: Range<usize>,
    /// 1-based line of the opening `/**`
    pub line: usize,
}

/// Every doc comment in `source`, in order
///
/// `/**/` is an empty block comment, not a doc comment. An unterminated
/// doc comment ends the scan.
pub fn doc_comments(source: &str) -> Vec<DocComment<'_>> {
    let mut comments = Vec::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find("/**") {
        let start = cursor + found;
        if source[start..].starts_with("/**/") {
            cursor = start + 4;
            continue;
        }
        let Some(close) = source[start + 3..].find("*/") else {
            break;
        };
        let end = start + 3 + close + 2;

        comments.push(DocComment {
            text: &source[start..end],
            range: start..end,
            line: source[..start].matches('\n').count() + 1,
        });
        cursor = end;
    }

    comments
}
