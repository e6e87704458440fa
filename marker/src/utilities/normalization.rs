//! Text normalization applied before any output or source comparison.

/// Punctuation removed from program output before comparing it.
const OUTPUT_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Canonicalizes `text` for comparison.
///
/// Source code only loses whitespace: every whitespace run is removed so that
/// formatting differences never matter. Program output is lowercased, stripped
/// of common punctuation, and its whitespace runs collapse to single spaces.
///
/// # Examples
///
/// ```
/// use marker::utilities::normalization::normalize;
///
/// assert_eq!(normalize("Hello,  World!\n", false), "hello world");
/// assert_eq!(normalize("int  x = 1;\n", true), "intx=1;");
/// ```
pub fn normalize(text: &str, is_source_code: bool) -> String {
    if is_source_code {
        return text.chars().filter(|c| !c.is_whitespace()).collect();
    }

    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !OUTPUT_PUNCTUATION.contains(c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
