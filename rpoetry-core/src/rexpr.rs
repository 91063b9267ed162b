//! Rendering of Rust values as R source literals.
//!
//! Nothing here escapes its input: values containing `"` produce invalid R,
//! same as interpolating them by hand would.

use std::fmt::Display;
use std::path::Path;

/// `"value"`
pub fn string_literal(value: impl Display) -> String {
    format!("\"{value}\"")
}

/// `c("a","b")`, in input order, duplicates kept.
pub fn character_vector<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let quoted: Vec<String> = items.into_iter().map(string_literal).collect();
    format!("c({})", quoted.join(","))
}

/// Character vector of paths rendered with forward slashes.
pub fn path_vector<I, P>(paths: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    character_vector(paths.into_iter().map(|p| posix_path(p.as_ref())))
}

/// Path with `/` separators, the form R accepts on every platform.
pub fn posix_path(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if cfg!(windows) {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}
