//! Parser for the ordered emoji listing (`emoji.txt`)
//!
//! The listing is split into sections by lines of dashes or equals signs.
//! Only the first section maps onto the sprite sheets; every double-quoted
//! string inside it is one emoji, in sprite order.

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Error reading the emoji listing
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ListError {
    /// The listing file does not exist
    #[error("emoji.txt not found at {}", .0.display())]
    NotFound(PathBuf),
    /// The listing exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn section_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-=]{8,}").expect("valid section regex"))
}

fn quoted_entry() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("valid entry regex"))
}

/// Extract the emoji of the first section, in document order.
///
/// # Examples
///
/// ```
/// use emoji_extract::emoji_list::parse_emoji_list;
///
/// let text = "\"😀\", \"😃\"\n--------\n\"🐶\"";
/// assert_eq!(parse_emoji_list(text), vec!["😀", "😃"]);
/// ```
pub fn parse_emoji_list(content: &str) -> Vec<String> {
    let first = section_delimiter().split(content).next().unwrap_or("");
    quoted_entry().captures_iter(first).map(|caps| caps[1].to_string()).collect()
}

/// Read and parse the listing at `path`.
pub fn read_emoji_list(path: &Path) -> Result<Vec<String>, ListError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ListError::NotFound(path.to_path_buf())
        } else {
            ListError::Io { path: path.to_path_buf(), source }
        }
    })?;
    Ok(parse_emoji_list(&content))
}
