//! Codepoint identifiers for emoji sequences
//!
//! Every extracted sprite is named after the codepoints of the emoji it
//! depicts, e.g. `1F600` or `2764-FE0F`.

/// Convert an emoji string to its dash-joined uppercase hex identifier.
///
/// Each `char` contributes one hex group, without zero padding, in the
/// order it appears. An empty string yields an empty identifier.
///
/// # Examples
///
/// ```
/// use emoji_extract::codepoint::emoji_to_codepoint;
///
/// assert_eq!(emoji_to_codepoint("😀"), "1F600");
/// assert_eq!(emoji_to_codepoint("❤️"), "2764-FE0F");
/// assert_eq!(emoji_to_codepoint(""), "");
/// ```
pub fn emoji_to_codepoint(emoji: &str) -> String {
    emoji.chars().map(|c| format!("{:X}", c as u32)).collect::<Vec<_>>().join("-")
}
