//! emoji-extract - Slice Telegram Desktop emoji sprite sheets into PNGs
//!
//! This library provides functionality to:
//! - Parse the ordered emoji listing (`emoji.txt`)
//! - Load the `emoji_N.webp` sprite sheets and address cells across them
//! - Export one PNG per emoji, named after its codepoints

pub mod cli;
pub mod codepoint;
pub mod emoji_list;
pub mod extract;
pub mod output;
pub mod overrides;
pub mod sheets;
