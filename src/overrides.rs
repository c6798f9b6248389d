//! Pinned sprite positions for the heart block
//!
//! Past list position 2724 the emoji listing and the sprite sheets drift
//! apart. The hearts sit inside that drift and do not follow the constant
//! offset applied to the rest of the tail, so their cells were located by
//! hand on the sheets.

/// Identifier to global sprite position, in lookup order.
pub const MANUAL_SPRITE_POSITIONS: &[(&str, usize)] = &[
    ("2764-FE0F", 3142), // red heart
    ("2764", 3142),      // red heart, text presentation
    ("1FA77", 3141),     // pink heart
    ("1F9E1", 3143),     // orange heart
    ("1F49B", 3144),     // yellow heart
    ("1F49A", 3145),     // green heart
    ("1FA75", 3146),     // light blue heart
    ("1F499", 3147),     // blue heart
    ("1F49C", 3148),     // purple heart
    ("1F90E", 3149),     // brown heart
    ("1F5A4", 3150),     // black heart
    ("1FA76", 3151),     // grey heart
    ("1F90D", 3152),     // white heart
];
