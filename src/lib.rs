//! Perceptual colour matching: rank a reference palette by CIEDE2000
//! distance to an sRGB query colour.
//!
//! ```
//! use shadematch::{rank, Palette, RgbColor};
//!
//! let palette = Palette::from_hexes(&["#FF0000", "#00FF00", "#0000FF"]).unwrap();
//! let matches = rank(RgbColor::from_hex("#F01010").unwrap(), &palette, 2).unwrap();
//! assert_eq!(matches[0].entry.hex(), "#FF0000");
//! ```

pub mod engine;
pub mod types;

pub use engine::color::{hex_to_lab, rgb_to_lab, sanitize_hex, LabColor, ParseError, RgbColor};
pub use engine::delta_e::delta_e2000;
pub use engine::matcher::{rank, EmptyPaletteError, Matcher, RankedMatch};
pub use engine::palettes::{EntryDetails, Palette, PaletteEntry, RawEntry, ValidationError};
pub use engine::pipeline::{
    find_closest_matches, match_color, match_color_with, match_random, EngineError, MatchReport,
};
pub use types::{MatchRequest, MatcherOptions, DEFAULT_LIMIT};
