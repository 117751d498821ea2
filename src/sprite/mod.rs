//! Sprite generation: per-icon symbols, the sprite document, and the
//! optional size optimization pass.

mod assemble;
mod optimize;
mod symbol;

pub use assemble::{assemble_sprite, GENERATED_NOTICE};
pub use optimize::{optimize_svg, shorten_color, OptimizeOptions};
pub use symbol::{normalize_symbol, STRIPPED_ATTRIBUTES};

/// File name of the sprite sheet.
pub const SPRITE_FILENAME: &str = "sprite.svg";
