//! Width & ANSI helpers (C1): the leaf component the rest of the engine
//! builds on. Splits styled content on line breaks, chunks lines to a fixed
//! visible width, and right-pads redrawn lines — all ANSI-escape aware
//! without pulling in a regex engine.

pub mod ansi;
pub mod boxed;
pub mod chunk;
pub mod styled;
pub mod width;

pub use boxed::{BorderStyle, BoxOptions, render_box};
pub use chunk::{pad_to_width, render_block};
pub use styled::{Style, StyledData};
pub use width::visible_width;
