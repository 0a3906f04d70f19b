//! Falling-glyph ("digital rain") background layer.
//!
//! The layer owns a drawing [`Surface`], one fall depth per glyph column and a
//! per-theme [`GlyphCache`]. It is driven by the host's repaint primitive
//! ([`FrameHost`]): every delivered frame runs at most one step, throttled to
//! ~30 Hz, and re-arms the next frame only after its own work is done.
//!
//! Each executed step paints a translucent black overlay over the whole
//! surface (so older glyphs decay instead of being cleared), draws one random
//! glyph per column at that column's depth and moves the column down by one
//! cell. Columns that have fallen past the bottom respawn at the top with a
//! small per-frame probability, which staggers the streams.

mod clock;
mod columns;
mod glyphs;
mod host;
mod layer;
mod options;
mod surface;

pub use clock::{FrameClock, FRAME_INTERVAL};
pub use columns::{ColumnState, START_DEPTH, TOP_DEPTH};
pub use glyphs::{Glyph, GlyphCache, ALPHABET};
pub use host::{FrameHandle, FrameHost, ListenerHandle};
pub use layer::RainLayer;
pub use options::{RainOptions, Viewport, DEFAULT_CELL_SIZE, DEFAULT_DENSITY, DEFAULT_SPEED};
pub use surface::Surface;

/// Alpha of the black overlay painted before every executed step.
pub const FADE_ALPHA: f32 = 0.05;

/// Probability that a column draws a glyph on a given step.
pub const DRAW_PROBABILITY: f64 = 0.975;

/// Probability that a column past the bottom respawns on a given step.
pub const RESPAWN_PROBABILITY: f64 = 0.025;
