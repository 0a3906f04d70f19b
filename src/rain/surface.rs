use super::glyphs::Glyph;

/// 2D drawing context the rain paints onto.
///
/// Coordinates passed to [`Surface::draw_glyph`] are logical; the surface
/// applies the pixel ratio it was last resized with. Draws that land outside
/// the backing store are clipped by the surface.
pub trait Surface {
    /// Reallocate the backing store. Prior content is discarded.
    fn resize(&mut self, backing_width: u32, backing_height: u32, pixel_ratio: f32);

    /// Height of the backing store in device pixels.
    fn backing_height(&self) -> u32;

    /// Paint black at `alpha` over the whole surface.
    fn fade(&mut self, alpha: f32);

    fn draw_glyph(&mut self, glyph: &Glyph, x: u32, y: u32);
}
