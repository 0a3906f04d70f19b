use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, trace, warn};

use crate::theme::ThemeMode;

use super::clock::FrameClock;
use super::columns::ColumnState;
use super::glyphs::GlyphCache;
use super::host::{FrameHandle, FrameHost, ListenerHandle};
use super::options::{RainOptions, Viewport, DEFAULT_SPEED};
use super::surface::Surface;
use super::{DRAW_PROBABILITY, FADE_ALPHA, RESPAWN_PROBABILITY};

/// The falling-glyph background component.
///
/// Mounting without a surface yields an inert layer: it registers nothing with
/// the host and never draws. A mounted layer keeps exactly one frame request
/// and one resize listener outstanding until [`RainLayer::unmount`].
pub struct RainLayer<S, R = StdRng> {
    options: RainOptions,
    theme: ThemeMode,
    clock: FrameClock,
    rng: R,
    active: Option<Active<S>>,
}

/// Everything that only exists while a surface is attached.
struct Active<S> {
    surface: S,
    glyphs: GlyphCache,
    columns: ColumnState,
    pending: Option<FrameHandle>,
    resize_listener: Option<ListenerHandle>,
}

impl<S: Surface, R: Rng> RainLayer<S, R> {
    pub fn mount<H: FrameHost + ?Sized>(
        host: &mut H,
        surface: Option<S>,
        theme: ThemeMode,
        options: RainOptions,
        rng: R,
    ) -> Self {
        let mut layer = Self {
            options,
            theme,
            clock: FrameClock::new(),
            rng,
            active: None,
        };

        let Some(surface) = surface else {
            info!("No drawing surface available; rain background disabled");
            return layer;
        };

        if options.speed != DEFAULT_SPEED {
            warn!(
                speed = options.speed,
                "Rain speed option is accepted but not applied to frame timing"
            );
        }

        layer.active = Some(Active::setup(host, surface, theme, &options));
        layer
    }

    /// Repaint callback for a frame this layer requested.
    ///
    /// `now` is host time since the host's origin.
    pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H, handle: FrameHandle, now: Duration) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.pending != Some(handle) {
            trace!(frame = handle.id(), "Ignoring revoked frame");
            return;
        }
        active.pending = None;

        if self.clock.tick(now) {
            active.step(&mut self.rng, &self.options);
        }

        active.pending = Some(host.request_frame());
    }

    /// Resize-listener callback. Fall-state is rebuilt from scratch.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if let Some(active) = self.active.as_mut() {
            active.resize(viewport, &self.options);
        }
    }

    /// Switch theme: tear down and run setup again so the glyph cache is
    /// rebuilt in the new colors before the next step.
    pub fn set_theme<H: FrameHost + ?Sized>(&mut self, host: &mut H, theme: ThemeMode) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;

        if let Some(mut active) = self.active.take() {
            active.teardown(host);
            debug!(theme = %theme, "Rebuilding rain glyphs for theme change");
            self.active = Some(Active::setup(host, active.surface, theme, &self.options));
        }
    }

    /// Revoke the pending frame, detach the resize listener and drop the surface.
    pub fn unmount<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(mut active) = self.active.take() {
            active.teardown(host);
            debug!("Rain layer unmounted");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn options(&self) -> &RainOptions {
        &self.options
    }

    pub fn columns(&self) -> Option<&ColumnState> {
        self.active.as_ref().map(|a| &a.columns)
    }

    pub fn glyphs(&self) -> Option<&GlyphCache> {
        self.active.as_ref().map(|a| &a.glyphs)
    }

    pub fn surface(&self) -> Option<&S> {
        self.active.as_ref().map(|a| &a.surface)
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.active.as_ref().and_then(|a| a.pending)
    }

    pub fn has_resize_listener(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.resize_listener.is_some())
    }
}

impl<S: Surface> Active<S> {
    fn setup<H: FrameHost + ?Sized>(
        host: &mut H,
        surface: S,
        theme: ThemeMode,
        options: &RainOptions,
    ) -> Self {
        let mut active = Self {
            surface,
            glyphs: GlyphCache::build(theme),
            columns: ColumnState::default(),
            pending: None,
            resize_listener: None,
        };
        active.resize(host.viewport(), options);
        active.resize_listener = Some(host.add_resize_listener());
        active.pending = Some(host.request_frame());
        active
    }

    fn teardown<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        if let Some(listener) = self.resize_listener.take() {
            host.remove_resize_listener(listener);
        }
    }

    fn resize(&mut self, viewport: Viewport, options: &RainOptions) {
        let (backing_width, backing_height) = viewport.backing_size();
        self.surface
            .resize(backing_width, backing_height, viewport.pixel_ratio);
        self.columns.reset(options.column_count(viewport.width));
        debug!(
            width = viewport.width,
            height = viewport.height,
            pixel_ratio = viewport.pixel_ratio,
            columns = self.columns.len(),
            "Rain surface resized"
        );
    }

    fn step<R: Rng>(&mut self, rng: &mut R, options: &RainOptions) {
        let Self {
            surface,
            glyphs,
            columns,
            ..
        } = self;

        surface.fade(FADE_ALPHA);

        let cell = options.cell_size;
        let bottom = u64::from(surface.backing_height());

        for column in 0..columns.len() {
            let Some(depth) = columns.depth(column) else {
                continue;
            };

            if rng.random::<f64>() < DRAW_PROBABILITY {
                if let Some(glyph) = glyphs.random(rng).copied() {
                    let x = (column as u32).saturating_mul(cell);
                    let y = depth.saturating_mul(cell);
                    surface.draw_glyph(&glyph, x, y);
                }
            }

            let fallen_past = u64::from(depth) * u64::from(cell) > bottom;
            if fallen_past && rng.random::<f64>() < RESPAWN_PROBABILITY {
                columns.respawn(column);
            } else {
                columns.advance(column);
            }
        }
    }
}
