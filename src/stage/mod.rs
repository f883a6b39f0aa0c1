// SPDX-License-Identifier: MPL-2.0
//! The stage: one owner for the poster, the QR code, the selection and the
//! surfaces they are drawn on.
//!
//! Every mutation goes through a method on [`Stage`], and every method that
//! changes what is visible ends with a redraw, so the preview surface always
//! reflects the current state. Pointer input is handled in [`pointer`];
//! decoding results come back through [`Stage::apply_loaded`], which drops
//! anything superseded while it was in flight.
//!
//! # Example
//!
//! ```no_run
//! # async fn demo(poster: Vec<u8>, qr: Vec<u8>) {
//! use poster_stamp::domain::Point;
//! use poster_stamp::media::Slot;
//! use poster_stamp::stage::{Message, Stage, StageSettings};
//!
//! let mut stage = Stage::new(StageSettings::default());
//! stage.load(Slot::Background, poster).await;
//! stage.load(Slot::Overlay, qr).await;
//!
//! stage.handle(Message::PointerPressed(Point::new(300.0, 100.0)));
//! stage.handle(Message::PointerMoved(Point::new(420.0, 220.0)));
//! stage.handle(Message::PointerReleased);
//!
//! let png = stage.export_composite();
//! # }
//! ```

pub mod messages;
pub mod pointer;

pub use messages::{Effect, LoadOutcome, Message};
pub use pointer::PointerState;

use crate::config::defaults::{DEFAULT_PREVIEW_HEIGHT, DEFAULT_PREVIEW_WIDTH};
use crate::config::Config;
use crate::domain::{FittedPlacement, OverlayRect, PreviewSize, Rect, SquareSelection};
use crate::error::Result;
use crate::i18n::fluent::I18n;
use crate::media::{self, encode_png, LoadGenerations, LoadTicket, Raster, Slot};
use crate::render::{Compositor, Scene, SurfaceState};
use tiny_skia::Pixmap;

/// Hint drawn on the empty preview when no translation is supplied.
pub const DEFAULT_PLACEHOLDER_HINT: &str =
    "Your poster will appear here. Drag on it to draw a square.";

/// Construction parameters for a [`Stage`].
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub preview: PreviewSize,
    /// Text centered on the placeholder.
    pub placeholder_text: String,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            preview: PreviewSize::new(DEFAULT_PREVIEW_WIDTH, DEFAULT_PREVIEW_HEIGHT),
            placeholder_text: DEFAULT_PLACEHOLDER_HINT.to_string(),
        }
    }
}

impl StageSettings {
    /// Settings from user preferences, with the hint in the active locale.
    #[must_use]
    pub fn from_config(config: &Config, i18n: &I18n) -> Self {
        Self {
            preview: config.preview_size(),
            placeholder_text: i18n.tr("placeholder-hint"),
        }
    }
}

/// The poster and where it is drawn.
#[derive(Debug, Clone)]
struct Background {
    raster: Raster,
    placement: FittedPlacement,
}

#[derive(Debug)]
pub struct Stage {
    placeholder_text: String,
    background: Option<Background>,
    overlay: Option<Raster>,
    /// Committed selection. A square being drawn lives in `pointer`.
    selection: Option<SquareSelection>,
    overlay_rect: Option<OverlayRect>,
    pointer: PointerState,
    loads: LoadGenerations,
    surfaces: SurfaceState,
    compositor: Compositor,
}

impl Stage {
    /// Creates a stage showing the placeholder.
    #[must_use]
    pub fn new(settings: StageSettings) -> Self {
        let mut stage = Self {
            placeholder_text: settings.placeholder_text,
            background: None,
            overlay: None,
            selection: None,
            overlay_rect: None,
            pointer: PointerState::Idle,
            loads: LoadGenerations::default(),
            surfaces: SurfaceState::new(settings.preview),
            compositor: Compositor::new(),
        };
        stage.redraw();
        stage
    }

    /// Handles a pointer message.
    ///
    /// Note: Takes `Message` by value following the `update(message)` pattern
    /// of the shells driving the stage.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::PointerPressed(position) => self.pointer_pressed(position),
            Message::PointerMoved(position) => self.pointer_moved(position),
            Message::PointerReleased | Message::PointerLeft => self.pointer_released(),
        }
    }

    /// Replaces the poster.
    ///
    /// Any selection, overlay placement or gesture is dropped, and pending
    /// poster decodes become stale.
    pub fn set_background(&mut self, raster: Option<Raster>) -> Effect {
        self.loads.invalidate(Slot::Background);
        self.background = raster.map(|raster| {
            let placement = raster.fit_into(self.surfaces.size());
            tracing::debug!(
                width = raster.width(),
                height = raster.height(),
                scale = placement.scale,
                "background fitted"
            );
            Background { raster, placement }
        });
        self.pointer = PointerState::Idle;
        let effect = self.clear_selection();
        self.redraw();
        effect
    }

    /// Replaces the QR code.
    ///
    /// With a selection in place the new overlay is auto-fitted into it; a
    /// `None` overlay removes the overlay placement.
    pub fn set_overlay(&mut self, raster: Option<Raster>) -> Effect {
        self.loads.invalidate(Slot::Overlay);
        if matches!(self.pointer, PointerState::DraggingOverlay { .. }) {
            self.pointer = PointerState::Idle;
        }
        self.overlay = raster;
        self.refit_overlay();
        self.redraw();
        Effect::None
    }

    /// Changes the preview surface size.
    ///
    /// The poster is refitted and the selection is cleared, since it was
    /// expressed against the old layout.
    pub fn resize_preview(&mut self, size: PreviewSize) -> Effect {
        if size == self.surfaces.size() && self.surfaces.preview().is_some() {
            return Effect::None;
        }
        tracing::debug!(width = size.width, height = size.height, "preview resized");
        self.surfaces.resize(size);
        if let Some(background) = self.background.as_mut() {
            background.placement = background.raster.fit_into(size);
        }
        self.pointer = PointerState::Idle;
        let effect = self.clear_selection();
        self.redraw();
        effect
    }

    /// Stamps a new decode request for `slot`, superseding earlier ones.
    pub fn begin_load(&mut self, slot: Slot) -> LoadTicket {
        self.loads.issue(slot)
    }

    /// Installs a finished decode if `ticket` is still the latest for its slot.
    pub fn apply_loaded(&mut self, ticket: LoadTicket, result: Result<Raster>) -> LoadOutcome {
        if !self.loads.is_current(ticket) {
            tracing::debug!(?ticket, "discarding superseded decode");
            return LoadOutcome::Discarded;
        }

        match result {
            Ok(raster) => {
                let effect = match ticket.slot {
                    Slot::Background => self.set_background(Some(raster)),
                    Slot::Overlay => self.set_overlay(Some(raster)),
                };
                LoadOutcome::Applied(effect)
            }
            Err(error) => {
                tracing::warn!(slot = ?ticket.slot, %error, "decode failed");
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Decodes `bytes` off the calling thread and installs the result into
    /// `slot`.
    pub async fn load(&mut self, slot: Slot, bytes: Vec<u8>) -> LoadOutcome {
        let ticket = self.begin_load(slot);
        let result = media::load(bytes).await;
        self.apply_loaded(ticket, result)
    }

    /// Makes every in-flight decode stale.
    pub fn cancel_pending_loads(&mut self) {
        self.loads.invalidate_all();
    }

    /// Returns to the initial placeholder state.
    pub fn reset(&mut self) -> Effect {
        self.loads.invalidate_all();
        self.background = None;
        self.overlay = None;
        self.pointer = PointerState::Idle;
        let effect = self.clear_selection();
        self.surfaces.clear();
        self.redraw();
        effect
    }

    /// Renders the poster at native resolution with the QR code stamped in,
    /// encoded as PNG.
    ///
    /// Returns `None` when no poster is loaded or encoding fails.
    pub fn export_composite(&mut self) -> Option<Vec<u8>> {
        let Some(background) = self.background.as_ref() else {
            tracing::debug!("export requested without a background");
            return None;
        };

        let scene = Scene {
            background: Some((&background.raster, &background.placement)),
            overlay: self.overlay.as_ref().zip(self.overlay_rect.as_ref()),
            selection: None,
            placeholder: "",
        };
        let target = self
            .surfaces
            .export_surface(background.raster.width(), background.raster.height())?;
        Compositor::draw_export(target, &scene);

        match encode_png(target) {
            Ok(bytes) => {
                tracing::debug!(bytes = bytes.len(), "composite exported");
                Some(bytes)
            }
            Err(error) => {
                tracing::warn!(%error, "export encoding failed");
                None
            }
        }
    }

    /// Redraws the preview surface from the current state.
    pub fn redraw(&mut self) {
        let shown = self.displayed_selection();
        let scene = Scene {
            background: self
                .background
                .as_ref()
                .map(|background| (&background.raster, &background.placement)),
            overlay: self.overlay.as_ref().zip(self.overlay_rect.as_ref()),
            selection: shown.as_ref(),
            placeholder: &self.placeholder_text,
        };
        if let Some(target) = self.surfaces.preview_mut() {
            self.compositor.draw_preview(target, &scene);
        }
    }

    /// The committed selection.
    #[must_use]
    pub fn selection(&self) -> Option<SquareSelection> {
        self.selection
    }

    /// The square currently outlined: the live candidate while drawing,
    /// otherwise the committed selection.
    #[must_use]
    pub fn displayed_selection(&self) -> Option<SquareSelection> {
        match self.pointer {
            PointerState::DrawingSelection {
                candidate: Some(candidate),
                ..
            } => Some(candidate),
            _ => self.selection,
        }
    }

    #[must_use]
    pub fn overlay_rect(&self) -> Option<OverlayRect> {
        self.overlay_rect
    }

    /// Placement of the poster on the preview.
    #[must_use]
    pub fn placement(&self) -> Option<FittedPlacement> {
        self.background.as_ref().map(|background| background.placement)
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Pixmap> {
        self.surfaces.preview()
    }

    #[must_use]
    pub fn preview_size(&self) -> PreviewSize {
        self.surfaces.size()
    }

    #[must_use]
    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    #[must_use]
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    #[must_use]
    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether a shell should offer export: poster, QR code and selection
    /// are all present.
    #[must_use]
    pub fn can_export(&self) -> bool {
        self.background.is_some() && self.overlay.is_some() && self.selection.is_some()
    }

    /// Drawn bounds of the poster, if one is loaded and drawable.
    fn drawable_bounds(&self) -> Option<Rect> {
        self.background
            .as_ref()
            .map(|background| background.placement)
            .filter(FittedPlacement::is_drawable)
            .map(|placement| placement.bounds())
    }

    fn refit_overlay(&mut self) {
        self.overlay_rect = match (&self.overlay, &self.selection) {
            (Some(overlay), Some(selection)) => Some(OverlayRect::auto_fit(
                selection,
                overlay.width(),
                overlay.height(),
            )),
            _ => None,
        };
    }

    /// Drops selection and overlay placement, reporting the change if there
    /// was a selection to drop.
    fn clear_selection(&mut self) -> Effect {
        self.overlay_rect = None;
        if self.selection.take().is_some() {
            Effect::SelectionChanged {
                selection: None,
                overlay_missing: self.overlay.is_none(),
            }
        } else {
            Effect::None
        }
    }
}
