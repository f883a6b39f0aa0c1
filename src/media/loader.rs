// SPDX-License-Identifier: MPL-2.0
//! Asynchronous decoding and the generation tokens that guard its results.
//!
//! Decoding runs on the blocking pool. Every request is stamped with the
//! latest generation of its slot; a result whose generation is no longer the
//! latest belongs to a superseded upload and must be dropped.

use super::image::{decode, Raster};
use crate::error::{Error, Result};

/// Which upload a decode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The poster.
    Background,
    /// The QR code.
    Overlay,
}

/// Stamp carried by a pending decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub slot: Slot,
    pub generation: u64,
}

/// Latest generation per slot.
#[derive(Debug, Clone, Default)]
pub struct LoadGenerations {
    background: u64,
    overlay: u64,
}

impl LoadGenerations {
    /// Starts a new request for `slot`, superseding any request in flight.
    pub fn issue(&mut self, slot: Slot) -> LoadTicket {
        self.invalidate(slot);
        LoadTicket {
            slot,
            generation: self.current(slot),
        }
    }

    /// Makes every outstanding ticket for `slot` stale.
    pub fn invalidate(&mut self, slot: Slot) {
        let generation = self.slot_mut(slot);
        *generation = generation.wrapping_add(1);
    }

    pub fn invalidate_all(&mut self) {
        self.invalidate(Slot::Background);
        self.invalidate(Slot::Overlay);
    }

    /// Whether `ticket` is still the latest request for its slot.
    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current(ticket.slot) == ticket.generation
    }

    fn current(&self, slot: Slot) -> u64 {
        match slot {
            Slot::Background => self.background,
            Slot::Overlay => self.overlay,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Background => &mut self.background,
            Slot::Overlay => &mut self.overlay,
        }
    }
}

/// Decodes `bytes` on the blocking pool.
///
/// A decode task that panics or is aborted is reported as [`Error::Decode`].
pub async fn load(bytes: Vec<u8>) -> Result<Raster> {
    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .unwrap_or_else(|e| Err(Error::Decode(format!("Decode task failed: {e}"))))
}
