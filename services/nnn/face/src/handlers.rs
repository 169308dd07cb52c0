//! Upper-layer packet handlers.

use crate::FaceId;
use nnn_wire::{Aen, Do, En, Inf, NullP, Ren, So};

/// Receives decoded packets from a face.
///
/// Every method defaults to a no-op, so implementors only write the kinds
/// they care about.
pub trait PacketHandlers {
    /// A NULL packet arrived on `face`
    fn on_nullp(&mut self, face: FaceId, packet: &NullP) {
        let _ = (face, packet);
    }

    /// A solicitation arrived on `face`
    fn on_so(&mut self, face: FaceId, packet: &So) {
        let _ = (face, packet);
    }

    /// A data object arrived on `face`
    fn on_do(&mut self, face: FaceId, packet: &Do) {
        let _ = (face, packet);
    }

    /// An enrollment arrived on `face`
    fn on_en(&mut self, face: FaceId, packet: &En) {
        let _ = (face, packet);
    }

    /// An enrollment acknowledgement arrived on `face`
    fn on_aen(&mut self, face: FaceId, packet: &Aen) {
        let _ = (face, packet);
    }

    /// A renewal arrived on `face`
    fn on_ren(&mut self, face: FaceId, packet: &Ren) {
        let _ = (face, packet);
    }

    /// An inform arrived on `face`
    fn on_inf(&mut self, face: FaceId, packet: &Inf) {
        let _ = (face, packet);
    }
}
