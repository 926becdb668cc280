// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Forward-only slew / large-step correction arithmetic.
//!
//! Given the delta between a received remote stamp and the local mesh
//! time, [`compute`] decides how far to advance the offset. The rule is
//! forward-only: the offset never decreases, so two successive readings of
//! mesh time on the same node never go backwards. It is also
//! leader-follower-free: any node whose clock is ahead pulls the mesh, and
//! losing a node does not strand the rest — the mesh converges to the
//! maximum advertised time across peers.
//!
//! Two regimes:
//!
//! - **Discontinuous correction**, taken at first sync or when the delta
//!   magnitude exceeds the large-step threshold. A positive delta is
//!   applied whole; a negative delta is not applied at all. Slewing a
//!   multi-second startup delta a quarter at a time would take many
//!   receptions to converge, hence the jump.
//! - **Slew**, taken for small positive deltas once synced: the offset
//!   advances by `floor(delta * slew_alpha)`, a partial catch-up that
//!   damps oscillation between nodes pulling each other.
//!
//! This module is pure arithmetic — no allocation, no logging — because it
//! runs on the receive path, possibly in interrupt context.

/// The outcome of one correction decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Adjustment {
    /// Microseconds to add to the offset. Never negative.
    pub advance_us: u64,
    /// Whether this was a discontinuous (non-slewed) correction. The
    /// caller marks the node synced exactly when this is set.
    pub discontinuous: bool,
}

/// Decide how far to advance the offset for one received stamp.
///
/// * `delta_us` — remote mesh time minus local mesh time, signed.
/// * `synced` — whether a valid reception has occurred before.
/// * `slew_alpha` — fraction in [0, 1] applied to small positive deltas.
/// * `large_step_us` — magnitude above which corrections are applied
///   whole instead of slewed.
pub fn compute(delta_us: i64, synced: bool, slew_alpha: f64, large_step_us: u64) -> Adjustment {
    if !synced || delta_us.unsigned_abs() > large_step_us {
        // Discontinuous correction: jump forward, never backward. A large
        // negative delta means this node is ahead of the sender; it keeps
        // its own time and its own broadcasts pull the mesh instead.
        return Adjustment {
            advance_us: if delta_us > 0 { delta_us as u64 } else { 0 },
            discontinuous: true,
        };
    }
    if delta_us > 0 {
        // The product is exact in f64 for any delta within the large-step
        // range; truncation of the positive product is the floor.
        return Adjustment {
            advance_us: (delta_us as f64 * slew_alpha) as u64,
            discontinuous: false,
        };
    }
    // Local is already ahead; forward-only means no adjustment.
    Adjustment {
        advance_us: 0,
        discontinuous: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALPHA: f64 = 0.25;
    const LARGE_STEP: u64 = 10_000;

    #[test]
    fn test_first_sync_jumps_whole_delta() {
        let adj = compute(2_000_000, false, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 2_000_000);
        assert!(adj.discontinuous);
    }

    #[test]
    fn test_first_sync_small_delta_still_discontinuous() {
        let adj = compute(400, false, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 400);
        assert!(adj.discontinuous);
    }

    #[test]
    fn test_first_sync_negative_delta_holds_offset() {
        let adj = compute(-2_000_000, false, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(adj.discontinuous, "node still becomes synced");
    }

    #[test]
    fn test_synced_large_positive_jumps() {
        let adj = compute(50_000, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 50_000);
        assert!(adj.discontinuous);
    }

    #[test]
    fn test_synced_large_negative_holds_offset() {
        let adj = compute(-50_000, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(adj.discontinuous);
    }

    #[test]
    fn test_synced_small_positive_slews() {
        let adj = compute(400, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 100);
        assert!(!adj.discontinuous);
    }

    #[test]
    fn test_slew_floors() {
        // floor(399 * 0.25) = floor(99.75) = 99
        let adj = compute(399, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 99);

        // floor(3 * 0.25) = 0: tiny deltas may produce no movement.
        let adj = compute(3, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(!adj.discontinuous);
    }

    #[test]
    fn test_synced_small_negative_ignored() {
        let adj = compute(-500, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(!adj.discontinuous);
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly at the threshold: slewed (strictly-greater comparison).
        let adj = compute(LARGE_STEP as i64, true, ALPHA, LARGE_STEP);
        assert!(!adj.discontinuous);
        assert_eq!(adj.advance_us, 2_500);

        // One past the threshold: jumped.
        let adj = compute(LARGE_STEP as i64 + 1, true, ALPHA, LARGE_STEP);
        assert!(adj.discontinuous);
        assert_eq!(adj.advance_us, LARGE_STEP + 1);
    }

    #[test]
    fn test_zero_delta() {
        let adj = compute(0, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(!adj.discontinuous);

        let adj = compute(0, false, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(adj.discontinuous);
    }

    #[test]
    fn test_alpha_one_catches_up_whole() {
        let adj = compute(400, true, 1.0, LARGE_STEP);
        assert_eq!(adj.advance_us, 400);
    }

    #[test]
    fn test_alpha_zero_never_slews() {
        let adj = compute(400, true, 0.0, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
    }

    #[test]
    fn test_i64_min_delta_does_not_overflow() {
        let adj = compute(i64::MIN, true, ALPHA, LARGE_STEP);
        assert_eq!(adj.advance_us, 0);
        assert!(adj.discontinuous);
    }
}
