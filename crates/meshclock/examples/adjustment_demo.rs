// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Forward-only adjustment walkthrough.
//!
//! Feeds a fixed sequence of remote stamps through the correction rule and
//! prints each decision, showing the large-step jump at first sync, the
//! 25% slew in steady state, and negative deltas being ignored.
//!
//! Run with:
//! ```sh
//! cargo run -p meshclock --example adjustment_demo
//! ```

use meshclock::adjust;

fn main() {
    let slew_alpha = 0.25;
    let large_step_us = 10_000u64;

    println!("Forward-Only Clock Adjustment Demo");
    println!("===================================");
    println!("slew_alpha = {slew_alpha}, large_step = {large_step_us} us");
    println!();

    // (local mesh time, received remote stamp)
    let receptions: [(u64, u64); 7] = [
        (100_000, 2_100_000),   // cold start: 2 s behind the mesh
        (2_150_000, 2_150_400), // steady state: 400 us behind
        (2_200_100, 2_200_500), // still catching up
        (2_250_000, 2_249_500), // remote is behind us: ignored
        (2_300_000, 2_300_003), // tiny delta floors to zero movement
        (2_350_000, 2_450_000), // gross deviation: jump again
        (2_500_000, 2_500_000), // exactly in step
    ];

    let mut synced = false;
    let mut offset = 0i64;

    for (i, (local, remote)) in receptions.into_iter().enumerate() {
        let delta = remote as i64 - local as i64;
        let adj = adjust::compute(delta, synced, slew_alpha, large_step_us);
        offset += adj.advance_us as i64;
        if adj.discontinuous {
            synced = true;
        }

        println!(
            "rx {:2}: local={:>9}  remote={:>9}  delta={:+8}  -> {} by {} us (offset now {})",
            i + 1,
            local,
            remote,
            delta,
            if adj.discontinuous {
                "step"
            } else if adj.advance_us > 0 {
                "slew"
            } else {
                "hold"
            },
            adj.advance_us,
            offset,
        );
    }

    println!();
    println!("The offset only ever grew: mesh time never runs backwards.");
}
