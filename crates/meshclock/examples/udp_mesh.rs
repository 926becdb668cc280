// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! A mesh node over UDP broadcast.
//!
//! Run one instance per machine on the same subnet (or several on one
//! machine with distinct ports, pointing at each other):
//!
//! ```sh
//! cargo run -p meshclock --example udp_mesh -- 0.0.0.0:47800 255.255.255.255:47800
//! ```
//!
//! Watch the nodes converge: the one with the most-advanced clock pulls
//! the others, and killing it leaves the survivors SYNCED with each other.
//! Set `RUST_LOG=debug` to see every broadcast and adjustment.

use std::sync::Arc;
use std::time::Duration;

use meshclock::{MeshClock, SyncState, UdpRadio};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let bind = args.next().unwrap_or_else(|| "0.0.0.0:47800".to_string());
    let target = args
        .next()
        .unwrap_or_else(|| "255.255.255.255:47800".to_string())
        .parse()?;

    let radio = Arc::new(UdpRadio::bind(&bind, target)?);
    println!("node on {}, broadcasting to {}", bind, target);

    let clock = MeshClock::builder(radio).build()?;
    clock.begin(true)?;

    let mut last_report = 0u32;
    loop {
        clock.tick();

        // Report roughly once a second, in mesh time.
        let now_ms = clock.mesh_now_ms();
        if now_ms.wrapping_sub(last_report) >= 1000 {
            last_report = now_ms;
            let marker = match clock.sync_state() {
                SyncState::Alone => "ALONE",
                SyncState::Synced => "SYNCED",
                SyncState::Lost => "LOST",
            };
            println!("mesh time {:>12} us  [{}]", clock.mesh_now_us(), marker);
        }

        std::thread::sleep(Duration::from_millis(10));
    }
}
