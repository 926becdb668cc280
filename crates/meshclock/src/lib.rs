// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Master-less, forward-only mesh time synchronization over broadcast datagrams.

Every node periodically broadcasts its own view of mesh time; every node,
on reception, pulls its view toward any advertised time that is ahead of
its own. The mesh clock is monotonically non-decreasing, converges to the
fastest-advancing node, tolerates packet loss and collisions, and exposes
a compact sync-state signal ([`SyncState`]) to callers.

# Example

```no_run
use std::sync::Arc;
use std::time::Duration;
use meshclock::{MeshClock, UdpRadio};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let radio = Arc::new(UdpRadio::bind("0.0.0.0:47800", "255.255.255.255:47800".parse()?)?);
    let clock = MeshClock::builder(radio).build()?;
    clock.begin(true)?;

    loop {
        clock.tick();
        println!("mesh time: {} ms ({:?})", clock.mesh_now_ms(), clock.sync_state());
        std::thread::sleep(Duration::from_millis(100));
    }
}
```

# Architecture

The core is driven by an external periodic [`tick()`](MeshClock::tick) and
by the radio's receive callback, which may run on another thread (or, on
embedded hosts, in interrupt context). All shared state is held in atomics;
no operation blocks, sleeps, or busy-waits. The radio itself is reached
through the [`Radio`] trait — [`UdpRadio`] is a reference transport for
hosts with a BSD socket stack, and embedded hosts supply their own.
*/

#![warn(missing_docs)]

/// Forward-only slew / large-step correction arithmetic.
pub mod adjust;

/// The monotonic counter contract and the standard-library implementation.
pub mod clock;

/// The core façade binding clock, codec, scheduler, and radio.
pub mod mesh;

/// Error types for configuration and radio failures.
pub mod error;

/// The radio seam: addressing, the transport trait, and its error type.
pub mod radio;

/// Randomized-interval broadcast scheduling.
pub mod scheduler;

/// Sync-state derivation.
pub mod state;

/// UDP reference transport implementing [`Radio`] over `std::net`.
pub mod udp;

pub use crate::clock::{MonotonicClock, StdClock};
pub use crate::mesh::{MeshClock, MeshClockBuilder};
pub use crate::error::MeshClockError;
pub use crate::radio::{BROADCAST_ADDR, PeerAddr, Radio, RadioError, RecvCallback};
pub use crate::state::SyncState;
pub use crate::udp::UdpRadio;

// Re-export the wire types for hosts that build or inspect frames directly.
pub use meshclock_proto::{ClockFrame, FrameError};
