// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! UDP reference transport implementing [`Radio`] over `std::net`.
//!
//! Maps the six-byte link-layer addressing onto IPv4 + port: the first
//! four bytes are the address octets, the last two the big-endian port.
//! [`BROADCAST_ADDR`] maps to a target socket address fixed at bind time —
//! a subnet broadcast address in real deployments, or simply the other
//! node's address in loopback tests.
//!
//! This is demo and test plumbing for hosts with a BSD socket stack; it is
//! not part of the protocol. Embedded hosts implement [`Radio`] over their
//! own radio driver instead.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs, UdpSocket};
use std::sync::{Mutex, PoisonError};
use std::thread;

use log::{trace, warn};

use crate::radio::{BROADCAST_ADDR, PeerAddr, Radio, RadioError, RecvCallback};

/// Pack an IPv4 socket address into a six-byte peer address.
pub fn pack_addr(addr: SocketAddrV4) -> PeerAddr {
    let ip = addr.ip().octets();
    let port = addr.port().to_be_bytes();
    [ip[0], ip[1], ip[2], ip[3], port[0], port[1]]
}

/// Unpack a six-byte peer address into an IPv4 socket address.
pub fn unpack_addr(addr: PeerAddr) -> SocketAddrV4 {
    SocketAddrV4::new(
        Ipv4Addr::new(addr[0], addr[1], addr[2], addr[3]),
        u16::from_be_bytes([addr[4], addr[5]]),
    )
}

/// A [`Radio`] over a UDP socket.
pub struct UdpRadio {
    socket: UdpSocket,
    broadcast_target: SocketAddrV4,
    reader: Mutex<Option<thread::JoinHandle<()>>>,
}

impl UdpRadio {
    /// Bind a socket and fix the address that [`BROADCAST_ADDR`] maps to.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] if the bind fails.
    pub fn bind<A: ToSocketAddrs>(bind: A, broadcast_target: SocketAddrV4) -> io::Result<Self> {
        let socket = UdpSocket::bind(bind)?;
        Ok(UdpRadio {
            socket,
            broadcast_target,
            reader: Mutex::new(None),
        })
    }

    /// The local address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] if the socket has no local
    /// address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    fn resolve(&self, dest: PeerAddr) -> SocketAddrV4 {
        if dest == BROADCAST_ADDR {
            self.broadcast_target
        } else {
            unpack_addr(dest)
        }
    }
}

impl Radio for UdpRadio {
    fn init(&self) -> Result<(), RadioError> {
        self.socket.set_broadcast(true).map_err(RadioError::Init)
    }

    fn add_broadcast_peer(&self, _addr: PeerAddr) -> Result<(), RadioError> {
        // The broadcast target was fixed at bind time; UDP needs no peer
        // table entry.
        Ok(())
    }

    fn send(&self, dest: PeerAddr, frame: &[u8]) -> Result<(), RadioError> {
        let target = self.resolve(dest);
        self.socket
            .send_to(frame, target)
            .map_err(RadioError::Send)?;
        Ok(())
    }

    fn set_recv_callback(&self, callback: RecvCallback) -> Result<(), RadioError> {
        let socket = self.socket.try_clone().map_err(RadioError::Callback)?;
        let handle = thread::spawn(move || {
            // Datagrams on this medium are short; 256 bytes is ample.
            let mut buf = [0u8; 256];
            loop {
                match socket.recv_from(&mut buf) {
                    Ok((len, SocketAddr::V4(src))) => {
                        trace!("recv {} bytes from {}", len, src);
                        callback(pack_addr(src), &buf[..len]);
                    }
                    Ok((len, src)) => {
                        trace!("dropping {} bytes from non-IPv4 source {}", len, src);
                    }
                    Err(e) => {
                        warn!("recv failed: {}", e);
                        return;
                    }
                }
            }
        });
        let mut reader = self.reader.lock().unwrap_or_else(PoisonError::into_inner);
        *reader = Some(handle);
        Ok(())
    }
}
