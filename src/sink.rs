//! Byte-oriented output transports.
//!
//! A [`ByteSink`] accepts one byte at a time. It does no buffering, retry
//! or flow control beyond what the transport itself guarantees.

use core::convert::Infallible;

use crate::error::SinkFull;

/// Single-method output transport supplied by the platform.
pub trait ByteSink {
    /// Error raised when the transport cannot accept a byte.
    ///
    /// Transports that never fail use [`Infallible`].
    type Error;

    /// Pushes one byte to the transport.
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }
}

impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    type Error = SinkFull;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte).map_err(|_| SinkFull)
    }
}

/// Raw transmitter with a "data register empty" flag, e.g. a UART.
pub trait TxPort {
    /// Returns true when the port can take another byte.
    fn is_ready(&mut self) -> bool;
    /// Hands a byte to the port. Only called after `is_ready` returned true.
    fn put(&mut self, byte: u8);
}

/// Adapts a [`TxPort`] into a [`ByteSink`] that spins until the port is ready.
///
/// Never fails. A port that never becomes ready blocks forever.
#[derive(Debug)]
pub struct PolledTx<P: TxPort>(P);

impl<P: TxPort> PolledTx<P> {
    pub fn new(port: P) -> Self {
        Self(port)
    }

    pub fn port(&self) -> &P {
        &self.0
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: TxPort> ByteSink for PolledTx<P> {
    type Error = Infallible;

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        while !self.0.is_ready() {
            core::hint::spin_loop();
        }
        self.0.put(byte);
        Ok(())
    }
}

/// Pushes `bytes` to the sink up to the first NUL or the end of the slice.
///
/// Returns the number of bytes written.
pub fn print<S: ByteSink>(sink: &mut S, bytes: &[u8]) -> Result<usize, S::Error> {
    let mut count = 0;
    for &b in bytes.iter().take_while(|&&b| b != 0) {
        sink.write_byte(b)?;
        count += 1;
    }
    Ok(count)
}
