//! Serial console abstraction
//!
//! The demo writes a single greeting line at boot; all it needs from the
//! console is a readiness check and best-effort blocking writes.

/// Serial transmitter
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Check if the transport has completed initialization and is safe
    /// to write to
    fn is_ready(&self) -> bool;

    /// Write data to the transport
    ///
    /// Blocks until all data has been accepted or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}
