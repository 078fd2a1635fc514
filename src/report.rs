//! Serial output sink: the formatting service the controller reports through.

use core::fmt::Write;

use heapless::String;

/// Trait for abstracting the serial text output.
///
/// The controller composes its reports from these four operations; the exact
/// byte framing (padding, line endings beyond what the controller writes) is
/// the implementor's business. All operations are infallible: absorb any
/// hardware error internally, the way a UART helper drops bytes it cannot
/// queue.
pub trait SerialSink {
    /// Transmits a string as-is.
    fn write_str(&mut self, s: &str);

    /// Transmits one ASCII byte `count` times.
    fn write_repeated(&mut self, byte: u8, count: u8);

    /// Transmits a value as decimal text.
    fn write_dec(&mut self, value: u16);

    /// Transmits a value as hexadecimal text.
    fn write_hex(&mut self, value: u16);
}

/// A [`SerialSink`] that assembles text into a fixed-capacity buffer.
///
/// Useful where transmission happens a line at a time (DMA, deferred flush)
/// and as the recording sink in tests. Writes past capacity are silently
/// truncated; pick `N` for the longest line the device emits.
#[derive(Debug, Default)]
pub struct LineBuffer<const N: usize> {
    buffer: String<N>,
}

impl<const N: usize> LineBuffer<N> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        LineBuffer {
            buffer: String::new(),
        }
    }

    /// Returns the assembled text.
    pub fn as_str(&self) -> &str {
        self.buffer.as_str()
    }

    /// Discards the assembled text, e.g. after handing it to a transfer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl<const N: usize> SerialSink for LineBuffer<N> {
    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.buffer.push(c).is_err() {
                break;
            }
        }
    }

    fn write_repeated(&mut self, byte: u8, count: u8) {
        for _ in 0..count {
            let _ = self.buffer.push(byte as char);
        }
    }

    fn write_dec(&mut self, value: u16) {
        let _ = write!(self.buffer, "{value}");
    }

    fn write_hex(&mut self, value: u16) {
        let _ = write!(self.buffer, "0x{value:04X}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_the_four_operations_in_order() {
        let mut sink = LineBuffer::<32>::new();
        sink.write_str("adc ");
        sink.write_repeated(b'*', 3);
        sink.write_repeated(b' ', 1);
        sink.write_hex(0x03FF);
        assert_eq!(sink.as_str(), "adc *** 0x03FF");
    }

    #[test]
    fn decimal_and_comma_framing() {
        let mut sink = LineBuffer::<16>::new();
        sink.write_dec(512);
        sink.write_repeated(b',', 1);
        sink.write_dec(0);
        sink.write_repeated(b',', 1);
        assert_eq!(sink.as_str(), "512,0,");
    }

    #[test]
    fn truncates_silently_at_capacity() {
        let mut sink = LineBuffer::<4>::new();
        sink.write_str("abcdef");
        assert_eq!(sink.as_str(), "abcd");
        sink.write_dec(123);
        assert_eq!(sink.as_str(), "abcd");
    }

    #[test]
    fn clear_resets_for_the_next_line() {
        let mut sink = LineBuffer::<8>::new();
        sink.write_dec(42);
        sink.clear();
        assert_eq!(sink.as_str(), "");
    }
}
