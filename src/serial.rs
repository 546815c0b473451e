use crate::frame::Frame;
use serialport::SerialPortBuilder;
use std::io::Write;
use std::time::Duration;
use tracing::debug;

/// Shorter type alias for handles to serial ports.
///
/// Currently the same for all platforms but that might change in the future.
#[cfg(not(test))]
pub type Serial = Box<dyn serialport::SerialPort>;
#[cfg(test)]
pub type Serial = mock::MockSerial;

/// Line settings the badge has been observed to use.
pub const BAUD_RATE: u32 = 38400;
pub const DATA_BITS: serialport::DataBits = serialport::DataBits::Eight;
pub const PARITY: serialport::Parity = serialport::Parity::None;
pub const STOP_BITS: serialport::StopBits = serialport::StopBits::One;

const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection settings for the badge on the given port, ready to open.
fn settings(port: &str) -> SerialPortBuilder {
    serialport::new(port, BAUD_RATE)
        .data_bits(DATA_BITS)
        .parity(PARITY)
        .stop_bits(STOP_BITS)
        .timeout(WRITE_TIMEOUT)
}

/// Opens a connection to the badge on the given port.
#[cfg(not(test))]
pub fn open(port: &str) -> serialport::Result<Serial> {
    settings(port).open()
}

/// Test builds never touch real hardware. Opening any port yields a mock that
/// accepts all writes and hands them to [`mock::take_sent`] when dropped.
#[cfg(test)]
pub fn open(port: &str) -> serialport::Result<Serial> {
    let _settings = settings(port);
    Ok(Serial::builder().record_on_drop().build())
}

/// Writes the whole frame and waits until it has been handed to the port.
pub fn write_frame(serial: &mut Serial, frame: &Frame) -> std::io::Result<()> {
    debug!("Writing {len} bytes", len = frame.as_bytes().len());
    serial.write_all(frame.as_bytes())?;
    serial.flush()
}

#[cfg(test)]
pub mod mock {
    use std::cell::RefCell;
    use std::io::{Error, ErrorKind, Result, Write};
    use std::mem::take;

    thread_local! {
        // tests run on their own threads, so every test sees only its own writes
        static SENT: RefCell<Vec<Vec<u8>>> = RefCell::new(vec![]);
    }

    /// Takes the bytes written to each recording mock that has been dropped on
    /// this thread so far, one entry per opened connection, in order.
    pub fn take_sent() -> Vec<Vec<u8>> {
        SENT.with(|sent| take(&mut *sent.borrow_mut()))
    }

    pub struct MockSerial {
        written: Vec<u8>,
        max_chunk: Option<usize>,
        fail_after: Option<usize>,
        record: bool
    }

    impl Drop for MockSerial {
        fn drop(&mut self) {
            if self.record {
                let written = take(&mut self.written);
                SENT.with(|sent| sent.borrow_mut().push(written));
            }
        }
    }

    impl Write for MockSerial {
        fn write(&mut self, buf: &[u8]) -> Result<usize> {
            if let Some(limit) = self.fail_after {
                if self.written.len() >= limit {
                    return Err(Error::new(ErrorKind::BrokenPipe, "mock serial disconnected"));
                }
            }

            // accept at most max_chunk bytes per call, like a slow port would
            let len = match self.max_chunk {
                Some(max) => buf.len().min(max),
                None => buf.len()
            };
            // never write past the disconnect point
            let len = match self.fail_after {
                Some(limit) => len.min(limit - self.written.len()),
                None => len
            };
            self.written.extend_from_slice(&buf[..len]);
            Ok(len)
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
    }

    impl MockSerial {
        pub fn builder() -> Builder {
            Builder {
                max_chunk: None,
                fail_after: None,
                record: false
            }
        }

        /// Everything that has been written to the mock so far.
        pub fn written(&self) -> &[u8] {
            &self.written[..]
        }
    }

    pub struct Builder {
        max_chunk: Option<usize>,
        fail_after: Option<usize>,
        record: bool
    }

    impl Builder {
        /// Limits the amount of bytes accepted in a single write call.
        pub fn max_chunk(&mut self, max: usize) -> &mut Self {
            self.max_chunk = Some(max);
            self
        }

        /// Plans that the port fails with a broken pipe after accepting the given
        /// amount of bytes, as if it was unplugged.
        pub fn disconnect_after(&mut self, len: usize) -> &mut Self {
            self.fail_after = Some(len);
            self
        }

        /// Plans that everything written is kept for [`take_sent`] once the mock
        /// is dropped.
        pub fn record_on_drop(&mut self) -> &mut Self {
            self.record = true;
            self
        }

        /// Finish the build.
        ///
        /// Can safely be called multiple times.
        pub fn build(&self) -> MockSerial {
            MockSerial {
                written: vec![],
                max_chunk: self.max_chunk,
                fail_after: self.fail_after,
                record: self.record
            }
        }
    }
}
