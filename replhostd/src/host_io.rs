//! # Host Console I/O
//!
//! Binds the input bridge and an output sink into the single [`HostIo`]
//! surface the runtime core sees.

use console_bridge::ConsoleInputBridge;
use host_hal::ConsoleSink;
use runtime_api::HostIo;

/// The runtime's console, input and output sides together
///
/// Input units come from the bridge; output goes through the sink with
/// cooked newline conversion, so the runtime can emit logical `\n` and let
/// the host match the console's line-ending convention.
pub struct HostConsole {
    bridge: ConsoleInputBridge,
    sink: Box<dyn ConsoleSink>,
}

impl HostConsole {
    /// Creates the console surface over a bridge and a sink.
    pub fn new(bridge: ConsoleInputBridge, sink: Box<dyn ConsoleSink>) -> Self {
        Self { bridge, sink }
    }

    /// Read access to the underlying bridge (diagnostics).
    pub fn bridge(&self) -> &ConsoleInputBridge {
        &self.bridge
    }
}

impl HostIo for HostConsole {
    fn next_input_unit(&mut self) -> u8 {
        self.bridge.next_input_unit()
    }

    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        self.sink.write_cooked(buf)
    }
}

/// Plain stdout sink for sim mode
///
/// Sim runs leave the terminal in cooked mode, so bytes pass straight
/// through.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        use std::io::Write;
        let mut stdout = std::io::stdout();
        match stdout.write(buf) {
            Ok(written) => {
                let _ = stdout.flush();
                written
            }
            Err(_) => 0,
        }
    }
}
