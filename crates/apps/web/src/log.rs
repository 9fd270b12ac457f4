//! Routes `tracing` output to the browser console.
//!
//! Each event goes to the console method matching its level, so warnings and
//! errors keep their highlighting and filters in the devtools.

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Console method an event is written with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    fn for_level(level: &Level) -> Self {
        match *level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Debug,
        }
    }

    fn emit(self, args: &js_sys::Array) {
        match self {
            ConsoleMethod::Error => web_sys::console::error(args),
            ConsoleMethod::Warn => web_sys::console::warn(args),
            ConsoleMethod::Info => web_sys::console::info(args),
            ConsoleMethod::Debug => web_sys::console::debug(args),
        }
    }
}

/// Hands the fmt layer a writer bound to one event's console method.
pub struct ConsoleWriters;

pub struct ConsoleWriter {
    method: ConsoleMethod,
}

impl<'a> MakeWriter<'a> for ConsoleWriters {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Info,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::for_level(meta.level()),
        }
    }
}

impl std::io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let line = match core::str::from_utf8(buf) {
            Ok(text) => JsValue::from_str(text.trim_end()),
            Err(_) => JsValue::from_str(&String::from_utf8_lossy(buf)),
        };
        self.method.emit(&js_sys::Array::of1(&line));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Installs the panic hook and a console subscriber. Safe to call twice.
pub fn init() {
    console_error_panic_hook::set_once();
    // No wall clock on wasm32-unknown-unknown; timestamps come from the console.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriters)
        .without_time()
        .with_max_level(Level::DEBUG)
        .try_init();
}
