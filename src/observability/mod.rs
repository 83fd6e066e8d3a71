//! File-based logging and optional OpenTelemetry span export.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
