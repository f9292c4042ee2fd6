//! Structured logging subsystem.
//!
//! # Data Flow
//! ```text
//! LogConfig
//!     → logger.rs (build sinks: rotating file + console)
//!         → rotate.rs (size-based rotation, retention, gzip)
//!         → encoder.rs (JSON for the file, human lines for stdout)
//!     → facility.rs (exactly-once process-wide commit)
//!     → leveled emission: debug!…fatal equivalents as functions
//! ```
//!
//! # Design Decisions
//! - Both sinks share one threshold but filter independently
//! - Call sites are captured with `#[track_caller]`, so records point
//!   at the emitting caller rather than these wrappers
//! - Records at ERROR severity or above carry a stack trace
//! - `panic`/`fatal` terminate the process and are reserved for
//!   genuinely unrecoverable call sites

pub mod encoder;
pub mod facility;
pub mod level;
pub mod logger;
pub mod record;
pub mod rotate;
pub mod sink;

pub use facility::{
    debug, dpanic, error, fatal, info, init, initialized, panic, sync, warn, LogFacility,
};
pub use level::Level;
pub use logger::{LogInitError, Logger};
pub use record::{field, Field};
pub use sink::Sink;
