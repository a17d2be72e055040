//! Shared setup for integration tests.
//!
//! Build with `--features tracing` and set `RUST_LOG` (for example
//! `RUST_LOG=overflow_btree=debug`) to see squeezes, splits and root growth
//! interleaved with the test output.

#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

static INIT: Once = Once::new();

/// Installs a console subscriber once per test binary. Later calls do nothing.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// A fixed 100-key smoke sequence, repeats included.
pub const SMOKE_SEQUENCE: [u32; 100] = [
    177, 248, 124, 75, 133, 230, 129, 101, 140, 143, 246, 113, 167, 142, 72, 227, 235, 103, 103, 28, //
    113, 250, 44, 35, 130, 9, 196, 40, 125, 34, 245, 102, 245, 40, 216, 213, 57, 37, 245, 96, //
    7, 130, 78, 146, 247, 32, 251, 253, 113, 36, 62, 28, 31, 183, 53, 118, 80, 163, 243, 183, //
    141, 222, 49, 252, 221, 179, 245, 48, 251, 74, 228, 199, 9, 121, 17, 133, 255, 166, 169, 163, //
    225, 213, 39, 31, 37, 162, 7, 195, 199, 160, 164, 246, 224, 19, 171, 186, 81, 45, 197, 206, //
];
