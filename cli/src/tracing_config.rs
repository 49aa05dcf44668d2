//! Log output for the command line tool.
//!
//! ```bash
//! TSS_LOG=debug tss-complete --schema schema.json app/styles/index.tss --offset 42
//! TSS_LOG="ide=trace,schema=info" tss-complete ...
//! ```
//!
//! Nothing is installed unless `TSS_LOG` or `RUST_LOG` is set. Output goes to stderr so it
//! never mixes with the candidates printed on stdout.

use tracing_subscriber::EnvFilter;

/// `TSS_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    match std::env::var("TSS_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) => EnvFilter::from_default_env(),
    }
}

pub fn init_tracing() {
    let enabled = std::env::var_os("TSS_LOG").is_some() || std::env::var_os("RUST_LOG").is_some();
    if !enabled {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(build_filter())
        .with_writer(std::io::stderr)
        .init();
}
