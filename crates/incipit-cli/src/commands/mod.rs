pub mod config;
pub mod fingerprint;
pub mod search;

pub use config::{run_config, ConfigAction};
pub use fingerprint::{run_fingerprint, FingerprintKind};
pub use search::{run_search, Mode};
