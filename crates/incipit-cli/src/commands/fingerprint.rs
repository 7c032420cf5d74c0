use anyhow::Result;
use clap::ValueEnum;

use incipit_core::{fingerprint_melody, fingerprint_rhythm, parse_events, DurationTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FingerprintKind {
    Melody,
    Rhythm,
}

pub fn run_fingerprint(tokens: &str, kind: FingerprintKind) -> Result<()> {
    let events = parse_events(tokens)?;

    let fingerprint = match kind {
        FingerprintKind::Melody => fingerprint_melody(&events)?,
        FingerprintKind::Rhythm => {
            let table = DurationTable::standard();
            fingerprint_rhythm(&events, &table)?
        }
    };

    println!("{fingerprint}");
    Ok(())
}
