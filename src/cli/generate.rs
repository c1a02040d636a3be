use heapdex::HashIndexSet;
use log::info;
use std::{
    error::Error,
    io::{self, BufWriter, Write},
};

pub fn generate(count: usize, max: u64, seed: Option<u64>) -> Result<(), Box<dyn Error>> {
    if count as u64 > max {
        return Err(format!("Cannot draw {} distinct values from 0..{}", count, max).into());
    }

    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    info!("Generating {} value(s) with seed {}", count, rng.get_seed());

    let stdout = io::stdout();
    let handle = stdout.lock();
    let mut writer = BufWriter::new(handle);

    let mut seen = HashIndexSet::new();
    while seen.len() < count {
        let value = rng.u64(0..max);
        if seen.insert(value) {
            writeln!(writer, "{}", value)?;
        }
    }

    writer.flush()?;
    Ok(())
}
