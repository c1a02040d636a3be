use indicatif::{ProgressBar, ProgressStyle};
use memmap2::Mmap;
use std::{
    error::Error,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};

pub mod generate;
pub mod search;
pub mod top_k;

/// Directories with fewer files than this load without a progress bar.
const PROGRESS_BAR_MIN_FILES: usize = 200;

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}

/// Lists the regular files in `dir`, sorted by path.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if !dir.is_dir() {
        return Err(format!("Path {:?} is not a directory", dir).into());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Calls `f` with the contents of `path`, memory mapped.
pub fn with_file_text<R>(path: &Path, f: impl FnOnce(&str) -> R) -> Result<R, Box<dyn Error>> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(f(""));
    }

    // SAFETY: mapping a file is safe as long as the file isn't modified concurrently.
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(f(std::str::from_utf8(&mmap)?))
}

pub fn read_stdin() -> Result<String, Box<dyn Error>> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

pub fn should_use_progress_bar(num_files: usize) -> bool {
    num_files >= PROGRESS_BAR_MIN_FILES
}

pub fn create_progress_bar(len: usize) -> Result<ProgressBar, Box<dyn Error>> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})")?
            .progress_chars("=> "),
    );
    Ok(pb)
}
