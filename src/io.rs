//! Input/output plumbing for the command line: stdio or files, with file
//! output replaced atomically so a failed run never truncates the target.

use crate::error::Result;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Temporary output file of the run in progress, removed on interrupt
static PENDING_OUTPUT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Opens the input table; `None` and `-` read standard input
pub fn open_input(path: Option<&str>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != "-" => {
            log::info!("Reading {}", path);
            Ok(Box::new(BufReader::new(File::open(path)?)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Runs `write` against the output destination (`None` or `-` for stdout).
///
/// File destinations are written to a temporary file next to the target and
/// moved over it only when `write` succeeds, which also makes in-place edits
/// (output path equal to input path) safe. An existing target keeps its
/// permissions.
pub fn with_output<F>(path: Option<&str>, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match path {
        Some(path) if path != "-" => replace_file(Path::new(path), write),
        _ => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write(&mut out)?;
            out.flush()?;
            Ok(())
        }
    }
}

fn replace_file<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    set_pending(Some(tmp.path().to_path_buf()));

    let result = {
        let mut out = BufWriter::new(tmp.as_file());
        write(&mut out).and_then(|()| out.flush().map_err(Into::into))
    };
    set_pending(None);

    // on error `tmp` is dropped here, which deletes it
    result?;
    if let Ok(existing) = fs::metadata(target) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.persist(target)?;
    log::info!("Wrote {}", target.display());
    Ok(())
}

fn set_pending(path: Option<PathBuf>) {
    if let Ok(mut pending) = PENDING_OUTPUT.lock() {
        *pending = path;
    }
}

/// Removes a half-written output file when the process is interrupted
pub fn install_interrupt_cleanup() -> std::result::Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        if let Ok(pending) = PENDING_OUTPUT.lock() {
            if let Some(path) = pending.as_ref() {
                if let Err(e) = fs::remove_file(path) {
                    log::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
        std::process::exit(130);
    })
}
