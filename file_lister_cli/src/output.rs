//! Path output rendering
//!
//! One path per line in the platform's native form. Unix paths are written
//! as raw bytes so names that are not valid UTF-8 survive unchanged.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    writer.write_all(path.as_os_str().as_bytes())?;
    writer.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_path<W: Write>(writer: &mut W, path: &Path) -> io::Result<()> {
    writeln!(writer, "{}", path.display())
}

/// Write each path on its own line, returning how many were written
pub fn write_paths<W, I>(writer: &mut W, paths: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = PathBuf>,
{
    let mut count = 0;
    for path in paths {
        write_path(writer, &path)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Print paths to stdout
///
/// A reader closing the pipe early (e.g. `| head`) is not an error.
pub fn print_paths<I>(paths: I) -> io::Result<usize>
where
    I: IntoIterator<Item = PathBuf>,
{
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match write_paths(&mut writer, paths) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Output pipe closed early");
            Ok(0)
        }
        result => result,
    }
}
