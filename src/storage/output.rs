//! Output files are written next to their destination and renamed into place

use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result, Stage};

/// `-` (or an empty path) means standard output
pub fn is_stdout(path: &Path) -> bool {
	path.as_os_str().is_empty() || path.to_str() == Some("-")
}

/// Render into `path` atomically: a failed render leaves any existing file untouched
pub fn write_atomic<F>(path: &Path, render: F) -> Result<()>
where
	F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
	if is_stdout(path) {
		let stdout = io::stdout();
		let mut out = BufWriter::new(stdout.lock());
		render(&mut out).map_err(|e| Error::io(Stage::Output, e))?;
		return out.flush().map_err(|e| Error::io(Stage::Output, e));
	}

	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(Stage::Output, e))?;
	{
		let mut out = BufWriter::new(tmp.as_file_mut());
		render(&mut out).map_err(|e| Error::io(Stage::Output, e))?;
		out.flush().map_err(|e| Error::io(Stage::Output, e))?;
	}
	tmp.persist(path).map_err(|e| Error::io(Stage::Output, e.error))?;
	Ok(())
}
