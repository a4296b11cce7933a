use std::{
    io::{BufWriter, Write},
    path::PathBuf,
};

use fs_err::File;
use serde::Serialize;

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<P: Into<PathBuf>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
