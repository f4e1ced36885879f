use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context;

/// JSON report sink: a file when a path is given, stdout otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>),
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => {
                let file = File::create(&path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Output::File(BufWriter::new(file))
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        serde_json::to_writer_pretty(&mut output, value).context("Failed to write JSON")?;
        writeln!(&mut output).context("Failed to write newline after JSON")?;
        output.flush().context("Failed to flush output")?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer) => writer.flush(),
        }
    }
}
