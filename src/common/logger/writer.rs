use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::Path,
    sync::Arc,
};

use parking_lot::Mutex;

/// Removes ANSI escape sequences so colored console output stays readable on disk.
pub fn strip_ansi_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (_, '\x1b') => in_escape = true,
            (true, c) if c.is_ascii_alphabetic() => in_escape = false,
            (true, _) => {}
            (false, c) => result.push(c),
        }
    }
    result
}

/// Append-only log file that keeps at most `max_lines` lines.
///
/// Trimming rewrites the file, so it only happens after a batch of new
/// lines (a tenth of the cap, at least 50) has been appended.
#[derive(Clone)]
pub struct LineCappedFile {
    path: String,
    max_lines: u32,
    pending: Arc<Mutex<u32>>,
}

impl LineCappedFile {
    pub fn new(path: String, max_lines: u32) -> Self {
        Self {
            path,
            max_lines,
            pending: Arc::new(Mutex::new(0)),
        }
    }

    fn trim_threshold(&self) -> u32 {
        (self.max_lines / 10).max(50)
    }

    fn trim(&self) -> io::Result<()> {
        if !Path::new(&self.path).exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = contents.lines().collect();
        let keep = self.max_lines as usize;
        if lines.len() > keep {
            let mut tail = lines[lines.len() - keep..].join("\n");
            tail.push('\n');
            fs::write(&self.path, tail)?;
        }
        Ok(())
    }
}

impl Write for LineCappedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Serializes appends and trims across clones.
        let mut pending = self.pending.lock();

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?
            .write_all(buf)?;

        *pending += buf.iter().filter(|&&b| b == b'\n').count() as u32;
        if *pending >= self.trim_threshold() {
            if let Err(e) = self.trim() {
                eprintln!("Failed to trim log file {}: {}", self.path, e);
            }
            *pending = 0;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LineCappedFile {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
