//! Resolution of heterogeneous inputs into one readable byte source.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::bridge::ChildSource;
use crate::error::SourceError;

/// A uniform, forward-only byte source over a datastream.
///
/// Wraps a raw file, a transparently-decompressed gzip file, standard
/// input, or the stdout pipe of the external converter. Dropping a
/// [`ByteSource::Child`] closes the pipe and reaps the subprocess, so
/// abandoning iteration early never hangs the caller.
#[derive(Debug)]
pub enum ByteSource {
    /// Raw binary file (`.gds` / `.ds`).
    Plain(BufReader<File>),
    /// Gzip-compressed file (`.gds.gz` / `.ds.gz`).
    Gzip(GzDecoder<BufReader<File>>),
    /// The process's standard input.
    Stdin(io::Stdin),
    /// Stdout pipe of a spawned converter process.
    Child(ChildSource),
}

impl ByteSource {
    /// Opens a datastream file, unwrapping gzip compression when the
    /// suffix indicates it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::FileNotFound`] if `path` does not exist and
    /// [`SourceError::UnsupportedExtension`] if its name does not carry a
    /// recognized datastream suffix.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let path = path.canonicalize()?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let compressed = is_compressed(&name)?;

        debug!(path = %path.display(), compressed, "opening datastream");
        let reader = BufReader::new(File::open(&path)?);
        if compressed {
            Ok(Self::Gzip(GzDecoder::new(reader)))
        } else {
            Ok(Self::Plain(reader))
        }
    }

    /// A source over the process's standard input (already binary).
    pub fn stdin() -> Self {
        Self::Stdin(io::stdin())
    }
}

impl Read for ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(r) => r.read(buf),
            Self::Stdin(r) => r.read(buf),
            Self::Child(r) => r.read(buf),
        }
    }
}

/// Decides compression state from a file name's trailing extension.
///
/// The extension is everything after the *first* dot of the name and must
/// be exactly one of `gds.gz`, `ds.gz`, `gds`, or `ds`.
///
/// # Errors
///
/// Returns [`SourceError::UnsupportedExtension`] for any other name.
pub fn is_compressed(file_name: &str) -> Result<bool, SourceError> {
    let ext = file_name
        .split_once('.')
        .map(|(_, ext)| ext)
        .ok_or_else(|| SourceError::UnsupportedExtension {
            name: file_name.to_string(),
        })?;
    match ext {
        "gds.gz" | "ds.gz" => Ok(true),
        "gds" | "ds" => Ok(false),
        _ => Err(SourceError::UnsupportedExtension {
            name: file_name.to_string(),
        }),
    }
}
