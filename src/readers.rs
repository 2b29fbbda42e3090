//! File access for the counting engines
//!
//! Engines never open files themselves; they ask a [`SourceReader`] for the
//! lowercase text behind a file identifier.

use indexmap::IndexMap;
use std::io::Read;

use crate::decompression::DecompressionReader;
use crate::error::{Result, TallyError};

/// Files counted when no corpus is given on the command line
pub const DEFAULT_FILES: &[&str] = &[
    "shakespeare1.txt",
    "shakespeare2.txt",
    "shakespeare3.txt",
    "shakespeare4.txt",
    "shakespeare5.txt",
    "shakespeare6.txt",
    "shakespeare7.txt",
    "shakespeare8.txt",
];

/// Ordered list of file identifiers to count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    files: Vec<String>,
}

impl Corpus {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new(DEFAULT_FILES.iter().copied())
    }
}

/// Produces the lowercase text content of a file identifier
pub trait SourceReader: Send + Sync {
    fn read_lowercase(&self, file: &str) -> Result<String>;
}

/// Reads files from disk, decompressing gzip and zstd transparently
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_lowercase(&self, file: &str) -> Result<String> {
        let mut reader = DecompressionReader::new(file).map_err(|e| TallyError::io(file, e))?;
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| TallyError::io(file, e))?;
        Ok(content.to_lowercase())
    }
}

/// Serves file contents from memory, keyed by file identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: IndexMap<String, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }

    /// Corpus listing every stored file in insertion order
    pub fn corpus(&self) -> Corpus {
        Corpus::new(self.files.keys().cloned())
    }
}

impl SourceReader for MemoryReader {
    fn read_lowercase(&self, file: &str) -> Result<String> {
        self.files
            .get(file)
            .map(|content| content.to_lowercase())
            .ok_or_else(|| {
                TallyError::io(
                    file,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such file in memory"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_fs_reader_lowercases() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "To Be Or NOT to be").unwrap();
        file.flush().unwrap();

        let text = FsReader
            .read_lowercase(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(text, "to be or not to be");
    }

    #[test]
    fn test_fs_reader_missing_file_is_io_error() {
        let err = FsReader
            .read_lowercase("/nonexistent/wordtally/hamlet.txt")
            .unwrap_err();
        match err {
            TallyError::Io { path, source } => {
                assert_eq!(path.to_str(), Some("/nonexistent/wordtally/hamlet.txt"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_fs_reader_rejects_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();
        file.flush().unwrap();

        let err = FsReader
            .read_lowercase(file.path().to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, TallyError::Io { .. }));
    }

    #[test]
    fn test_memory_reader() {
        let reader = MemoryReader::new()
            .with_file("a.txt", "Hello")
            .with_file("b.txt", "WORLD");
        assert_eq!(reader.read_lowercase("b.txt").unwrap(), "world");
        assert_eq!(
            reader.corpus().files(),
            &["a.txt".to_string(), "b.txt".to_string()]
        );
        assert!(reader.read_lowercase("c.txt").is_err());
    }

    #[test]
    fn test_default_corpus() {
        let corpus = Corpus::default();
        assert_eq!(corpus.len(), 8);
        assert_eq!(corpus.files()[0], "shakespeare1.txt");
        assert_eq!(corpus.files()[7], "shakespeare8.txt");
    }
}
