//! Opening battle-log files.
//!
//! `.gz` and `.bz2` files are decompressed transparently, so archived logs
//! can be passed alongside plain ones.

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Compression of an input file, chosen by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::None,
        }
    }
}

/// Opens a log file for line reading, decompressing it if needed.
pub fn open_log(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let compression = Compression::from_path(path);
    debug!(path = %path.display(), ?compression, "Reading battle log");

    Ok(match compression {
        Compression::None => Box::new(BufReader::new(file)),
        Compression::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const LOG: &str = "7/14\n88 NY マカク 10 6 66 リボB マカク 5 3\n";

    fn read_lines(path: &Path) -> Vec<String> {
        open_log(path)
            .unwrap()
            .lines()
            .collect::<io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_compression_from_extension() {
        assert_eq!(Compression::from_path(Path::new("log.txt")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("log")), Compression::None);
        assert_eq!(Compression::from_path(Path::new("log.txt.gz")), Compression::Gzip);
        assert_eq!(Compression::from_path(Path::new("log.bz2")), Compression::Bzip2);
    }

    #[test]
    fn test_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, LOG).unwrap();
        assert_eq!(read_lines(&path), LOG.lines().collect::<Vec<_>>());
    }

    #[test]
    fn test_gzip_file_with_two_members() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.txt.gz");

        // Concatenated gzip members read back as one stream.
        let mut bytes = Vec::new();
        for chunk in LOG.split_inclusive('\n') {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(chunk.as_bytes()).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(read_lines(&path), LOG.lines().collect::<Vec<_>>());
    }

    #[test]
    fn test_bzip2_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.bz2");
        let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
        encoder.write_all(LOG.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        assert_eq!(read_lines(&path), LOG.lines().collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(open_log(&dir.path().join("missing.gz")).is_err());
    }
}
