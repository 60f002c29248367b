//!
//! File helpers shared by the text formats
//!
//! Paths ending with `.gz` are (de)compressed transparently.
//!
use crate::error::Error;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

fn is_gz<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().extension().map_or(false, |ext| ext == "gz")
}

///
/// open a file for line-oriented reading
///
pub fn open_reader<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    if is_gz(&path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

///
/// Lines of `reader` with 1-based line numbers, without the `\n` or `\r\n`
/// terminator.
///
/// A line that is not valid UTF-8 is a `Error::Parse` naming the line.
///
pub fn numbered_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = crate::error::Result<(usize, String)>> {
    reader
        .split(b'\n')
        .enumerate()
        .map(|(i, bytes)| -> crate::error::Result<(usize, String)> {
            let mut bytes = bytes?;
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            String::from_utf8(bytes).map(|text| (i + 1, text)).map_err(|e| {
                Error::parse(i + 1, String::from_utf8_lossy(e.as_bytes()), "invalid UTF-8")
            })
        })
}

///
/// Writer into a plain or gzipped file.
///
/// Call `finish` to flush, so that write errors are reported instead of
/// being dropped with the writer.
///
pub enum FileWriter {
    Plain(BufWriter<File>),
    Gz(GzEncoder<BufWriter<File>>),
}

impl FileWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        if is_gz(&path) {
            Ok(FileWriter::Gz(GzEncoder::new(file, Compression::default())))
        } else {
            Ok(FileWriter::Plain(file))
        }
    }
    pub fn finish(self) -> io::Result<()> {
        match self {
            FileWriter::Plain(mut w) => w.flush(),
            FileWriter::Gz(w) => w.finish()?.flush(),
        }
    }
}

impl Write for FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileWriter::Plain(w) => w.write(buf),
            FileWriter::Gz(w) => w.write(buf),
        }
    }
    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileWriter::Plain(w) => w.flush(),
            FileWriter::Gz(w) => w.flush(),
        }
    }
}

///
/// write string into a file
///
pub fn write_string<P: AsRef<Path>>(path: P, string: &str) -> io::Result<()> {
    let mut writer = FileWriter::create(path)?;
    writer.write_all(string.as_bytes())?;
    writer.finish()
}

///
/// read a whole (possibly gzipped) file into a string
///
pub fn read_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut reader = open_reader(path)?;
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_gz_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.txt", "a.txt.gz"].iter() {
            let path = dir.path().join(name);
            write_string(&path, "1 2\n3 4\n").unwrap();
            assert_eq!(read_string(&path).unwrap(), "1 2\n3 4\n");
        }
        // gzipped file is not plain text
        let raw = std::fs::read(dir.path().join("a.txt.gz")).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);
    }
    #[test]
    fn lines_are_numbered() {
        let lines: Vec<(usize, String)> = numbered_lines(&b"a b\r\n\nc"[..])
            .collect::<crate::error::Result<_>>()
            .unwrap();
        assert_eq!(
            lines,
            vec![(1, "a b".to_owned()), (2, String::new()), (3, "c".to_owned())]
        );
    }
    #[test]
    fn invalid_utf8_names_the_line() {
        let mut lines = numbered_lines(&b"ok\n2 \xff\xfe\n"[..]);
        assert!(lines.next().unwrap().is_ok());
        match lines.next().unwrap().unwrap_err() {
            Error::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "invalid UTF-8");
            }
            e => panic!("unexpected error {:?}", e),
        }
    }
    #[test]
    fn missing_file() {
        let e = open_reader("/nonexistent/netdepth/file.net").err().unwrap();
        assert_eq!(e.kind(), io::ErrorKind::NotFound);
    }
}
