//! Dump line reader with encoding handling.
//!
//! The plain-text dumps are ISO-8859-1. Lines are decoded one at a time and
//! handed out without their terminator.

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Latin1,
    /// Invalid sequences become U+FFFD.
    Utf8,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown encoding: {0}. Use latin1 or utf8")]
pub struct UnknownEncoding(pub String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Latin1 => "latin1",
            Encoding::Utf8 => "utf8",
        })
    }
}

impl Encoding {
    fn decode(self, bytes: &[u8]) -> String {
        match self {
            // Latin-1 code points map one-to-one onto the first 256 chars.
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Iterator over decoded lines of a dump.
pub struct DumpLines<R> {
    reader: R,
    encoding: Encoding,
    buf: Vec<u8>,
}

impl<R: BufRead> DumpLines<R> {
    pub fn new(reader: R, encoding: Encoding) -> Self {
        Self {
            reader,
            encoding,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for DumpLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let mut end = self.buf.len();
                if self.buf[..end].ends_with(b"\n") {
                    end -= 1;
                    if self.buf[..end].ends_with(b"\r") {
                        end -= 1;
                    }
                }
                Some(Ok(self.encoding.decode(&self.buf[..end])))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
