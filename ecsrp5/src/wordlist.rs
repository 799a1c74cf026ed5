//! Newline separated password lists.
//!
//! Each line is one candidate, taken as raw bytes with the trailing `\n`
//! and a `\r` right before it removed. Empty lines are the empty password.

use crate::{Error, Result};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

/// Lazily split `reader` into candidates.
pub fn read_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut line| {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            line
        })
    })
}

/// Open the word list at `path` for streaming.
pub fn open(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let path = path.as_ref();
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| Error::io(path, err))
}

/// Read every candidate of the word list at `path` into memory.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    read_lines(open(path)?)
        .collect::<io::Result<_>>()
        .map_err(|err| Error::io(path, err))
}
