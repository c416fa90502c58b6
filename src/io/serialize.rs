use std::cmp;
use std::io as std_io;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json;

use io as mod_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON document per line.
    Json,
    /// Indented JSON; output only, since records span several lines.
    JsonPretty,
}

/// Writes and reads newline-delimited records, e.g. extracted dependencies.
pub struct Serializer<IO, T> {
    _phantom: PhantomData<T>,
    inner: IO,
    format: Format,
}

impl<IO, T> Serializer<IO, T> {
    pub fn new(io: IO, format: Format) -> Self {
        Serializer {
            _phantom: PhantomData,
            inner: io,
            format: format,
        }
    }

    pub fn inner(&self) -> &IO {
        &self.inner
    }

    pub fn into_inner(self) -> IO {
        self.inner
    }

    pub fn format(&self) -> Format {
        self.format
    }
}

impl<IO, T: Serialize> Serializer<IO, T> {
    pub fn serialize(&self, data: &T) -> std_io::Result<Vec<u8>> {
        serialize(data, self.format)
    }
}

impl<'a, IO, T: Deserialize<'a>> Serializer<IO, T> {
    pub fn deserialize(&self, bytes: &'a [u8]) -> std_io::Result<T> {
        deserialize(bytes, self.format)
    }
}

pub fn serialize<T: Serialize>(data: &T, format: Format) -> std_io::Result<Vec<u8>> {
    let result = match format {
        Format::Json => serde_json::to_vec(data),
        Format::JsonPretty => serde_json::to_vec_pretty(data),
    };
    result.map_err(|e| std_io::Error::new(std_io::ErrorKind::InvalidData, e))
}

pub fn deserialize<'a, T: Deserialize<'a>>(bytes: &'a [u8], format: Format) -> std_io::Result<T> {
    match format {
        Format::Json => serde_json::from_slice(bytes)
            .map_err(|e| std_io::Error::new(std_io::ErrorKind::InvalidData, e)),
        Format::JsonPretty => Err(std_io::Error::new(
            std_io::ErrorKind::Other,
            "pretty JSON cannot be read back line by line",
        )),
    }
}

impl<T: Serialize, IO: std_io::Write> mod_io::Write for Serializer<IO, T> {
    type Item = T;

    fn write(&mut self, buf: &[Self::Item]) -> std_io::Result<usize> {
        for item in buf {
            let mut bytes = self.serialize(item)?;
            bytes.push(b'\n');
            self.inner.write_all(&bytes)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std_io::Result<()> {
        self.inner.flush()
    }
}

impl<T: DeserializeOwned, IO: std_io::Read> mod_io::Read for Serializer<IO, T> {
    type Item = T;

    fn read_upto(&mut self, num: usize, buf: &mut Vec<Self::Item>) -> std_io::Result<usize> {
        let mut count = 0;
        let mut w_buf = Vec::new();
        let mut r_buf = vec![0; 1024];
        let mut pos = 0;
        let mut cap = 0;
        while count < num {
            if pos >= cap {
                cap = self.inner.read(&mut r_buf)?;
                pos = 0;
                if cap == 0 {
                    // trailing record without a newline
                    if !w_buf.is_empty() {
                        buf.push(deserialize(&w_buf, self.format)?);
                        count += 1;
                    }
                    break;
                }
            }
            let available = &r_buf[pos..cap];
            let used = match available.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    w_buf.extend_from_slice(&available[..i]);
                    if !w_buf.is_empty() {
                        buf.push(deserialize(&w_buf, self.format)?);
                        count += 1;
                    }
                    w_buf.clear();
                    i + 1
                }
                None => {
                    w_buf.extend_from_slice(available);
                    available.len()
                }
            };
            pos = cmp::min(pos + used, cap);
        }
        Ok(count)
    }
}
