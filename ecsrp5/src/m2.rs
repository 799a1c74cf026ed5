//! M2 messages, the typed key/value records of `user.dat`.
//!
//! A message starts with the `"M2"` magic followed by fields. Every field
//! begins with a little endian `u32` key whose low 24 bits are the field id
//! and whose high byte describes the value:
//!
//! ```text
//! 0x80  array flag
//! 0x78  base type: bool 0x00, u32 0x08, u64 0x10, ip6 0x18,
//!       string 0x20, message 0x28, raw 0x30
//! 0x01  short form: bool value, 1-byte u32, 1-byte length
//! ```
//!
//! Arrays carry a `u16` element count. Fixed width elements are packed;
//! strings, messages and raw values have a `u16` length each.

use crate::{Error, Result};

/// Magic bytes at the start of every message.
pub const MAGIC: &[u8; 2] = b"M2";

const ARRAY: u8 = 0x80;
const SHORT: u8 = 0x01;
const TYPE_MASK: u8 = 0x78;

const TYPE_BOOL: u8 = 0x00;
const TYPE_U32: u8 = 0x08;
const TYPE_U64: u8 = 0x10;
const TYPE_IP6: u8 = 0x18;
const TYPE_STRING: u8 = 0x20;
const TYPE_MESSAGE: u8 = 0x28;
const TYPE_RAW: u8 = 0x30;

/// Largest field id that fits in a key.
pub const MAX_ID: u32 = 0x00ff_ffff;

/// Typed field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Boolean, stored in the short bit of the key.
    Bool(bool),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// IPv6 address.
    Ip6([u8; 16]),
    /// String bytes, not necessarily UTF-8.
    String(Vec<u8>),
    /// Nested message.
    Message(Message),
    /// Opaque bytes.
    Raw(Vec<u8>),
    /// Array of booleans.
    BoolArray(Vec<bool>),
    /// Array of 32-bit integers.
    U32Array(Vec<u32>),
    /// Array of 64-bit integers.
    U64Array(Vec<u64>),
    /// Array of IPv6 addresses.
    Ip6Array(Vec<[u8; 16]>),
    /// Array of strings.
    StringArray(Vec<Vec<u8>>),
    /// Array of nested messages.
    MessageArray(Vec<Message>),
    /// Array of opaque byte strings.
    RawArray(Vec<Vec<u8>>),
}

/// Parsed M2 message. Fields keep their on-disk order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    fields: Vec<(u32, Value)>,
}

impl Message {
    /// Create an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete message, magic included. Trailing bytes are an error.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);

        if reader.take(MAGIC.len())? != MAGIC {
            return Err(Error::Format("missing M2 magic".into()));
        }

        let mut fields = Vec::new();
        while !reader.is_empty() {
            let key = reader.u32()?;
            let id = key & MAX_ID;
            let value = reader.value((key >> 24) as u8)?;
            fields.push((id, value));
        }

        Ok(Self { fields })
    }

    /// Append a field.
    pub fn push(&mut self, id: u32, value: Value) -> &mut Self {
        self.fields.push((id & MAX_ID, value));
        self
    }

    /// First value stored under `id`.
    pub fn get(&self, id: u32) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == id)
            .map(|(_, value)| value)
    }

    /// Bytes of a string or raw field.
    pub fn get_bytes(&self, id: u32) -> Option<&[u8]> {
        match self.get(id)? {
            Value::String(bytes) | Value::Raw(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Contents of a string or raw field, if they are valid UTF-8.
    pub fn get_string(&self, id: u32) -> Option<&str> {
        self.get_bytes(id)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Iterate over `(id, value)` pairs in message order.
    pub fn fields(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Does the message have no fields?
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize the message, using the short forms whenever they fit.
    ///
    /// Fails with [`Error::Format`] when a value, element count or nested
    /// message does not fit in the `u16` length of its field.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = MAGIC.to_vec();
        for (id, value) in &self.fields {
            encode_field(&mut out, *id, value)?;
        }
        Ok(out)
    }
}

fn encode_field(out: &mut Vec<u8>, id: u32, value: &Value) -> Result<()> {
    match value {
        Value::Bool(b) => encode_key(out, id, TYPE_BOOL | u8::from(*b)),
        Value::U32(n) => match u8::try_from(*n) {
            Ok(n) => {
                encode_key(out, id, TYPE_U32 | SHORT);
                out.push(n);
            }
            Err(_) => {
                encode_key(out, id, TYPE_U32);
                out.extend_from_slice(&n.to_le_bytes());
            }
        },
        Value::U64(n) => {
            encode_key(out, id, TYPE_U64);
            out.extend_from_slice(&n.to_le_bytes());
        }
        Value::Ip6(addr) => {
            encode_key(out, id, TYPE_IP6);
            out.extend_from_slice(addr);
        }
        Value::String(bytes) => encode_blob(out, id, TYPE_STRING, bytes)?,
        Value::Message(msg) => encode_blob(out, id, TYPE_MESSAGE, &msg.to_bytes()?)?,
        Value::Raw(bytes) => encode_blob(out, id, TYPE_RAW, bytes)?,
        Value::BoolArray(items) => {
            encode_array_header(out, id, TYPE_BOOL, items.len())?;
            out.extend(items.iter().map(|b| u8::from(*b)));
        }
        Value::U32Array(items) => {
            encode_array_header(out, id, TYPE_U32, items.len())?;
            items.iter().for_each(|n| out.extend_from_slice(&n.to_le_bytes()));
        }
        Value::U64Array(items) => {
            encode_array_header(out, id, TYPE_U64, items.len())?;
            items.iter().for_each(|n| out.extend_from_slice(&n.to_le_bytes()));
        }
        Value::Ip6Array(items) => {
            encode_array_header(out, id, TYPE_IP6, items.len())?;
            items.iter().for_each(|addr| out.extend_from_slice(addr));
        }
        Value::StringArray(items) => {
            encode_array_header(out, id, TYPE_STRING, items.len())?;
            for item in items {
                encode_element(out, id, item)?;
            }
        }
        Value::MessageArray(items) => {
            encode_array_header(out, id, TYPE_MESSAGE, items.len())?;
            for msg in items {
                encode_element(out, id, &msg.to_bytes()?)?;
            }
        }
        Value::RawArray(items) => {
            encode_array_header(out, id, TYPE_RAW, items.len())?;
            for item in items {
                encode_element(out, id, item)?;
            }
        }
    }

    Ok(())
}

/// Length or count of field `id` as the `u16` the format stores.
fn wire_len(id: u32, len: usize, what: &str) -> Result<u16> {
    u16::try_from(len)
        .map_err(|_| Error::Format(format!("field {id:#x} too long: {len} {what}")))
}

fn encode_key(out: &mut Vec<u8>, id: u32, tag: u8) {
    out.extend_from_slice(&(id | (u32::from(tag) << 24)).to_le_bytes());
}

fn encode_blob(out: &mut Vec<u8>, id: u32, tag: u8, bytes: &[u8]) -> Result<()> {
    match u8::try_from(bytes.len()) {
        Ok(len) => {
            encode_key(out, id, tag | SHORT);
            out.push(len);
        }
        Err(_) => {
            let len = wire_len(id, bytes.len(), "bytes")?;
            encode_key(out, id, tag);
            out.extend_from_slice(&len.to_le_bytes());
        }
    }
    out.extend_from_slice(bytes);
    Ok(())
}

fn encode_array_header(out: &mut Vec<u8>, id: u32, tag: u8, count: usize) -> Result<()> {
    let count = wire_len(id, count, "elements")?;
    encode_key(out, id, tag | ARRAY);
    out.extend_from_slice(&count.to_le_bytes());
    Ok(())
}

fn encode_element(out: &mut Vec<u8>, id: u32, bytes: &[u8]) -> Result<()> {
    let len = wire_len(id, bytes.len(), "bytes in element")?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(bytes);
    Ok(())
}

/// Bounds-checked cursor over a byte slice.
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos == self.bytes.len()
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                Error::Format(format!(
                    "truncated: need {len} bytes at offset {}, {} left",
                    self.pos,
                    self.bytes.len() - self.pos
                ))
            })?;

        let out = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    pub(crate) fn u16(&mut self) -> Result<u16> {
        self.array().map(u16::from_le_bytes)
    }

    fn u32(&mut self) -> Result<u32> {
        self.array().map(u32::from_le_bytes)
    }

    fn u64(&mut self) -> Result<u64> {
        self.array().map(u64::from_le_bytes)
    }

    fn blob(&mut self, short: bool) -> Result<Vec<u8>> {
        let len = if short {
            usize::from(self.u8()?)
        } else {
            usize::from(self.u16()?)
        };
        Ok(self.take(len)?.to_vec())
    }

    fn element(&mut self) -> Result<Vec<u8>> {
        let len = usize::from(self.u16()?);
        Ok(self.take(len)?.to_vec())
    }

    fn elements<T>(&mut self, mut f: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let count = self.u16()?;
        (0..count).map(|_| f(self)).collect()
    }

    fn value(&mut self, tag: u8) -> Result<Value> {
        let short = tag & SHORT != 0;

        let value = if tag & ARRAY == 0 {
            match tag & TYPE_MASK {
                TYPE_BOOL => Value::Bool(short),
                TYPE_U32 if short => Value::U32(u32::from(self.u8()?)),
                TYPE_U32 => Value::U32(self.u32()?),
                TYPE_U64 => Value::U64(self.u64()?),
                TYPE_IP6 => Value::Ip6(self.array()?),
                TYPE_STRING => Value::String(self.blob(short)?),
                TYPE_MESSAGE => Value::Message(Message::parse(&self.blob(short)?)?),
                TYPE_RAW => Value::Raw(self.blob(short)?),
                other => return Err(unknown_type(other, self.pos)),
            }
        } else {
            match tag & TYPE_MASK {
                TYPE_BOOL => Value::BoolArray(self.elements(|r| Ok(r.u8()? != 0))?),
                TYPE_U32 => Value::U32Array(self.elements(Self::u32)?),
                TYPE_U64 => Value::U64Array(self.elements(Self::u64)?),
                TYPE_IP6 => Value::Ip6Array(self.elements(Self::array)?),
                TYPE_STRING => Value::StringArray(self.elements(Self::element)?),
                TYPE_MESSAGE => Value::MessageArray(
                    self.elements(|r| r.element().and_then(|b| Message::parse(&b)))?,
                ),
                TYPE_RAW => Value::RawArray(self.elements(Self::element)?),
                other => return Err(unknown_type(other | ARRAY, self.pos)),
            }
        };

        Ok(value)
    }
}

fn unknown_type(tag: u8, pos: usize) -> Error {
    Error::Format(format!("unknown field type {tag:#04x} before offset {pos}"))
}

#[cfg(test)]
mod tests {
    use super::{Message, Value};
    use crate::Error;
    use hex_literal::hex;

    #[test]
    fn parse_scalar_fields() {
        let bytes = [
            &b"M2"[..],
            &hex!("01000021 05 61646d696e")[..], // string 0x01 = "admin"
            &hex!("02000009 2a")[..],            // u32 0x02 = 42 (short)
            &hex!("03000008 00010000")[..],      // u32 0x03 = 256
            &hex!("04000001")[..],               // bool 0x04 = true
            &hex!("05000000")[..],               // bool 0x05 = false
            &hex!("06000031 03 010203")[..],     // raw 0x06
        ]
        .concat();

        let msg = Message::parse(&bytes).unwrap();
        assert_eq!(msg.len(), 6);
        assert_eq!(msg.get_string(0x01), Some("admin"));
        assert_eq!(msg.get(0x02), Some(&Value::U32(42)));
        assert_eq!(msg.get(0x03), Some(&Value::U32(256)));
        assert_eq!(msg.get(0x04), Some(&Value::Bool(true)));
        assert_eq!(msg.get(0x05), Some(&Value::Bool(false)));
        assert_eq!(msg.get_bytes(0x06), Some(&[1u8, 2, 3][..]));
        assert_eq!(msg.get(0x07), None);
        assert_eq!(msg.get_bytes(0x02), None);
    }

    #[test]
    fn parse_long_string_and_array() {
        let bytes = [
            &b"M2"[..],
            &hex!("10000020 0200 6869")[..],             // long string 0x10 = "hi"
            &hex!("11000088 0200 01000000 02000000")[..], // u32 array 0x11
            &hex!("120000a0 0100 0100 78")[..],          // string array 0x12
        ]
        .concat();

        let msg = Message::parse(&bytes).unwrap();
        assert_eq!(msg.get_string(0x10), Some("hi"));
        assert_eq!(msg.get(0x11), Some(&Value::U32Array(vec![1, 2])));
        assert_eq!(msg.get(0x12), Some(&Value::StringArray(vec![b"x".to_vec()])));
    }

    #[test]
    fn nested_message() {
        let mut inner = Message::new();
        inner.push(0x01, Value::U64(7));
        let mut outer = Message::new();
        outer.push(0x02, Value::Message(inner.clone()));

        let parsed = Message::parse(&outer.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed.get(0x02), Some(&Value::Message(inner)));
    }

    #[test]
    fn encoding_uses_short_forms() {
        let mut msg = Message::new();
        msg.push(0x01, Value::U32(5))
            .push(0x02, Value::String(b"ab".to_vec()))
            .push(0x03, Value::Raw(vec![0u8; 300]));

        let bytes = msg.to_bytes().unwrap();
        assert_eq!(&bytes[..11], &hex!("4d32 01000009 05 02000021")[..]);
        assert_eq!(&bytes[14..20], &hex!("03000030 2c01")[..]);
        assert_eq!(Message::parse(&bytes).unwrap(), msg);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(Message::parse(b"M3"), Err(Error::Format(_))));
        assert!(matches!(Message::parse(b"M"), Err(Error::Format(_))));
        // string claims 5 bytes, only 2 present
        let truncated = [&b"M2"[..], &hex!("01000021 05 6869")[..]].concat();
        assert!(matches!(Message::parse(&truncated), Err(Error::Format(_))));
        // base type 0x38 is undefined
        let unknown = [&b"M2"[..], &hex!("01000038")[..]].concat();
        assert!(matches!(Message::parse(&unknown), Err(Error::Format(_))));
    }

    #[test]
    fn empty_message() {
        let msg = Message::parse(b"M2").unwrap();
        assert!(msg.is_empty());
        assert_eq!(msg.to_bytes().unwrap(), b"M2");
    }

    #[test]
    fn oversize_fields_are_rejected() {
        let mut fits = Message::new();
        fits.push(0x01, Value::Raw(vec![0xaa; usize::from(u16::MAX)]));
        let bytes = fits.to_bytes().unwrap();
        assert_eq!(&bytes[2..8], &hex!("01000030 ffff")[..]);
        assert_eq!(Message::parse(&bytes).unwrap(), fits);

        let mut raw = Message::new();
        raw.push(0x01, Value::Raw(vec![0xaa; 65536]));
        assert!(matches!(raw.to_bytes(), Err(Error::Format(_))));

        let mut element = Message::new();
        element.push(0x02, Value::RawArray(vec![vec![0; 70_000]]));
        assert!(matches!(element.to_bytes(), Err(Error::Format(_))));

        let mut count = Message::new();
        count.push(0x03, Value::BoolArray(vec![false; 65536]));
        assert!(matches!(count.to_bytes(), Err(Error::Format(_))));

        // each half fits, the nested message with both does not
        let mut inner = Message::new();
        inner
            .push(0x01, Value::Raw(vec![0; 40_000]))
            .push(0x02, Value::Raw(vec![0; 40_000]));
        let mut outer = Message::new();
        outer.push(0x04, Value::Message(inner));
        assert!(matches!(outer.to_bytes(), Err(Error::Format(_))));
    }
}
