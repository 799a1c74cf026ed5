//! `user.dat` user database.
//!
//! The file is a sequence of records, each a little endian `u16` length
//! followed by one M2 [`Message`]. Only records carrying a username, a salt
//! and an EC-SRP5 verifier are kept.

use crate::{
    m2::{Message, Reader, Value},
    verifier::Verifier,
    Error, Result,
};
use log::{debug, info, warn};
use std::{collections::BTreeMap, fs, path::Path};

/// M2 field ids holding the EC-SRP5 data of a user record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    /// Field holding the username string.
    pub username: u32,
    /// Field holding the raw salt.
    pub salt: u32,
    /// Field holding the stored verifier.
    pub verifier: u32,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            username: 0x01,
            salt: 0x20,
            verifier: 0x21,
        }
    }
}

/// EC-SRP5 credentials of one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
    /// Login name, the key of the database.
    pub username: String,
    /// Salt mixed into the password hash.
    pub salt: Vec<u8>,
    /// Parsed verifier.
    pub verifier: Verifier,
    /// Raw verifier bytes as stored, parity byte included.
    pub verifier_bytes: Vec<u8>,
}

impl UserRecord {
    /// Encode this record as an M2 message.
    pub fn to_message(&self, layout: &FieldLayout) -> Message {
        let mut msg = Message::new();
        msg.push(layout.username, Value::String(self.username.as_bytes().to_vec()))
            .push(layout.salt, Value::Raw(self.salt.clone()))
            .push(layout.verifier, Value::Raw(self.verifier_bytes.clone()));
        msg
    }

    fn from_message(msg: &Message, layout: &FieldLayout) -> Result<Option<Self>> {
        let (Some(username), Some(salt), Some(verifier_bytes)) = (
            msg.get_bytes(layout.username),
            msg.get_bytes(layout.salt),
            msg.get_bytes(layout.verifier),
        ) else {
            return Ok(None);
        };

        let username = std::str::from_utf8(username).map_err(|err| {
            Error::Format(format!(
                "username {:?} is not valid UTF-8: {err}",
                String::from_utf8_lossy(username)
            ))
        })?;

        Ok(Some(Self {
            username: username.to_owned(),
            salt: salt.to_vec(),
            verifier: Verifier::from_bytes(verifier_bytes)?,
            verifier_bytes: verifier_bytes.to_vec(),
        }))
    }
}

/// Users loaded from a `user.dat` file, keyed by username.
#[derive(Clone, Debug, Default)]
pub struct UserDatabase {
    users: BTreeMap<String, UserRecord>,
}

impl UserDatabase {
    /// Parse a database with the default [`FieldLayout`].
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Self::parse_with_layout(bytes, &FieldLayout::default())
    }

    /// Parse a database whose records use `layout`.
    ///
    /// Framing errors are fatal. Records missing one of the EC-SRP5 fields
    /// or holding an unusable verifier are skipped. A username that occurs
    /// twice keeps its last record.
    pub fn parse_with_layout(bytes: &[u8], layout: &FieldLayout) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let mut users = BTreeMap::new();
        let mut index = 0usize;

        while !reader.is_empty() {
            let offset = reader.position();
            let len = usize::from(reader.u16()?);
            let msg = Message::parse(reader.take(len)?).map_err(|err| match err {
                Error::Format(reason) => {
                    Error::Format(format!("record {index} at offset {offset}: {reason}"))
                }
                other => other,
            })?;

            match UserRecord::from_message(&msg, layout) {
                Ok(Some(record)) => {
                    if !record.verifier.is_on_curve() {
                        warn!(
                            "verifier of user {:?} is not a curve point; no password will match",
                            record.username
                        );
                    }
                    if let Some(previous) = users.insert(record.username.clone(), record) {
                        debug!("record {index}: replaces earlier record of {:?}", previous.username);
                    }
                }
                Ok(None) => debug!("record {index}: no EC-SRP5 credentials, skipped"),
                Err(err) => warn!("record {index}: {err}, skipped"),
            }

            index += 1;
        }

        info!("loaded {} of {index} user records", users.len());
        Ok(Self { users })
    }

    /// Read and parse the database at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| Error::io(path, err))?;
        debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::parse(&bytes)
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, record: UserRecord) {
        self.users.insert(record.username.clone(), record);
    }

    /// Find the record of `username`.
    pub fn lookup(&self, username: &str) -> Result<&UserRecord> {
        self.users
            .get(username)
            .ok_or_else(|| Error::UnknownUser(username.to_owned()))
    }

    /// Known usernames in sorted order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Does the database hold no users?
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Serialize with `layout`, one framed record per user.
    ///
    /// Fails with [`Error::Format`] when a record does not fit in its `u16`
    /// frame.
    pub fn to_bytes_with_layout(&self, layout: &FieldLayout) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for record in self.users.values() {
            let msg = record.to_message(layout).to_bytes()?;
            let len = u16::try_from(msg.len()).map_err(|_| {
                Error::Format(format!(
                    "record of {:?} too long: {} bytes",
                    record.username,
                    msg.len()
                ))
            })?;
            out.extend_from_slice(&len.to_le_bytes());
            out.extend_from_slice(&msg);
        }
        Ok(out)
    }

    /// Serialize with the default [`FieldLayout`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with_layout(&FieldLayout::default())
    }
}
