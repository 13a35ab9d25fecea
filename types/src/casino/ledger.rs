use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{read_string, string_encode_size, write_string, LEDGER_SNAPSHOT_VERSION, MAX_USER_ID_LENGTH};

/// Stable identity a ledger snapshot is keyed by.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for empty ids or ids longer than [`MAX_USER_ID_LENGTH`] bytes.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_USER_ID_LENGTH {
            return None;
        }
        Some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Write for UserId {
    fn write(&self, writer: &mut impl BufMut) {
        write_string(&self.0, writer);
    }
}

impl Read for UserId {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let id = read_string(reader, MAX_USER_ID_LENGTH)?;
        if id.is_empty() {
            return Err(Error::Invalid("UserId", "empty"));
        }
        Ok(Self(id))
    }
}

impl EncodeSize for UserId {
    fn encode_size(&self) -> usize {
        string_encode_size(&self.0)
    }
}

/// Durable ledger state for one user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub user: UserId,
    pub balance: u64,
    /// Milliseconds since the Unix epoch of the last successful bonus claim.
    pub last_bonus_claimed_at: Option<u64>,
}

impl LedgerSnapshot {
    pub fn new(user: UserId, balance: u64) -> Self {
        Self {
            user,
            balance,
            last_bonus_claimed_at: None,
        }
    }
}

impl Write for LedgerSnapshot {
    fn write(&self, writer: &mut impl BufMut) {
        LEDGER_SNAPSHOT_VERSION.write(writer);
        self.user.write(writer);
        self.balance.write(writer);
        self.last_bonus_claimed_at.write(writer);
    }
}

impl Read for LedgerSnapshot {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let version = u8::read(reader)?;
        if version != LEDGER_SNAPSHOT_VERSION {
            return Err(Error::Invalid("LedgerSnapshot", "unsupported version"));
        }
        Ok(Self {
            user: UserId::read(reader)?,
            balance: u64::read(reader)?,
            last_bonus_claimed_at: Option::<u64>::read(reader)?,
        })
    }
}

impl EncodeSize for LedgerSnapshot {
    fn encode_size(&self) -> usize {
        LEDGER_SNAPSHOT_VERSION.encode_size()
            + self.user.encode_size()
            + self.balance.encode_size()
            + self.last_bonus_claimed_at.encode_size()
    }
}
