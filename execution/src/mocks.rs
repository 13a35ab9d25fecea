//! Test doubles for the execution crate.

use anyhow::{bail, Result};
use kazik_types::{EngineConfig, LedgerSnapshot, UserId};

use crate::state::{Memory, SnapshotStore};
use crate::Layer;

/// An in-memory store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: Memory,
    fail_writes: bool,
}

impl FlakyStore {
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl SnapshotStore for FlakyStore {
    fn load(&self, user: &UserId) -> Result<Option<LedgerSnapshot>> {
        self.inner.load(user)
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        if self.fail_writes {
            bail!("disk full");
        }
        self.inner.save(snapshot)
    }
}

pub fn test_user() -> UserId {
    UserId::new("player").expect("valid user id")
}

/// A layer over an in-memory store with the default configuration and `balance` coins.
pub fn create_layer(balance: u64) -> Layer<Memory> {
    let config = EngineConfig {
        starting_balance: balance,
        ..EngineConfig::default()
    };
    Layer::open(Memory::default(), test_user(), config).expect("open layer")
}

/// Same as [`create_layer`], over a [`FlakyStore`].
pub fn create_flaky_layer(balance: u64) -> Layer<FlakyStore> {
    let config = EngineConfig {
        starting_balance: balance,
        ..EngineConfig::default()
    };
    Layer::open(FlakyStore::default(), test_user(), config).expect("open layer")
}
