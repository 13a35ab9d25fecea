use anyhow::{bail, Context as _, Result};
use commonware_codec::{DecodeExt, Encode};
use commonware_cryptography::{sha256::Sha256, Hasher};
use commonware_utils::hex;
use kazik_types::{LedgerSnapshot, UserId};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

/// Durable key-value storage for ledger snapshots, keyed by user identity.
pub trait SnapshotStore {
    fn load(&self, user: &UserId) -> Result<Option<LedgerSnapshot>>;
    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self, user: &UserId) -> Result<Option<LedgerSnapshot>> {
        (**self).load(user)
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }
}

#[derive(Default)]
pub struct Memory {
    state: HashMap<UserId, LedgerSnapshot>,
}

impl SnapshotStore for Memory {
    fn load(&self, user: &UserId) -> Result<Option<LedgerSnapshot>> {
        Ok(self.state.get(user).cloned())
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        self.state.insert(snapshot.user.clone(), snapshot.clone());
        Ok(())
    }
}

/// One binary snapshot file per user under a directory.
///
/// Writes go to a temporary file that is renamed over the previous snapshot.
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .with_context(|| format!("create snapshot directory {}", directory.display()))?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, user: &UserId) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(user.as_str().as_bytes());
        self.directory
            .join(format!("{}.ledger", hex(hasher.finalize().as_ref())))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, user: &UserId) -> Result<Option<LedgerSnapshot>> {
        let path = self.path(user);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("read snapshot {}", path.display()))
            }
        };
        let snapshot = LedgerSnapshot::decode(bytes.as_slice())
            .with_context(|| format!("decode snapshot {}", path.display()))?;
        if &snapshot.user != user {
            bail!(
                "snapshot {} belongs to {}, not {}",
                path.display(),
                snapshot.user,
                user
            );
        }
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &LedgerSnapshot) -> Result<()> {
        let path = self.path(&snapshot.user);
        let tmp = path.with_extension("ledger.tmp");
        fs::write(&tmp, snapshot.encode().as_ref())
            .with_context(|| format!("write snapshot {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replace snapshot {}", path.display()))?;
        Ok(())
    }
}
