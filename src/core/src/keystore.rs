//! Local storage for the single wallet keypair.
//!
//! The wallet is kept as a small JSON document holding the address and the
//! private key in plaintext. On Unix the file is created readable by the
//! owner only; there is no encryption at rest.

use crate::errors::CoreError;
use crate::types::Wallet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-backed store for one wallet.
#[derive(Debug, Clone)]
pub struct KeyStore {
    /// Location of the wallet file
    path: PathBuf,
}

impl KeyStore {
    /// Creates a key store backed by the given file.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Gets the location of the wallet file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored wallet.
    ///
    /// A missing file is `Ok(None)`. A file that is not a wallet, or whose
    /// address does not match its key, is `CorruptState`.
    pub fn load(&self) -> Result<Option<Wallet>, CoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No wallet at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(CoreError::Io(e)),
        };

        let wallet: Wallet = serde_json::from_str(&contents).map_err(|e| self.corrupt(e))?;
        wallet.check_consistency().map_err(|e| self.corrupt(e))?;

        debug!("Loaded wallet {} from {}", wallet.address(), self.path.display());
        Ok(Some(wallet))
    }

    /// Generates and stores a new wallet.
    ///
    /// Refuses with `AlreadyExists` if a wallet is already stored, leaving the
    /// file untouched.
    pub fn generate(&self) -> Result<Wallet, CoreError> {
        if let Some(existing) = self.load()? {
            warn!("Refusing to overwrite wallet at {}", self.path.display());
            return Err(CoreError::AlreadyExists {
                path: self.path.clone(),
                address: existing.address().to_string(),
            });
        }

        let wallet = Wallet::random();
        self.save(&wallet)?;
        info!("Created wallet {} at {}", wallet.address(), self.path.display());

        Ok(wallet)
    }

    /// Writes the wallet, replacing the file in one rename.
    fn save(&self, wallet: &Wallet) -> Result<(), CoreError> {
        let contents = serde_json::to_string_pretty(wallet)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        {
            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            {
                use std::os::unix::fs::OpenOptionsExt;
                options.mode(0o600);
            }

            let mut file = options.open(&tmp)?;
            file.write_all(contents.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    fn corrupt<E: ToString>(&self, reason: E) -> CoreError {
        CoreError::CorruptState {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
