//! On-disk keypair provisioning and loading.
//!
//! The key directory is the unit of provisioning: if it does not exist it is
//! created and a fresh keypair is written into it; if it exists, both key
//! files inside it are trusted and read back as-is. Key files are never
//! rewritten or deleted once created.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use msgsign_core::SignerConfig;
use msgsign_crypto::{
    key_id, parse_private_key_pem, parse_public_key_pem, private_key_to_pem, public_key_to_pem,
    KeyError, KeyKind, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
use zeroize::Zeroizing;

use crate::error::{KeystoreError, KeystoreResult};

/// Permission bits of the key directory (owner only).
pub const KEY_DIR_MODE: u32 = 0o700;
/// Permission bits of the private key file (owner read/write).
pub const PRIVATE_KEY_MODE: u32 = 0o600;
/// Permission bits of the public key file (world-readable).
pub const PUBLIC_KEY_MODE: u32 = 0o644;

/// How the keys of a [`KeyMaterial`] came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Generated and persisted during this invocation
    Generated,
    /// Read from existing key files
    Loaded,
}

/// The keypair available to a signing run.
pub struct KeyMaterial {
    pub private_key: RsaPrivateKey,
    pub public_key: RsaPublicKey,
    pub origin: KeyOrigin,
}

/// File locations of a single keypair.
#[derive(Debug, Clone)]
pub struct KeyStore {
    key_dir: PathBuf,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl KeyStore {
    pub fn new(config: &SignerConfig) -> Self {
        Self {
            key_dir: config.key_dir.clone(),
            private_key_path: config.private_key_path(),
            public_key_path: config.public_key_path(),
        }
    }

    pub fn key_dir(&self) -> &Path {
        &self.key_dir
    }

    pub fn private_key_path(&self) -> &Path {
        &self.private_key_path
    }

    pub fn public_key_path(&self) -> &Path {
        &self.public_key_path
    }

    /// Ensures a keypair exists, generating an RSA-4096 pair if needed.
    ///
    /// Returns the generated pair, or `None` when the key directory already
    /// existed and nothing was done.
    pub fn provision(&self) -> KeystoreResult<Option<RsaKeyPair>> {
        self.provision_with(RsaKeyPair::generate)
    }

    /// Like [`KeyStore::provision`], with a caller-supplied key generator.
    pub fn provision_with<F>(&self, generate: F) -> KeystoreResult<Option<RsaKeyPair>>
    where
        F: FnOnce() -> Result<RsaKeyPair, KeyError>,
    {
        match create_key_dir(&self.key_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(
                    key_dir = %self.key_dir.display(),
                    "Key directory exists, skipping provisioning"
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(KeystoreError::CreateDir {
                    path: self.key_dir.clone(),
                    source,
                });
            }
        }

        tracing::info!(key_dir = %self.key_dir.display(), "Generating RSA keypair");
        let keypair = generate()?;

        let private_pem = private_key_to_pem(keypair.private_key())?;
        write_key_file(
            &self.private_key_path,
            private_pem.as_bytes(),
            PRIVATE_KEY_MODE,
        )
        .map_err(|source| KeystoreError::WriteKey {
            kind: KeyKind::Private,
            path: self.private_key_path.clone(),
            source,
        })?;

        let public_pem = public_key_to_pem(keypair.public_key())?;
        write_key_file(&self.public_key_path, public_pem.as_bytes(), PUBLIC_KEY_MODE).map_err(
            |source| KeystoreError::WriteKey {
                kind: KeyKind::Public,
                path: self.public_key_path.clone(),
                source,
            },
        )?;

        tracing::info!(
            key_id = %key_id(keypair.public_key()),
            private_key = %self.private_key_path.display(),
            public_key = %self.public_key_path.display(),
            "Keypair provisioned"
        );

        Ok(Some(keypair))
    }

    /// Reads and parses the private key file.
    pub fn load_private_key(&self) -> KeystoreResult<RsaPrivateKey> {
        let pem = Zeroizing::new(std::fs::read(&self.private_key_path).map_err(|source| {
            KeystoreError::ReadKey {
                kind: KeyKind::Private,
                path: self.private_key_path.clone(),
                source,
            }
        })?);
        Ok(parse_private_key_pem(&pem)?)
    }

    /// Reads and parses the public key file.
    pub fn load_public_key(&self) -> KeystoreResult<RsaPublicKey> {
        let pem = std::fs::read(&self.public_key_path).map_err(|source| KeystoreError::ReadKey {
            kind: KeyKind::Public,
            path: self.public_key_path.clone(),
            source,
        })?;
        Ok(parse_public_key_pem(&pem)?)
    }

    /// Provisions if necessary, then loads whatever was not just generated.
    pub fn open(&self) -> KeystoreResult<KeyMaterial> {
        self.open_with(RsaKeyPair::generate)
    }

    /// Like [`KeyStore::open`], with a caller-supplied key generator.
    pub fn open_with<F>(&self, generate: F) -> KeystoreResult<KeyMaterial>
    where
        F: FnOnce() -> Result<RsaKeyPair, KeyError>,
    {
        if let Some(keypair) = self.provision_with(generate)? {
            let (private_key, public_key) = keypair.into_parts();
            return Ok(KeyMaterial {
                private_key,
                public_key,
                origin: KeyOrigin::Generated,
            });
        }

        let private_key = self.load_private_key()?;
        let public_key = self.load_public_key()?;

        tracing::info!(
            key_id = %key_id(&public_key),
            key_dir = %self.key_dir.display(),
            "Loaded existing keypair"
        );

        Ok(KeyMaterial {
            private_key,
            public_key,
            origin: KeyOrigin::Loaded,
        })
    }
}

// Non-recursive on purpose: an existing directory must surface as AlreadyExists.
fn create_key_dir(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        let mut dir_builder = std::fs::DirBuilder::new();
        dir_builder.mode(KEY_DIR_MODE);
        dir_builder.create(path)
    }

    #[cfg(not(unix))]
    {
        std::fs::create_dir(path)
    }
}

fn write_key_file(path: &Path, contents: &[u8], mode: u32) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;

    // Creation mode is filtered by the umask; pin the exact bits afterwards.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }

    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use tempfile::TempDir;

    fn small_keypair() -> Result<RsaKeyPair, KeyError> {
        RsaKeyPair::generate_with_bits(&mut OsRng, 2048)
    }

    fn store_in(temp: &TempDir) -> KeyStore {
        KeyStore::new(&SignerConfig::with_key_dir(temp.path().join("keys")))
    }

    #[test]
    fn test_provision_creates_both_files() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let keypair = store.provision_with(small_keypair).unwrap();
        assert!(keypair.is_some());

        let mut entries: Vec<_> = std::fs::read_dir(store.key_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        entries.sort();
        assert_eq!(entries, vec!["id_rsa", "id_rsa.pub"]);

        let keypair = keypair.unwrap();
        assert_eq!(&store.load_private_key().unwrap(), keypair.private_key());
        assert_eq!(&store.load_public_key().unwrap(), keypair.public_key());
    }

    #[cfg(unix)]
    #[test]
    fn test_provision_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.provision_with(small_keypair).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(store.key_dir()), KEY_DIR_MODE);
        assert_eq!(mode(store.private_key_path()), PRIVATE_KEY_MODE);
        assert_eq!(mode(store.public_key_path()), PUBLIC_KEY_MODE);
    }

    #[test]
    fn test_provision_is_noop_when_directory_exists() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir(store.key_dir()).unwrap();

        let result = store
            .provision_with(|| panic!("generator must not run for an existing directory"))
            .unwrap();

        assert!(result.is_none());
        assert_eq!(std::fs::read_dir(store.key_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_open_generates_then_loads() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let first = store.open_with(small_keypair).unwrap();
        assert_eq!(first.origin, KeyOrigin::Generated);

        let private_before = std::fs::read(store.private_key_path()).unwrap();
        let public_before = std::fs::read(store.public_key_path()).unwrap();

        let second = store
            .open_with(|| panic!("keys already provisioned"))
            .unwrap();
        assert_eq!(second.origin, KeyOrigin::Loaded);
        assert_eq!(second.private_key, first.private_key);
        assert_eq!(second.public_key, first.public_key);

        assert_eq!(std::fs::read(store.private_key_path()).unwrap(), private_before);
        assert_eq!(std::fs::read(store.public_key_path()).unwrap(), public_before);
    }

    #[test]
    fn test_open_honours_custom_filenames() {
        let temp = TempDir::new().unwrap();
        let mut config = SignerConfig::with_key_dir(temp.path().join("custom"));
        config.private_key_filename = "signer.key".into();
        config.public_key_filename = "signer.pub".into();
        let store = KeyStore::new(&config);

        store.open_with(small_keypair).unwrap();

        assert!(temp.path().join("custom/signer.key").is_file());
        assert!(temp.path().join("custom/signer.pub").is_file());
    }

    #[test]
    fn test_missing_key_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::create_dir(store.key_dir()).unwrap();

        let result = store.open_with(small_keypair);
        assert!(matches!(
            result,
            Err(KeystoreError::ReadKey {
                kind: KeyKind::Private,
                ..
            })
        ));
    }

    #[test]
    fn test_corrupt_key_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.provision_with(small_keypair).unwrap();

        std::fs::remove_file(store.public_key_path()).unwrap();
        std::fs::write(store.public_key_path(), b"garbage").unwrap();

        let result = store.open_with(small_keypair);
        assert!(matches!(
            result,
            Err(KeystoreError::Key(KeyError::Decoding {
                kind: KeyKind::Public,
                ..
            }))
        ));
    }

    #[test]
    fn test_missing_parent_is_create_error() {
        let temp = TempDir::new().unwrap();
        let config = SignerConfig::with_key_dir(temp.path().join("missing/keys"));
        let store = KeyStore::new(&config);

        let result = store.provision_with(small_keypair);
        assert!(matches!(result, Err(KeystoreError::CreateDir { .. })));
    }

    #[test]
    fn test_generation_failure_propagates() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let result = store.provision_with(|| {
            Err(KeyError::Generation {
                reason: "entropy source unavailable".to_string(),
            })
        });
        assert!(matches!(
            result,
            Err(KeystoreError::Key(KeyError::Generation { .. }))
        ));
    }
}
