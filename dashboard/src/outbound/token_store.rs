//! Session token storage adapters.
//!
//! [`FileTokenStore`] keeps the token in a single file named after the
//! storage key inside a capability-scoped directory, so the process can
//! never touch anything outside it.

use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::AccessToken;
use crate::domain::ports::{TokenStore, TokenStoreError};

/// Token store backed by one file in a directory.
#[derive(Debug)]
pub struct FileTokenStore {
    dir: Dir,
    key: String,
}

impl FileTokenStore {
    /// Open `dir_path` and store the token under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Unavailable`] when the directory cannot be
    /// opened or `key` is not a plain file name.
    pub fn open(dir_path: &Path, key: &str) -> Result<Self, TokenStoreError> {
        let dir = Dir::open_ambient_dir(dir_path, ambient_authority()).map_err(|err| {
            TokenStoreError::unavailable(format!("{}: {err}", dir_path.display()))
        })?;
        Self::from_dir(dir, key)
    }

    /// Store the token under `key` inside an already opened directory.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Unavailable`] when `key` is not a plain
    /// file name.
    pub fn from_dir(dir: Dir, key: &str) -> Result<Self, TokenStoreError> {
        let name = key.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(TokenStoreError::unavailable(format!(
                "invalid token key {key:?}"
            )));
        }
        Ok(Self {
            dir,
            key: name.to_owned(),
        })
    }

    /// File name the token is stored under.
    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        match self.dir.read_to_string(&self.key) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    debug!(key = %self.key, "stored token is blank");
                    Ok(None)
                } else {
                    Ok(Some(AccessToken::new(token)))
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TokenStoreError::io(err.to_string())),
        }
    }

    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        self.dir
            .write(&self.key, token.expose())
            .map_err(|err| TokenStoreError::io(err.to_string()))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match self.dir.remove_file(&self.key) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TokenStoreError::io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn store_in(temp: &TempDir) -> FileTokenStore {
        FileTokenStore::open(temp.path(), "token").expect("open token store")
    }

    #[rstest]
    fn missing_file_loads_as_empty(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        assert_eq!(store.load().expect("load"), None);
    }

    #[rstest]
    fn saved_token_survives_reopen(temp_dir: TempDir) {
        store_in(&temp_dir)
            .save(&AccessToken::new("fake-jwt-token"))
            .expect("save");

        let reopened = store_in(&temp_dir);
        let token = reopened.load().expect("load").expect("token present");
        assert_eq!(token.expose(), "fake-jwt-token");
        assert!(temp_dir.path().join("token").is_file());
    }

    #[rstest]
    fn clear_removes_file_and_is_idempotent(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        store.save(&AccessToken::new("abc")).expect("save");

        store.clear().expect("first clear");
        store.clear().expect("second clear");

        assert_eq!(store.load().expect("load"), None);
        assert!(!temp_dir.path().join("token").exists());
    }

    #[rstest]
    fn blank_file_loads_as_empty(temp_dir: TempDir) {
        std::fs::write(temp_dir.path().join("token"), "  \n").expect("write blank");
        assert_eq!(store_in(&temp_dir).load().expect("load"), None);
    }

    #[rstest]
    #[case("")]
    #[case("../token")]
    #[case("nested/token")]
    #[case("..")]
    fn rejects_keys_that_are_not_file_names(temp_dir: TempDir, #[case] key: &str) {
        let err = FileTokenStore::open(temp_dir.path(), key).expect_err("invalid key");
        assert_eq!(err.variant_name(), "unavailable");
    }

    #[rstest]
    fn missing_directory_is_unavailable() {
        let err = FileTokenStore::open(Path::new("/definitely/not/here"), "token")
            .expect_err("missing dir");
        assert!(matches!(err, TokenStoreError::Unavailable { .. }));
    }
}
