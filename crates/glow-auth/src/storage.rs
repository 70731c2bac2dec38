//! 토큰 영구 저장소.
//!
//! 브라우저 localStorage처럼 문자열 키-값을 동기적으로 읽고 씁니다.
//! CLI는 [`FileStorage`], 테스트와 데모는 [`MemoryStorage`]를 사용합니다.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use glow_core::GlowError;
use tracing::warn;

/// 토큰이 저장되는 키.
pub const TOKEN_STORAGE_KEY: &str = "aliceglow_token";

/// 저장소 에러.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("저장소 입출력 실패: {0}")]
    Io(#[from] std::io::Error),
    #[error("저장소 파일 형식 오류: {0}")]
    Format(#[from] serde_json::Error),
}

impl From<StorageError> for GlowError {
    fn from(err: StorageError) -> Self {
        GlowError::Storage(err.to_string())
    }
}

/// 동기 키-값 저장소.
pub trait CredentialStorage: Send + Sync {
    /// 값 조회.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// 값 저장.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    /// 값 삭제 (없으면 아무 일도 하지 않음).
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 프로세스 메모리 저장소.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 값을 가진 저장소 생성.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl CredentialStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// JSON 파일 기반 저장소.
///
/// 파일 전체가 하나의 `{ "key": "value" }` 객체입니다.
/// 쓰기는 임시 파일에 기록한 뒤 rename 합니다.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 저장 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// 쓰기용 로드. 형식이 깨진 파일은 빈 저장소로 간주하며, 두 번째 값이 `true`면
    /// 파일을 다시 써야 합니다.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Format(e)) => {
                warn!(path = %self.path.display(), error = %e, "Replacing corrupt storage file");
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CredentialStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let (mut entries, corrupt) = self.load_for_write()?;
        if entries.remove(key).is_some() || corrupt {
            self.store(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);

        storage.set(TOKEN_STORAGE_KEY, "t1").unwrap();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("t1"));

        storage.remove(TOKEN_STORAGE_KEY).unwrap();
        storage.remove(TOKEN_STORAGE_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("storage.json"));

        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);

        storage.set(TOKEN_STORAGE_KEY, "a.b.c").unwrap();
        storage.set("theme", "dark").unwrap();

        // 다른 인스턴스에서도 동일하게 읽힘
        let reopened = FileStorage::new(storage.path());
        assert_eq!(reopened.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("a.b.c"));

        reopened.remove(TOKEN_STORAGE_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get(TOKEN_STORAGE_KEY), Err(StorageError::Format(_))));
    }

    #[test]
    fn test_file_storage_set_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ truncated").unwrap();

        let storage = FileStorage::new(&path);
        storage.set(TOKEN_STORAGE_KEY, "a.b.c").unwrap();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_file_storage_remove_resets_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::new(&path);
        storage.remove(TOKEN_STORAGE_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }
}
