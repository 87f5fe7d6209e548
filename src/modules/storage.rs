use bytes::Bytes;
use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Disk-backed store for uploaded files.
///
/// Everything lands in a single flat directory. The path returned by
/// [`UploadStore::store`] is recorded verbatim in the file's database
/// record and is what downloads read from later.
#[derive(Clone, Debug)]
pub struct UploadStore {
    root: String,
}

impl UploadStore {
    pub fn new<T: Into<String>>(root: T) -> UploadStore {
        UploadStore { root: root.into() }
    }

    /// Creates the upload root if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Writes `bytes` under a timestamped name and returns the stored
    /// path. Two same-named writes in the same millisecond collide.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        let path = format!("{}/{}", self.root, stored_filename(original_name));
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(bytes).await?;
        Ok(path)
    }
}

/// Reads a stored file back by its recorded path.
pub async fn read_stored(path: &str) -> std::io::Result<Bytes> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).await?;
    Ok(Bytes::from(bytes))
}

/// `<upload-millis>-<original-name>`, the on-disk naming rule.
fn stored_filename(original_name: &str) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), original_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> String {
        std::env::temp_dir()
            .join(format!("filedock-test-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn stored_filename_keeps_the_original_name() {
        let name = stored_filename("report.pdf");
        let prefix = name.strip_suffix("-report.pdf").unwrap();
        assert!(prefix.parse::<i64>().is_ok());
    }

    #[tokio::test]
    async fn store_then_read_roundtrips() {
        let store = UploadStore::new(temp_root());
        store.ensure_root().await.unwrap();

        let path = store.store("notes.txt", b"hello there").await.unwrap();
        let bytes = read_stored(&path).await.unwrap();
        assert_eq!(&bytes[..], b"hello there");
    }

    #[tokio::test]
    async fn reading_a_dangling_path_fails() {
        let missing = format!("{}/1-missing.bin", temp_root());
        assert!(read_stored(&missing).await.is_err());
    }
}
