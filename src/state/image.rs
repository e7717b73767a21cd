/// Staged product image and its preview lifecycle
///
/// A newly picked image is copied into the preview cache so the UI can
/// render it before upload. That cache file is a held resource: it must be
/// deleted exactly once, when the staging is superseded, cleared, or
/// dropped. A remote image link (edit form, no new file picked) is only a
/// URL string and owns nothing.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors from staging a local image file.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The picked path does not exist or the file is empty.
    #[error("no file selected")]
    NoFile,

    /// The file's bytes are not a recognized image format.
    #[error("selected file is not a recognized image")]
    UnsupportedFormat,

    /// `hydrate_from_remote` was called while a local file is staged.
    /// The caller must `clear` first; this is a contract violation.
    #[error("a local file is already staged; clear it before hydrating from a remote link")]
    AlreadyStaged,

    #[error("preview cache error: {0}")]
    Io(#[from] std::io::Error),
}

/// Monotonic suffix so concurrent stagings never collide on a cache name.
static PREVIEW_SEQ: AtomicU64 = AtomicU64::new(0);

/// Owner of one preview cache file.
///
/// The file is removed exactly once: by the first `release` call, or by
/// `Drop` if nothing released it explicitly. A second `release` is a no-op.
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
    released: bool,
}

impl PreviewHandle {
    /// Write `bytes` into a fresh cache file under `cache_dir`.
    fn create(cache_dir: &Path, bytes: &[u8]) -> Result<Self, StagingError> {
        fs::create_dir_all(cache_dir)?;

        let seq = PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = cache_dir.join(format!("staged-{}-{}.img", process::id(), seq));
        fs::write(&path, bytes)?;

        Ok(PreviewHandle {
            path,
            released: false,
        })
    }

    /// Path of the cache file, for the preview widget.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the cache file. Safe to call more than once; only the first
    /// call does anything.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = fs::remove_file(&self.path) {
            warn!("failed to remove preview cache {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.release();
    }
}

/// What the preview widget should display.
#[derive(Debug)]
pub enum PreviewRef {
    /// A locally staged file, backed by an owned cache file.
    Local(PreviewHandle),
    /// An already-uploaded image, referenced by URL only.
    Remote(String),
}

/// A picked local file, held in memory until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// At most one pending local image plus its preview reference.
///
/// For a locally staged file, `file` and the preview are set and cleared
/// together. After `hydrate_from_remote` the preview is present with no
/// file; submitting in that state means "keep the existing image".
#[derive(Debug)]
pub struct ImageStaging {
    cache_dir: PathBuf,
    file: Option<StagedFile>,
    preview: Option<PreviewRef>,
}

impl ImageStaging {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            file: None,
            preview: None,
        }
    }

    /// Edit-form initializer: preview set to the product's remote image
    /// link (if any), no file staged.
    pub fn with_remote_preview(cache_dir: PathBuf, url: &str) -> Self {
        let mut staging = Self::new(cache_dir);
        if !url.is_empty() {
            staging.preview = Some(PreviewRef::Remote(url.to_string()));
        }
        staging
    }

    pub fn file(&self) -> Option<&StagedFile> {
        self.file.as_ref()
    }

    pub fn has_local_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.preview.as_ref()
    }

    /// Stage the file at `path`, replacing any previous local staging.
    ///
    /// The previous preview handle (if local) is released before the new
    /// one is created. This is the only path that may overwrite an
    /// existing local preview.
    pub fn stage(&mut self, path: &Path) -> Result<(), StagingError> {
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StagingError::NoFile
            } else {
                StagingError::Io(e)
            }
        })?;

        if bytes.is_empty() {
            return Err(StagingError::NoFile);
        }
        if image::guess_format(&bytes).is_err() {
            return Err(StagingError::UnsupportedFormat);
        }

        self.release_local_preview();

        let handle = PreviewHandle::create(&self.cache_dir, &bytes)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        self.file = Some(StagedFile { file_name, bytes });
        self.preview = Some(PreviewRef::Local(handle));
        Ok(())
    }

    /// Drop both the staged file and the preview. A local preview handle
    /// is released; a remote URL is merely discarded.
    pub fn clear(&mut self) {
        self.release_local_preview();
        self.file = None;
        self.preview = None;
    }

    /// Show an already-uploaded image without staging a file.
    ///
    /// Only valid while no local file is staged.
    pub fn hydrate_from_remote(&mut self, url: &str) -> Result<(), StagingError> {
        if self.file.is_some() {
            return Err(StagingError::AlreadyStaged);
        }
        self.preview = Some(PreviewRef::Remote(url.to_string()));
        Ok(())
    }

    fn release_local_preview(&mut self) {
        if let Some(PreviewRef::Local(handle)) = self.preview.as_mut() {
            handle.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest byte prefix image::guess_format recognizes as PNG
    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn temp_dir(tag: &str) -> PathBuf {
        let seq = PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "catalog-admin-test-{}-{}-{}",
            tag,
            process::id(),
            seq
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn fake_image(dir: &Path, name: &str, extra: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(extra);
        fs::write(&path, bytes).unwrap();
        path
    }

    fn local_preview_path(staging: &ImageStaging) -> PathBuf {
        match staging.preview() {
            Some(PreviewRef::Local(handle)) => handle.path().to_path_buf(),
            other => panic!("expected local preview, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_creates_preview_cache_file() {
        let src = temp_dir("stage-src");
        let cache = temp_dir("stage-cache");
        let mut staging = ImageStaging::new(cache);

        let file = fake_image(&src, "chair.png", b"aaaa");
        staging.stage(&file).unwrap();

        assert!(staging.has_local_file());
        assert_eq!(staging.file().unwrap().file_name, "chair.png");
        assert!(local_preview_path(&staging).exists());
    }

    #[test]
    fn test_restage_releases_previous_handle_exactly_once() {
        let src = temp_dir("restage-src");
        let cache = temp_dir("restage-cache");
        let mut staging = ImageStaging::new(cache);

        let first = fake_image(&src, "a.png", b"first");
        let second = fake_image(&src, "b.png", b"second");

        staging.stage(&first).unwrap();
        let first_preview = local_preview_path(&staging);

        staging.stage(&second).unwrap();
        let second_preview = local_preview_path(&staging);

        // First handle released (cache file gone), second one live
        assert!(!first_preview.exists());
        assert!(second_preview.exists());
        assert_eq!(staging.file().unwrap().file_name, "b.png");
        assert!(staging.file().unwrap().bytes.ends_with(b"second"));
    }

    #[test]
    fn test_clear_after_stage_removes_cache_file() {
        let src = temp_dir("clear-src");
        let cache = temp_dir("clear-cache");
        let mut staging = ImageStaging::new(cache);

        let file = fake_image(&src, "a.png", b"x");
        staging.stage(&file).unwrap();
        let preview = local_preview_path(&staging);

        staging.clear();

        assert!(!preview.exists());
        assert!(staging.file().is_none());
        assert!(staging.preview().is_none());
    }

    #[test]
    fn test_clear_after_remote_hydration_releases_nothing() {
        let cache = temp_dir("remote-clear");
        let mut staging = ImageStaging::new(cache);

        staging.hydrate_from_remote("http://h/x.png").unwrap();
        staging.clear();

        assert!(staging.file().is_none());
        assert!(staging.preview().is_none());
    }

    #[test]
    fn test_hydrate_after_stage_is_rejected() {
        let src = temp_dir("hydrate-src");
        let cache = temp_dir("hydrate-cache");
        let mut staging = ImageStaging::new(cache);

        let file = fake_image(&src, "a.png", b"x");
        staging.stage(&file).unwrap();

        let err = staging.hydrate_from_remote("http://h/x.png").unwrap_err();
        assert!(matches!(err, StagingError::AlreadyStaged));

        // Staging untouched by the rejected call
        assert!(staging.has_local_file());
        assert!(local_preview_path(&staging).exists());
    }

    #[test]
    fn test_stage_missing_file_is_no_file() {
        let cache = temp_dir("missing");
        let mut staging = ImageStaging::new(cache);

        let err = staging.stage(Path::new("/nonexistent/chair.png")).unwrap_err();
        assert!(matches!(err, StagingError::NoFile));
    }

    #[test]
    fn test_stage_empty_file_is_no_file() {
        let src = temp_dir("empty-src");
        let cache = temp_dir("empty-cache");
        let mut staging = ImageStaging::new(cache);

        let path = src.join("empty.png");
        fs::write(&path, b"").unwrap();

        let err = staging.stage(&path).unwrap_err();
        assert!(matches!(err, StagingError::NoFile));
    }

    #[test]
    fn test_stage_non_image_is_unsupported() {
        let src = temp_dir("text-src");
        let cache = temp_dir("text-cache");
        let mut staging = ImageStaging::new(cache);

        let path = src.join("notes.txt");
        fs::write(&path, b"just some text, no image signature").unwrap();

        let err = staging.stage(&path).unwrap_err();
        assert!(matches!(err, StagingError::UnsupportedFormat));
    }

    #[test]
    fn test_drop_releases_held_handle() {
        let src = temp_dir("drop-src");
        let cache = temp_dir("drop-cache");

        let preview = {
            let mut staging = ImageStaging::new(cache);
            let file = fake_image(&src, "a.png", b"x");
            staging.stage(&file).unwrap();
            local_preview_path(&staging)
        };

        assert!(!preview.exists());
    }
}
