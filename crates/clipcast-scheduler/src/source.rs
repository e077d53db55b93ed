//! Carousel asset source.
//!
//! Cloud-storage browsing itself is an external collaborator; the
//! orchestrator only depends on this trait. The local implementation reads
//! image folders straight off the filesystem.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use clipcast_models::CarouselFolder;

use crate::error::{SchedulerError, SchedulerResult};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
const CAPTION_FILENAME: &str = "caption.txt";

/// Source store for carousel folders.
#[async_trait]
pub trait CarouselSource: Send + Sync {
    /// Ordered image files of a folder.
    async fn list_images(&self, folder: &CarouselFolder) -> SchedulerResult<Vec<PathBuf>>;

    /// The folder's `caption.txt` sidecar, if present.
    async fn read_caption(&self, folder: &CarouselFolder) -> SchedulerResult<Option<String>>;

    /// The folder's current display name.
    async fn folder_name(&self, folder: &CarouselFolder) -> SchedulerResult<String>;
}

/// Filesystem-backed carousel source.
#[derive(Debug, Clone, Default)]
pub struct LocalCarouselSource;

impl LocalCarouselSource {
    pub fn new() -> Self {
        Self
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[async_trait]
impl CarouselSource for LocalCarouselSource {
    async fn list_images(&self, folder: &CarouselFolder) -> SchedulerResult<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(&folder.path).await?;
        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && is_image(&path) {
                images.push(path);
            }
        }
        // Slide order follows filename order.
        images.sort();
        Ok(images)
    }

    async fn read_caption(&self, folder: &CarouselFolder) -> SchedulerResult<Option<String>> {
        let path = folder.path.join(CAPTION_FILENAME);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                let trimmed = text.trim();
                Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn folder_name(&self, folder: &CarouselFolder) -> SchedulerResult<String> {
        folder
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SchedulerError::source(format!("unnamed folder: {}", folder.id)))
    }
}

/// Discover carousel folders: every directory under `root` that directly
/// contains at least one image.
pub async fn find_carousel_folders(root: impl AsRef<Path>) -> SchedulerResult<Vec<CarouselFolder>> {
    let root = root.as_ref();
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut has_images = false;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_image(&path) {
                has_images = true;
            }
        }
        if has_images && dir != root {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string());
            found.push(CarouselFolder::new(dir.display().to_string(), name, &dir));
        }
    }

    found.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write(path: &Path, contents: &str) {
        tokio::fs::write(path, contents).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_images_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("02.jpg"), "b").await;
        write(&dir.path().join("01.png"), "a").await;
        write(&dir.path().join("caption.txt"), "hello").await;
        write(&dir.path().join("notes.md"), "x").await;

        let folder = CarouselFolder::new("f1", "f1", dir.path());
        let images = LocalCarouselSource::new().list_images(&folder).await.unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["01.png", "02.jpg"]);
    }

    #[tokio::test]
    async fn test_read_caption_trims_and_handles_missing() {
        let dir = tempfile::tempdir().unwrap();
        let folder = CarouselFolder::new("f1", "f1", dir.path());
        let source = LocalCarouselSource::new();

        assert_eq!(source.read_caption(&folder).await.unwrap(), None);

        write(&dir.path().join("caption.txt"), "  my caption \n").await;
        assert_eq!(
            source.read_caption(&folder).await.unwrap().as_deref(),
            Some("my caption")
        );

        write(&dir.path().join("caption.txt"), "   \n").await;
        assert_eq!(source.read_caption(&folder).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_carousel_folders_discovers_nested() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("series-a");
        let nested = root.path().join("more/series-b");
        let empty = root.path().join("empty");
        tokio::fs::create_dir_all(&a).await.unwrap();
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::create_dir_all(&empty).await.unwrap();
        write(&a.join("1.png"), "img").await;
        write(&nested.join("1.webp"), "img").await;

        let folders = find_carousel_folders(root.path()).await.unwrap();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(folders.len(), 2);
        assert!(names.contains(&"series-a"));
        assert!(names.contains(&"series-b"));
    }
}
