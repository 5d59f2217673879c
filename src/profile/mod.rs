pub mod data_url;
pub mod store;

use std::sync::Arc;

use crate::db::models::User;
use store::{photo_key, KeyValueStore, StoreError};

pub use store::{MemoryKvStore, SqliteKvStore};

/// Largest accepted photo: 5 MiB.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// A file picked by the user, as received from the browser.
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    /// Parameters on the content type are dropped; only the media type is kept.
    pub fn new(content_type: impl AsRef<str>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: data_url::mime_essence(content_type.as_ref()),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Not an image: {0:?}")]
    NotAnImage(String),

    #[error("Image is {size} bytes, limit is 5 MiB")]
    TooLarge { size: usize },

    #[error("Photo encoding failed: {0}")]
    Encode(#[from] tokio::task::JoinError),

    #[error("Photo store error: {0}")]
    Store(#[from] StoreError),
}

impl PhotoError {
    /// Warning shown to the user, for the errors the user can fix.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            PhotoError::NotAnImage(_) => Some(Notice::PhotoType),
            PhotoError::TooLarge { .. } => Some(Notice::PhotoSize),
            PhotoError::Encode(_) | PhotoError::Store(_) => None,
        }
    }
}

/// Blocking warnings raised by a rejected photo selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PhotoType,
    PhotoSize,
}

impl Notice {
    pub fn code(&self) -> &'static str {
        match self {
            Notice::PhotoType => "photo-type",
            Notice::PhotoSize => "photo-size",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "photo-type" => Some(Notice::PhotoType),
            "photo-size" => Some(Notice::PhotoSize),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::PhotoType => "Please select an image file.",
            Notice::PhotoSize => "Image size should be less than 5MB.",
        }
    }
}

/// A validated selection waiting to be encoded.
#[derive(Debug)]
pub struct PendingPhoto {
    generation: u64,
    file: PhotoFile,
}

impl PendingPhoto {
    /// Encode off the async executor; base64 over a few MiB is not free.
    pub async fn encode(self) -> Result<EncodedPhoto, PhotoError> {
        let PendingPhoto { generation, file } = self;
        let data_url = tokio::task::spawn_blocking(move || {
            data_url::encode(&file.content_type, &file.bytes)
        })
        .await?;
        Ok(EncodedPhoto {
            generation,
            data_url,
        })
    }
}

#[derive(Debug)]
pub struct EncodedPhoto {
    generation: u64,
    data_url: String,
}

impl EncodedPhoto {
    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// The signed-in user's profile and the photo currently shown for them.
pub struct ProfileView {
    user: User,
    store: Arc<dyn KeyValueStore>,
    displayed_photo: String,
    latest_generation: u64,
}

impl ProfileView {
    /// A stored photo wins over the user's default one.
    pub fn load(user: User, store: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let displayed_photo = match store.get(&photo_key(&user.username))? {
            Some(saved) => saved,
            None => user.photo.clone(),
        };

        Ok(Self {
            user,
            store,
            displayed_photo,
            latest_generation: 0,
        })
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn displayed_photo(&self) -> &str {
        &self.displayed_photo
    }

    /// Validate a selection and hand it out for encoding. Rejections leave
    /// the view and the store untouched.
    ///
    /// Every accepted selection supersedes the ones before it: once a newer
    /// selection has begun, finishing an older one is a no-op.
    pub fn begin_select(&mut self, file: PhotoFile) -> Result<PendingPhoto, PhotoError> {
        if !data_url::is_image_mime(&file.content_type) {
            tracing::warn!(
                "Rejected photo for {}: content type {:?}",
                self.user.username,
                file.content_type
            );
            return Err(PhotoError::NotAnImage(file.content_type));
        }

        if file.size() > MAX_PHOTO_BYTES {
            tracing::warn!(
                "Rejected photo for {}: {} bytes",
                self.user.username,
                file.size()
            );
            return Err(PhotoError::TooLarge { size: file.size() });
        }

        self.latest_generation += 1;
        Ok(PendingPhoto {
            generation: self.latest_generation,
            file,
        })
    }

    /// Show and persist an encoded photo. Returns `false` if a newer
    /// selection has superseded it.
    pub fn finish_select(&mut self, encoded: EncodedPhoto) -> Result<bool, PhotoError> {
        if encoded.generation != self.latest_generation {
            tracing::debug!(
                "Dropping superseded photo for {} (generation {} < {})",
                self.user.username,
                encoded.generation,
                self.latest_generation
            );
            return Ok(false);
        }

        self.store
            .set(&photo_key(&self.user.username), &encoded.data_url)?;
        self.displayed_photo = encoded.data_url;
        tracing::info!("Updated profile photo for {}", self.user.username);
        Ok(true)
    }

    pub async fn select_photo(&mut self, file: PhotoFile) -> Result<(), PhotoError> {
        let pending = self.begin_select(file)?;
        let encoded = pending.encode().await?;
        self.finish_select(encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;

    fn stu1() -> User {
        User {
            username: "stu1".into(),
            role: Role::Student,
            name: "Asha Verma".into(),
            roll_no: "2021EE01".into(),
            department: "Electrical".into(),
            sem: "3".into(),
            year: "2024-25".into(),
            photo: "default.png".into(),
        }
    }

    fn png(len: usize) -> PhotoFile {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        bytes.resize(len, 0);
        PhotoFile::new("image/png", bytes)
    }

    #[test]
    fn photo_file_keeps_only_media_type() {
        let file = PhotoFile::new("image/png; charset=binary", vec![1, 2]);
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.size(), 2);
    }

    fn view_with(store: Arc<MemoryKvStore>) -> ProfileView {
        ProfileView::load(stu1(), store).unwrap()
    }

    #[test]
    fn default_photo_without_stored_entry() {
        let view = view_with(Arc::new(MemoryKvStore::new()));
        assert_eq!(view.displayed_photo(), "default.png");
    }

    #[test]
    fn stored_entry_overrides_default_photo() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("profile_photo_stu1", "data:image/png;base64,AAAA").unwrap();
        let view = view_with(store);
        assert_eq!(view.displayed_photo(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn other_users_entry_is_ignored() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("profile_photo_prof1", "data:image/png;base64,AAAA").unwrap();
        let view = view_with(store);
        assert_eq!(view.displayed_photo(), "default.png");
    }

    #[tokio::test]
    async fn upload_updates_view_and_store() {
        let store = Arc::new(MemoryKvStore::new());
        let mut view = view_with(store.clone());
        let file = png(2048);
        let expected = data_url::encode("image/png", &file.bytes);

        view.select_photo(file).await.unwrap();

        assert_eq!(view.displayed_photo(), expected);
        assert_eq!(store.get("profile_photo_stu1").unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn non_image_is_rejected_without_changes() {
        let store = Arc::new(MemoryKvStore::new());
        let mut view = view_with(store.clone());

        let err = view
            .select_photo(PhotoFile::new("application/pdf", vec![1, 2, 3]))
            .await
            .unwrap_err();

        assert!(matches!(err, PhotoError::NotAnImage(_)));
        assert_eq!(err.notice(), Some(Notice::PhotoType));
        assert_eq!(view.displayed_photo(), "default.png");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn oversized_file_is_rejected_without_changes() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("profile_photo_stu1", "data:image/png;base64,OLD").unwrap();
        let mut view = view_with(store.clone());

        let err = view.select_photo(png(MAX_PHOTO_BYTES + 1)).await.unwrap_err();

        assert!(matches!(err, PhotoError::TooLarge { size } if size == MAX_PHOTO_BYTES + 1));
        assert_eq!(err.notice(), Some(Notice::PhotoSize));
        assert_eq!(view.displayed_photo(), "data:image/png;base64,OLD");
        assert_eq!(
            store.get("profile_photo_stu1").unwrap().as_deref(),
            Some("data:image/png;base64,OLD")
        );
    }

    #[tokio::test]
    async fn oversized_non_image_reports_type_first() {
        let mut view = view_with(Arc::new(MemoryKvStore::new()));
        let err = view
            .select_photo(PhotoFile::new("video/mp4", vec![0; MAX_PHOTO_BYTES + 1]))
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::NotAnImage(_)));
        assert_eq!(view.displayed_photo(), "default.png");
    }

    #[tokio::test]
    async fn exactly_five_mib_is_accepted() {
        let mut view = view_with(Arc::new(MemoryKvStore::new()));
        view.select_photo(png(MAX_PHOTO_BYTES)).await.unwrap();
        assert!(view.displayed_photo().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn newer_selection_supersedes_pending_one() {
        let store = Arc::new(MemoryKvStore::new());
        let mut view = view_with(store.clone());

        let first = view.begin_select(PhotoFile::new("image/png", vec![1])).unwrap();
        let second = view.begin_select(PhotoFile::new("image/jpeg", vec![2])).unwrap();

        let second = second.encode().await.unwrap();
        let first = first.encode().await.unwrap();
        let second_url = second.data_url().to_string();

        assert!(view.finish_select(second).unwrap());
        assert!(!view.finish_select(first).unwrap());
        assert_eq!(view.displayed_photo(), second_url);
        assert_eq!(store.get("profile_photo_stu1").unwrap(), Some(second_url));
    }

    #[tokio::test]
    async fn rejected_selection_does_not_supersede_pending_one() {
        let mut view = view_with(Arc::new(MemoryKvStore::new()));
        let pending = view.begin_select(png(16)).unwrap();
        assert!(view.begin_select(PhotoFile::new("text/plain", vec![])).is_err());

        let encoded = pending.encode().await.unwrap();
        assert!(view.finish_select(encoded).unwrap());
    }

    #[test]
    fn notice_codes_round_trip() {
        for notice in [Notice::PhotoType, Notice::PhotoSize] {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        assert_eq!(Notice::from_code("other"), None);
        assert_eq!(Notice::PhotoSize.message(), "Image size should be less than 5MB.");
    }
}
