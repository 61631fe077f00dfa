use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Directory every stored image is written into, flat.
    pub upload_root: PathBuf,
    /// Prefix the generated file name is appended to when building `file_url`.
    pub public_url_prefix: String,
    pub max_file_size_bytes: u64,
    /// Active project/blog images allowed per entity.
    pub max_images_per_entity: u64,
}

impl UploadPolicy {
    pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
    pub const MAX_IMAGES_PER_ENTITY: u64 = 20;

    pub fn new(upload_root: impl Into<PathBuf>) -> Self {
        Self {
            upload_root: upload_root.into(),
            public_url_prefix: "/static/uploads".to_string(),
            max_file_size_bytes: Self::DEFAULT_MAX_FILE_SIZE_BYTES,
            max_images_per_entity: Self::MAX_IMAGES_PER_ENTITY,
        }
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_url_prefix.trim_end_matches('/'), file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_with_single_slash() {
        let mut policy = UploadPolicy::new("/tmp/uploads");
        assert_eq!(policy.public_url("a.png"), "/static/uploads/a.png");

        policy.public_url_prefix = "https://cdn.example.com/img/".into();
        assert_eq!(policy.public_url("a.png"), "https://cdn.example.com/img/a.png");
    }
}
