//! Pure naming rules for stored images: extension checks, sanitization and
//! collision-resistant generated names. Nothing here touches the filesystem.

use rand::Rng;
use uuid::Uuid;

use crate::media::application::domain::entities::ImageType;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
const PROFILE_EXTRA_EXTENSIONS: &[&str] = &["webp"];
const MAX_BASE_LEN: usize = 64;
const FALLBACK_BASE: &str = "image";

/// Last path segment, accepting both `/` and `\` as separators.
pub fn final_segment(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Lower-cased extension of the final segment. A leading-dot name such as
/// `.png` has no extension.
pub fn extension_of(filename: &str) -> Option<String> {
    let segment = final_segment(filename);
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn is_allowed_extension(filename: &str, image_type: ImageType) -> bool {
    let Some(ext) = extension_of(filename) else {
        return false;
    };
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
        || (image_type.is_profile() && PROFILE_EXTRA_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a client-supplied name (without extension) to `[A-Za-z0-9._-]`.
pub fn sanitize_base(raw: &str) -> String {
    let mut cleaned: String = final_segment(raw)
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('_')
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", ".");
    }

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    let capped: String = trimmed.chars().take(MAX_BASE_LEN).collect();
    let capped = capped.trim_end_matches(|c| c == '.' || c == '_');

    if capped.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        capped.to_string()
    }
}

/// `{type}[_{entity}]_{base}_{8 hex}.{ext}`; the caller validates the extension first.
pub fn generate_name(original: &str, image_type: ImageType, entity_id: Option<Uuid>) -> String {
    let segment = final_segment(original);
    let (stem, ext) = match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext.to_ascii_lowercase()),
        _ => (segment, String::new()),
    };

    let base = sanitize_base(stem);
    let suffix: u32 = rand::thread_rng().gen();

    let mut name = image_type.as_str().to_string();
    if let Some(entity) = entity_id {
        name.push('_');
        name.push_str(&entity.simple().to_string());
    }
    name.push_str(&format!("_{base}_{suffix:08x}"));
    if !ext.is_empty() {
        name.push('.');
        name.push_str(&ext);
    }
    name
}

/// MIME type from the extension alone.
pub fn mime_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
