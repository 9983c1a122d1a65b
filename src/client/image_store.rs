use url::Url;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A validated image ready for upload
#[derive(Debug)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub original_name: String,
}

/// Object-storage contract for client images. The storage mechanism itself
/// lives outside this service; implementations only need to return a public
/// URL for the stored object.
#[async_trait::async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> anyhow::Result<Url>;
}

/// Used when no object storage is configured; every upload fails and callers
/// fall back to the generated avatar URL.
#[derive(Debug, Default)]
pub struct UnconfiguredImageStore;

#[async_trait::async_trait]
impl ImageStore for UnconfiguredImageStore {
    async fn upload(&self, image: &ImageUpload, folder: &str) -> anyhow::Result<Url> {
        anyhow::bail!(
            "No image store configured; cannot upload {} to {}",
            image.original_name,
            folder
        )
    }
}

/// Check size and sniff the content type from magic bytes (the client-sent
/// MIME header is not trusted). JPEG, PNG and WebP only.
pub fn validate_image(bytes: Vec<u8>, original_name: &str) -> Result<ImageUpload, String> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(format!(
            "Image exceeds the {}MB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        ));
    }
    if !is_supported_image(&bytes) {
        return Err("Unsupported image type; use JPEG, PNG or WebP".into());
    }
    Ok(ImageUpload {
        bytes,
        original_name: original_name.to_string(),
    })
}

fn is_supported_image(bytes: &[u8]) -> bool {
    let jpeg = bytes.starts_with(&[0xFF, 0xD8, 0xFF]);
    let png = bytes.starts_with(&[0x89, b'P', b'N', b'G']);
    let webp = bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP";
    jpeg || png || webp
}
