use crate::error::ImageLoadError;
use kornia_image::{Image, ImageSize, allocator::CpuAllocator};
use std::path::{Path, PathBuf};

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Where the input image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// An http(s) url to fetch the image bytes from.
    Url(String),
    /// An existing file on the local filesystem.
    Path(PathBuf),
}

impl ImageSource {
    /// Classifies a raw source string.
    ///
    /// Strings starting with `http://` or `https://` are urls; anything else must
    /// name an existing local file.
    pub fn parse(source: &str) -> Result<Self, ImageLoadError> {
        if URL_SCHEMES.iter().any(|scheme| source.starts_with(scheme)) {
            Ok(ImageSource::Url(source.to_string()))
        } else if Path::new(source).exists() {
            Ok(ImageSource::Path(PathBuf::from(source)))
        } else {
            Err(ImageLoadError::NotFound(source.to_string()))
        }
    }

    /// Fetches or reads the image and decodes it to rgb8.
    pub fn load(&self) -> Result<Image<u8, 3, CpuAllocator>, ImageLoadError> {
        match self {
            ImageSource::Url(url) => {
                log::info!("Downloading image from URL: {url}");
                let bytes = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
                log::debug!("Downloaded {} bytes", bytes.len());
                decode_image_bytes_rgb8(&bytes)
            }
            ImageSource::Path(path) => {
                log::info!("Loading image from local path: {}", path.display());
                read_image_rgb8(path)
            }
        }
    }
}

/// Resolves `source` and decodes the image it points to.
pub fn load_image(source: &str) -> Result<Image<u8, 3, CpuAllocator>, ImageLoadError> {
    ImageSource::parse(source)?.load()
}

/// Decodes an encoded image of any supported format, flattening it to rgb8.
pub fn decode_image_bytes_rgb8(bytes: &[u8]) -> Result<Image<u8, 3, CpuAllocator>, ImageLoadError> {
    into_kornia_rgb8(image::load_from_memory(bytes)?.to_rgb8())
}

fn read_image_rgb8(path: &Path) -> Result<Image<u8, 3, CpuAllocator>, ImageLoadError> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    if is_jpeg {
        return Ok(kornia_io::jpeg::read_image_jpeg_rgb8(path)?);
    }

    // alpha, palette and grayscale files are all converted to rgb8
    into_kornia_rgb8(image::open(path)?.to_rgb8())
}

fn into_kornia_rgb8(rgb: image::RgbImage) -> Result<Image<u8, 3, CpuAllocator>, ImageLoadError> {
    let (width, height) = rgb.dimensions();
    let size = ImageSize {
        width: width as usize,
        height: height as usize,
    };
    Ok(Image::new(size, rgb.into_raw(), CpuAllocator)?)
}
