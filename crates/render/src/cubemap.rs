use std::path::{Path, PathBuf};

use image::RgbaImage;
use skyview_common::{CubeFace, SkyboxVariant};

/// Errors raised while loading the six faces of a skybox.
#[derive(Debug, thiserror::Error)]
pub enum TextureLoadError {
    #[error("a cubemap needs exactly {expected} face images, got {found}")]
    FaceCount { expected: usize, found: usize },
    #[error("failed to read face image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode face image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{face:?} face is not square ({width}x{height})")]
    NotSquare {
        face: CubeFace,
        width: u32,
        height: u32,
    },
    #[error("{face:?} face is {found}px wide but the front face is {expected}px")]
    SizeMismatch {
        face: CubeFace,
        expected: u32,
        found: u32,
    },
}

/// Decoded RGBA8 pixels for the six faces of one skybox.
#[derive(Debug, Clone)]
pub struct CubemapImages {
    faces: Vec<RgbaImage>,
    size: u32,
}

impl CubemapImages {
    /// Decode six face images, given in [`CubeFace::ALL`] order.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, TextureLoadError> {
        check_count(paths.len())?;
        let faces = paths
            .iter()
            .map(|p| decode_face(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let images = Self::from_images(faces)?;
        tracing::debug!(size = images.size, "decoded cubemap faces");
        Ok(images)
    }

    /// Validate already-decoded faces: six of them, square, all one size.
    pub fn from_images(faces: Vec<RgbaImage>) -> Result<Self, TextureLoadError> {
        check_count(faces.len())?;
        let size = faces[0].width();
        for (face, img) in CubeFace::ALL.into_iter().zip(&faces) {
            if img.width() != img.height() {
                return Err(TextureLoadError::NotSquare {
                    face,
                    width: img.width(),
                    height: img.height(),
                });
            }
            if img.width() != size {
                return Err(TextureLoadError::SizeMismatch {
                    face,
                    expected: size,
                    found: img.width(),
                });
            }
        }
        Ok(Self { faces, size })
    }

    /// Edge length of every face, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn face(&self, face: CubeFace) -> &RgbaImage {
        &self.faces[face.layer() as usize]
    }

    pub fn faces(&self) -> impl Iterator<Item = (CubeFace, &RgbaImage)> {
        CubeFace::ALL.into_iter().zip(self.faces.iter())
    }
}

/// Face image paths for `variant` under `root`, in face order.
///
/// Layout is `<root>/<variant>/<face>.<extension>`.
pub fn face_paths(root: &Path, variant: SkyboxVariant, extension: &str) -> Vec<PathBuf> {
    let dir = root.join(variant.dir_name());
    CubeFace::ALL
        .iter()
        .map(|face| dir.join(face.file_stem()).with_extension(extension))
        .collect()
}

fn check_count(found: usize) -> Result<(), TextureLoadError> {
    if found != CubeFace::COUNT {
        return Err(TextureLoadError::FaceCount {
            expected: CubeFace::COUNT,
            found,
        });
    }
    Ok(())
}

fn decode_face(path: &Path) -> Result<RgbaImage, TextureLoadError> {
    let io_err = |source| TextureLoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    // Extension picks the decoder; TGA has no magic bytes to sniff.
    let reader = image::ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    let img = reader.decode().map_err(|source| TextureLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}
