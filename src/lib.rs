//! folder-art: folder icon previews for macOS icon sets
//!
//! This crate composites a user-supplied icon onto folder template images at
//! every resolution of a macOS `.iconset` and writes the PNGs to disk.
//!
//! # Example
//!
//! ```no_run
//! use folder_art::{FolderArtGenerator, FormData, RenderConfig, StorageConfig, Theme, UploadedFile};
//!
//! # async fn run(png: Vec<u8>) -> folder_art::Result<()> {
//! let generator = FolderArtGenerator::new(StorageConfig::new("/srv/art", "/srv/art/assets"));
//!
//! let form = FormData::new().file("file", UploadedFile::new(png).with_file_name("logo.png"));
//! let config = RenderConfig::new().with_theme(Theme::Dark);
//!
//! let set = generator.generate(&form, &config).await?;
//! println!("wrote {}", set.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Rendering Without I/O
//!
//! [`render_resolution`] runs one resolution of the pipeline on in-memory
//! bitmaps, which is handy for previews:
//!
//! ```
//! use folder_art::{render_resolution, RenderConfig, Resolution};
//! use image::{Rgba, RgbaImage};
//!
//! let icon = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
//! let folder = RgbaImage::from_pixel(128, 128, Rgba([80, 160, 240, 255]));
//!
//! let png = render_resolution(&icon, &folder, Resolution::Icon128, &RenderConfig::new()).unwrap();
//! assert!(png.starts_with(b"\x89PNG"));
//! ```

mod config;
pub mod draw;
mod error;
mod form;
mod geometry;
mod layout;
mod loader;
mod pipeline;
mod resolution;
mod storage;

pub use config::{
    FillSettings, MAX_SHADOW_BLUR, MAX_SHADOW_OFFSET, RenderConfig, ShadowSettings, Theme,
    TintSettings, parse_hex_color,
};
pub use draw::{render_composite, render_icon};
pub use error::{Error, Result};
pub use form::{FormData, FormField, IconSource, UploadedFile};
pub use geometry::{RectPx, SizePx, content_bounds};
pub use layout::{icon_dimensions, icon_position, layout};
pub use loader::{SVG_RASTER_SIZE, decode_image, load_folder_image, load_icon_image};
pub use pipeline::{FILE_FIELD, FolderArtGenerator, GeneratedSet, generate_folder_art, render_resolution};
pub use resolution::Resolution;
pub use storage::{
    AssetStore, ICONSET_SUFFIX, MAX_ID_ATTEMPTS, OutputDir, RESULTS_DIR, SetId, StorageConfig,
    completed_path,
};
