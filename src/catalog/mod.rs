//! Stock model photos: the immutable catalog, the key selector and the
//! downloader that fetches the selected photo.
pub mod fetch;
pub mod selector;

pub use fetch::{FetchedImage, HttpImageSource, ImageSource};
pub use selector::{Selection, StockModelCatalog, DEFAULT_KEY};
