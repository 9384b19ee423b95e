//! External services used by the listing workflow: S3 photo storage and
//! Nominatim address geocoding.
//!
//! Both sit behind object-safe traits so the API can swap in the in-memory
//! implementations under test.

pub mod geocoding;
pub mod storage;

pub use geocoding::{AddressQuery, FixedGeocoder, Geocoder, NominatimConfig, NominatimGeocoder};
pub use storage::{MemoryPhotoStore, PhotoStore, PhotoUpload, S3Config, S3PhotoStore, StorageError};
