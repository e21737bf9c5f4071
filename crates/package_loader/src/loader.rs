use std::path::Path;

use medulla_core::decision::DecisionPackageData;

/// A deserialization backend for one file format.
pub trait PackageLoaderBackend: Send + Sync + 'static {
    /// What type does the backend return on a parse error.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Must be able to load from a byte array.
    fn from_slice(v: &[u8]) -> core::result::Result<DecisionPackageData, Self::Error>;

    /// What extensions should be read for this (by default)?
    fn extensions() -> &'static [&'static str] {
        &[]
    }
}

#[cfg(any(feature = "json_support", test))]
pub mod json_support {
    use super::{DecisionPackageData, PackageLoaderBackend};

    #[derive(Default)]
    pub struct JsonPackageLoader;

    impl PackageLoaderBackend for JsonPackageLoader {
        type Error = serde_json::Error;

        fn from_slice(v: &[u8]) -> core::result::Result<DecisionPackageData, Self::Error> {
            serde_json::from_slice(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["json"]
        }
    }
}

#[cfg(feature = "toml_support")]
pub mod toml_support {
    use super::{DecisionPackageData, PackageLoaderBackend};

    #[derive(Default)]
    pub struct TomlPackageLoader;

    impl PackageLoaderBackend for TomlPackageLoader {
        type Error = toml::de::Error;

        fn from_slice(v: &[u8]) -> core::result::Result<DecisionPackageData, Self::Error> {
            toml::from_slice(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["toml"]
        }
    }
}

#[cfg(any(feature = "ron_support", test))]
pub mod ron_support {
    use super::{DecisionPackageData, PackageLoaderBackend};

    #[derive(Default)]
    pub struct RonPackageLoader;

    impl PackageLoaderBackend for RonPackageLoader {
        type Error = ron::de::SpannedError;

        fn from_slice(v: &[u8]) -> core::result::Result<DecisionPackageData, Self::Error> {
            ron::de::from_bytes(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["ron"]
        }
    }
}

/// A failure to load package data from disk.
#[derive(Debug, thiserror::Error)]
pub enum PackageLoadError {
    #[error("could not read package file '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no enabled loader backend handles extension {0:?}")]
    UnsupportedExtension(Option<String>),

    #[error("could not parse package data")]
    Parse(#[source] Box<dyn core::error::Error + Send + Sync + 'static>),
}

/// Parses package data from an in-memory byte slice with a given backend.
pub fn load_slice<B: PackageLoaderBackend>(
    bytes: &[u8],
) -> Result<DecisionPackageData, PackageLoadError> {
    B::from_slice(bytes).map_err(|err| {
        #[cfg(feature = "logging")]
        tracing::error!("package parse error: {err:?}");
        PackageLoadError::Parse(err.into())
    })
}

/// Reads one package file with a given backend.
pub fn load_path_with<B: PackageLoaderBackend>(
    path: impl AsRef<Path>,
) -> Result<DecisionPackageData, PackageLoadError> {
    let path = path.as_ref();
    #[cfg(feature = "logging")]
    tracing::info!("reading decision package from {}", path.display());
    let bytes = std::fs::read(path).map_err(|source| PackageLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_slice::<B>(&bytes)
}

/// Reads a package file from disk, picking the backend by file extension
/// among the formats compiled in.
pub fn load_path(path: impl AsRef<Path>) -> Result<DecisionPackageData, PackageLoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    #[cfg(feature = "json_support")]
    if extension
        .as_deref()
        .is_some_and(|ext| json_support::JsonPackageLoader::extensions().contains(&ext))
    {
        return load_path_with::<json_support::JsonPackageLoader>(path);
    }

    #[cfg(feature = "ron_support")]
    if extension
        .as_deref()
        .is_some_and(|ext| ron_support::RonPackageLoader::extensions().contains(&ext))
    {
        return load_path_with::<ron_support::RonPackageLoader>(path);
    }

    #[cfg(feature = "toml_support")]
    if extension
        .as_deref()
        .is_some_and(|ext| toml_support::TomlPackageLoader::extensions().contains(&ext))
    {
        return load_path_with::<toml_support::TomlPackageLoader>(path);
    }

    Err(PackageLoadError::UnsupportedExtension(extension))
}
