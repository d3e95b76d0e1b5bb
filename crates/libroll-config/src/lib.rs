//! Package descriptor and transform config discovery for libroll.
//!
//! Everything here is a short lookup against the package root: the nearest
//! `package.json`, the `.babelrc` family, and the dependency names that stay
//! external in the bundle.

pub mod discovery;
pub mod error;
pub mod external;
pub mod package;
pub mod transform;

pub use discovery::{CANDIDATES, load_config, try_candidate};
pub use error::{ConfigError, Result};
pub use external::collect_external;
pub use package::{PACKAGE_JSON, PackageMetadata, find_package_root, load_package};
pub use transform::{ConfigSource, TransformConfig};
