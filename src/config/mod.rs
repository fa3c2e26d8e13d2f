//! Tracked package list and path configuration for gm.
//!
//! - Path resolution (overrides, user defaults, bundled fallback) in [`paths`]
//! - Loading, normalizing and editing the package list in [`packages`]
//!
//! # Example
//!
//! ```
//! use gm::config::{load_packages_for_editing, write_packages, Paths};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let list = temp.path().join("packages.json");
//! let paths = Paths::new(&list, vec![list.clone()], temp.path().join("status.json"));
//!
//! write_packages(&list, &["typescript", " typescript ", "eslint"]).unwrap();
//! let editable = load_packages_for_editing(&paths).unwrap();
//! assert_eq!(editable.packages, vec!["typescript", "eslint"]);
//! ```
//!
//! # File Locations
//!
//! The package list is read from the first usable candidate:
//! 1. `--config` / `GM_CONFIG`
//! 2. `~/.config/gm/packages.json`
//! 3. `config/packages.json` under the installation prefix
//!
//! The status cache lives at `--cache` / `GM_CACHE`, else
//! `~/.cache/gm/status.json`.

pub mod packages;
pub mod paths;

pub use packages::{
    load_packages, load_packages_for_editing, normalize_names, normalize_package_list,
    write_packages, EditablePackages,
};
pub use paths::{
    bundled_config_path, default_cache_path, default_config_path, Paths, CACHE_ENV, CONFIG_ENV,
};
