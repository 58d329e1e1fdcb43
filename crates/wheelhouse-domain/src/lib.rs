#![deny(clippy::all, warnings)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod config;
pub mod constraints;
pub mod python;
pub mod spec;

pub use config::{MatrixConfig, PackageConfig, PythonSpec, VersionConfig, WheelTarget};
pub use constraints::constraints_for;
pub use python::{PythonTag, PythonVersion, TagError};
pub use spec::BuildSpec;
