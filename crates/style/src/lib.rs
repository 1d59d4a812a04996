//! Jotstyle Style Engine
//!
//! Turns flat style props into atomic CSS rules and a stable class name.
//!
//! ```text
//! { color: "red", hoverColor: "blue" }
//!     -> "_j1x2y3z"
//!     -> ._j1x2y3z {color:red;}
//!        ._j1x2y3z:hover {color:blue;}
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod registry;
pub mod request;

pub use aggregate::{aggregate, StyleKeys};
pub use classify::{PrefixClassification, PropClassifier, PSEUDOCLASSES, PSEUDOELEMENTS};
pub use config::{Mode, RegistryConfig, DEFAULT_CLASS_PREFIX, MODE_ENV_VAR};
pub use error::{StyleError, StyleResult};
pub use registry::{CacheSnapshot, ClassNameRegistry};
pub use request::{is_reserved, StyleRequest, RESERVED_KEYS};
