//! Themed style objects and their light/dark resolution.
//!
//! A themed style is an ordinary host style object with up to four extra
//! dark-override keys layered on top:
//!
//! | override key    | base property     |
//! |-----------------|-------------------|
//! | `backgroundDark`| `backgroundColor` |
//! | `borderDark`    | `borderColor`     |
//! | `colorDark`     | `color`           |
//! | `tintColorDark` | `tintColor`       |
//!
//! ## How Merging Works
//!
//! When resolving in Dark mode:
//! 1. Copy every non-override property
//! 2. For each override holding a truthy value, write it onto the base property
//! 3. Drop the override keys
//!
//! Light mode stops after step 1 and drops the override keys. A dark-only block
//! with no light value therefore resolves to no value at all in light mode.

mod error;
mod keys;
mod resolve;
mod sheet;
mod value;

pub use error::StyleError;
pub use keys::OverrideKey;
pub use resolve::{is_themed_style, resolve, try_resolve};
pub use sheet::NamedStyles;
pub use value::{is_truthy, PlainStyle, ThemedStyle};

pub(crate) use value::json_kind;
