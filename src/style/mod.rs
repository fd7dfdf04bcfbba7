//! Style payload primitives.
//!
//! This module provides:
//!
//! - [`PropertyMap`]: The property mapping exchanged with the engine
//! - [`parse_property_map`]: Lenient decoding of engine responses
//! - [`split_class_list`]: Tokenizing a class-list string
//! - [`PayloadError`]: Errors from decoding a response

mod error;
mod props;

pub use error::PayloadError;
pub use props::{parse_property_map, split_class_list, PropertyMap};

pub(crate) use props::json_kind;
