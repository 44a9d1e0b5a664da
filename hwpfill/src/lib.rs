//! hwpfill - placeholder filling for HWP document trees
//!
//! Replaces `${key}` tokens in the paragraphs of a parsed HWP document
//! (table cells included) while keeping each paragraph's run sequence,
//! character count, style ranges and layout cache consistent.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod codec;
pub mod document_model;
pub mod fill_config;
pub mod pipeline;
pub mod placeholder;
pub mod substitution;
pub mod walker;

pub use codec::{codec_for_path, CodecError, DocumentCodec, JsonCodec};
pub use document_model::Document;
pub use pipeline::{fill_template, FillError};
pub use placeholder::{PlaceholderMap, PlaceholderValue};
pub use walker::{collect_keys, fill_document, FillReport};
