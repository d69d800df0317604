//! typedjinja syntax — the annotation sub-language embedded in Jinja templates.
//!
//! Two comment blocks are recognized inside an otherwise opaque template:
//!
//! - `{# @types ... #}` — imports and `name: type` annotations, see [`types`]
//! - `{# @typedmacro ... #}` — callable signatures, see [`macros`]
//!
//! The parsed annotations render into a flat `.pyi` stub ([`stub`]) that an
//! external code-intelligence engine can analyze.

pub mod error;
pub mod lines;
pub mod macros;
pub mod model;
pub mod stub;
pub mod types;

pub use error::StubError;
pub use lines::split_lines;
pub use macros::parse_macro_blocks;
pub use model::{Annotations, MacroSignature, StubEntry, TypesBlock};
pub use stub::{generate_stub, lookup, parse_stub, render_template, write_stub};
pub use types::{extract_type_annotations, parse_types_block};
