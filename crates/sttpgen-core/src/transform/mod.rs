pub mod codecs;
pub mod defaults;
pub mod formatters;
pub mod identifier;
pub mod imports;
pub mod lower;
pub mod names;
pub mod path_template;
pub mod security;
pub mod type_mapper;

pub use lower::{DEFAULT_GROUP, lower};
