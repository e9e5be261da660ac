//! Java obfuscation mappings.
//!
//! Mappings rename classes, fields and methods from their original (usually obfuscated) names
//! into new ones. They can be parsed from and written to the srg formats,
//! inverted, chained together and moved between packages.
//!
//! ```
//! use srglib::prelude::*;
//!
//! let classes = CompactSrgMappingsFormat::parse_lines(vec!["aa Entity", "ab Cow"]).unwrap();
//! let fields = SrgMappingsFormat::parse_lines(vec!["FD: Entity/a Entity/dead"]).unwrap();
//! let chained = classes.chain(&fields);
//! let field = FieldData::from_internal_name("aa/a").unwrap();
//! assert_eq!("Entity/dead", chained.get_field(&field).internal_name());
//! ```
pub mod errors;
pub mod types;
pub mod signature;
pub mod data;
pub mod mappings;
pub mod format;
mod utils;

pub use crate::utils::{is_valid_identifier, is_valid_type_name, is_valid_package};

pub mod prelude {
    pub use crate::errors::{SrgError, ParseError};
    pub use crate::types::{JavaType, PrimitiveType, ReferenceType};
    pub use crate::signature::MethodSignature;
    pub use crate::data::{FieldData, MethodData};
    pub use crate::mappings::{
        Mappings, SimpleMappings, FrozenMappings, MappingsChain,
        RenamingMappings, PackageMappings
    };
    pub use crate::format::{MappingsFormat, SrgMappingsFormat, CompactSrgMappingsFormat, FormatKind};
}
