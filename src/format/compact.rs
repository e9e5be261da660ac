use indexmap::IndexMap;
use itertools::Itertools;

use crate::data::{FieldData, MethodData};
use crate::errors::{SrgError, NameKind};
use crate::mappings::{Mappings, SimpleMappings, FrozenMappings};
use crate::signature::MethodSignature;
use crate::types::JavaType;
use crate::utils::is_valid_identifier;
use super::{LineProcessor, MappingsFormat};

/// The compact srg format, where the kind of each line is given by its number of arguments.
///
/// ```text
/// obf4 net/techcable/minecraft/Player
/// obf4 a dead
/// obfs a (Lobf4;ID)Z isHacking
/// ```
///
/// Members only carry their new name,
/// so their renamed types are taken from the class lines.
#[derive(Copy, Clone, Debug, Default)]
pub struct CompactSrgMappingsFormat;
impl MappingsFormat for CompactSrgMappingsFormat {
    type Processor = CompactSrgLineProcessor;

    fn to_lines<M: Mappings + ?Sized>(mappings: &M) -> Vec<String> {
        let classes = mappings.classes()
            .map(|(original, renamed)| format!(
                "{} {}",
                original.internal_name(),
                renamed.internal_name()
            ))
            .sorted();
        let fields = mappings.fields()
            .map(|(original, renamed)| format!(
                "{} {} {}",
                original.declaring_type().internal_name(),
                original.name(),
                renamed.name()
            ))
            .sorted();
        let methods = mappings.methods()
            .map(|(original, renamed)| format!(
                "{} {} {} {}",
                original.declaring_type().internal_name(),
                original.name(),
                original.signature().descriptor(),
                renamed.name()
            ))
            .sorted();
        classes.chain(fields).chain(methods).collect()
    }
}

/// Members are queued until every class is known,
/// since their renamed types depend on the class lines.
#[derive(Default)]
pub struct CompactSrgLineProcessor {
    result: SimpleMappings,
    fields: IndexMap<FieldData, String>,
    methods: IndexMap<MethodData, String>,
}
impl LineProcessor for CompactSrgLineProcessor {
    fn process_line(&mut self, line: &str) -> Result<(), SrgError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(())
        }
        let args = line.split_whitespace().collect::<Vec<&str>>();
        match args.len() {
            2 => {
                self.result.insert_class(
                    JavaType::from_internal_name(args[0])?,
                    JavaType::from_internal_name(args[1])?
                )?;
            },
            3 => {
                let original = FieldData::new(JavaType::from_internal_name(args[0])?, args[1])?;
                self.fields.insert(original, checked_name(args[2])?);
            },
            4 => {
                let signature = MethodSignature::from_descriptor(args[2])?;
                let original = MethodData::new(JavaType::from_internal_name(args[0])?, args[1], signature)?;
                self.methods.insert(original, checked_name(args[3])?);
            },
            _ => return Err(SrgError::invalid_line(line, "expected between 2 and 4 arguments"))
        }
        Ok(())
    }
    fn finish(self) -> FrozenMappings {
        let CompactSrgLineProcessor { mut result, fields, methods } = self;
        for (original, name) in fields {
            let renamed = FieldData::new_unchecked(result.get_class(original.declaring_type()), name);
            result.insert_field(original, renamed);
        }
        for (original, name) in methods {
            let remapped = original.map_types(|t| result.get_class(t));
            let renamed = MethodData::new_unchecked(
                remapped.declaring_type().clone(),
                name,
                remapped.signature().clone()
            );
            result.insert_method(original, renamed);
        }
        result.frozen()
    }
}

fn checked_name(name: &str) -> Result<String, SrgError> {
    if is_valid_identifier(name) {
        Ok(name.into())
    } else {
        Err(SrgError::invalid_name(NameKind::Identifier, name))
    }
}
