use crate::construct::ContentNode;
use crate::element::Element;
use crate::error::Result;
use crate::journal::ReadingJournal;
use crate::settings::ReaderConfig;

use super::{section_failure, SectionDecoder};

/// Roles allowed to read the item. An item without this section is open to
/// everyone.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationDecoder;

impl SectionDecoder for AuthorizationDecoder {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        _journal: &mut ReadingJournal,
        _config: &ReaderConfig,
    ) -> Result<()> {
        for role in element.children_named("role") {
            let name = role
                .text_content()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| section_failure("authorizations", "empty <role>"))?;
            if !node.fields.authorized_roles.iter().any(|r| r == name) {
                node.fields.authorized_roles.push(name.to_owned());
            }
        }
        Ok(())
    }
}
