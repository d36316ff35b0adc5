use crate::construct::{Attachment, ContentNode};
use crate::element::Element;
use crate::error::Result;
use crate::journal::ReadingJournal;
use crate::settings::ReaderConfig;

use super::{section_failure, SectionDecoder};

// Payloads are kept as written; writing files is up to the consumer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttachmentDecoder;

impl SectionDecoder for AttachmentDecoder {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        _journal: &mut ReadingJournal,
        _config: &ReaderConfig,
    ) -> Result<()> {
        for attachment in element.children_named("attachment") {
            let name = attachment
                .attribute("name")
                .filter(|n| !n.is_empty())
                .ok_or_else(|| section_failure("attachments", "<attachment> without a name"))?;
            let optional = |attribute: &str| {
                attachment
                    .attribute(attribute)
                    .filter(|v| !v.is_empty())
                    .map(str::to_owned)
            };
            node.fields.attachments.push(Attachment {
                name: name.to_owned(),
                url: optional("url"),
                mime_type: optional("mimeType"),
                encoding: optional("encoding"),
                payload: attachment
                    .text_content()
                    .filter(|p| !p.trim().is_empty())
                    .map(str::to_owned),
            });
        }
        Ok(())
    }
}
