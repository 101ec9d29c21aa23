//! Tagger input ("premorph" XML).
//!
//! The tagger keeps paragraph structure when each paragraph is sent as its
//! own chunk:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <chunkList><chunk type="p" id="p1">First paragraph.</chunk></chunkList>
//! ```

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{DocumentError, DocumentResult};

/// Split plain text into paragraphs, one per non-empty line.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Build premorph XML with one `p` chunk per paragraph, numbered from 1.
pub fn compose_premorph<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<chunkList>");
    for (i, paragraph) in paragraphs.iter().enumerate() {
        xml.push_str(&format!("<chunk type=\"p\" id=\"p{}\">", i + 1));
        xml.push_str(&quick_xml::escape::escape(paragraph.as_ref()));
        xml.push_str("</chunk>");
    }
    xml.push_str("</chunkList>\n");
    xml
}

/// Collect the text of every `para` element of a DocBook document.
///
/// Markup nested inside a `para` is flattened to its text.
///
/// # Errors
///
/// [`DocumentError::Xml`] when the document is not well-formed.
pub fn docbook_paragraphs(xml: &str) -> DocumentResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let xml_error = |position: u64, err: &dyn std::fmt::Display| DocumentError::Xml {
        position,
        message: err.to_string(),
    };

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut nesting = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"para" => {
                nesting += 1;
                current.get_or_insert_with(String::new);
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"para" => {
                nesting = nesting.saturating_sub(1);
                if nesting == 0
                    && let Some(text) = current.take()
                {
                    paragraphs.push(text.trim().to_string());
                }
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"para" && nesting == 0 => {
                paragraphs.push(String::new());
            }
            Ok(Event::Text(e)) => {
                if let Some(text) = current.as_mut() {
                    let decoded = e
                        .decode()
                        .map_err(|err| xml_error(reader.buffer_position(), &err))?;
                    text.push_str(&decoded);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(text) = current.as_mut() {
                    let name = e
                        .decode()
                        .map_err(|err| xml_error(reader.buffer_position(), &err))?;
                    let entity = format!("&{name};");
                    let resolved = quick_xml::escape::unescape(&entity)
                        .map_err(|err| xml_error(reader.buffer_position(), &err))?;
                    text.push_str(&resolved);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(xml_error(reader.error_position(), &err)),
        }
    }

    Ok(paragraphs)
}
