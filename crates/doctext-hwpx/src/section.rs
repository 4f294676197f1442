//! Paragraph walk over an HWPX section part.
//!
//! A section part looks like:
//! ```xml
//! <hs:sec xmlns:hs="http://www.hancom.co.kr/hwpml/2011/section">
//!   <hs:p>
//!     <hs:run><hs:t>Hello, </hs:t></hs:run>
//!     <hs:run><hs:t>world!</hs:t></hs:run>
//!   </hs:p>
//! </hs:sec>
//! ```
//!
//! Only `p` and `t` elements bound to [`SECTION_NS`] are selected; prefixes
//! are irrelevant, the resolved namespace URI is what counts.
//!
//! Selection is by descendant: a paragraph nested in another (table cells)
//! is its own line, and its runs also count toward every enclosing paragraph.
//! A run contributes only its leading text, the text before its first child
//! element.

use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};

use crate::HwpxError;

/// Namespace URI paragraphs and text runs are matched against.
pub const SECTION_NS: &str = "http://www.hancom.co.kr/hwpml/2011/section";

enum Node {
    Paragraph,
    Run,
    Other,
}

/// Parse section XML into its paragraph strings, in document order.
///
/// The document must be well formed: every prefix bound, a single root
/// element, nothing but whitespace and markup outside it. The root element
/// itself is never selected as a paragraph.
pub fn section_paragraphs(xml: &[u8]) -> Result<Vec<String>, HwpxError> {
    let mut reader = NsReader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs: Vec<String> = Vec::new();
    // Indices into `paragraphs` for every paragraph still open
    let mut open: Vec<usize> = Vec::new();
    let mut stack: Vec<Node> = Vec::new();
    let mut seen_root = false;
    let mut root_closed = false;
    // True between a run's start tag and its first child or end tag
    let mut in_leading_text = false;

    loop {
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| HwpxError::MalformedXml(e.to_string()))?;
        let in_section = match ns {
            ResolveResult::Bound(Namespace(uri)) => uri == SECTION_NS.as_bytes(),
            ResolveResult::Unknown(prefix) => {
                return Err(unbound_prefix(&prefix));
            }
            ResolveResult::Unbound => false,
        };

        match event {
            Event::Start(ref e) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                check_attribute_prefixes(&reader, e)?;
                seen_root = true;
                in_leading_text = false;
                let is_root = stack.is_empty();
                let node = match e.local_name().as_ref() {
                    b"p" if in_section && !is_root => {
                        open.push(paragraphs.len());
                        paragraphs.push(String::new());
                        Node::Paragraph
                    }
                    b"t" if in_section => {
                        in_leading_text = true;
                        Node::Run
                    }
                    _ => Node::Other,
                };
                stack.push(node);
            }
            Event::Empty(ref e) => {
                if root_closed {
                    return Err(junk_after_root());
                }
                check_attribute_prefixes(&reader, e)?;
                seen_root = true;
                in_leading_text = false;
                if stack.is_empty() {
                    root_closed = true;
                } else if in_section && e.local_name().as_ref() == b"p" {
                    paragraphs.push(String::new());
                }
            }
            Event::End(_) => {
                in_leading_text = false;
                if let Some(Node::Paragraph) = stack.pop() {
                    open.pop();
                }
                if stack.is_empty() {
                    root_closed = true;
                }
            }
            Event::Text(ref e) if stack.is_empty() => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(if root_closed {
                        junk_after_root()
                    } else {
                        HwpxError::MalformedXml("text before document element".to_string())
                    });
                }
            }
            Event::CData(_) if stack.is_empty() => {
                return Err(HwpxError::MalformedXml(
                    "CDATA outside document element".to_string(),
                ));
            }
            Event::Text(ref e) if in_leading_text => {
                let text = e
                    .unescape()
                    .map_err(|e| HwpxError::MalformedXml(e.to_string()))?;
                append_to_open(&mut paragraphs, &open, &text);
            }
            Event::CData(ref e) if in_leading_text => {
                let text = String::from_utf8_lossy(e);
                append_to_open(&mut paragraphs, &open, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(HwpxError::MalformedXml("no element found".to_string()));
    }
    if !stack.is_empty() {
        return Err(HwpxError::MalformedXml(format!(
            "unexpected end of document with {} unclosed element(s)",
            stack.len()
        )));
    }

    tracing::trace!(paragraphs = paragraphs.len(), "walked section");
    Ok(paragraphs)
}

/// Reject attributes whose prefix has no namespace declaration in scope.
fn check_attribute_prefixes(reader: &NsReader<&[u8]>, e: &BytesStart) -> Result<(), HwpxError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| HwpxError::MalformedXml(e.to_string()))?;
        // Declarations and the reserved `xml` prefix are always bound
        if attr.key.as_namespace_binding().is_some()
            || attr.key.prefix().is_some_and(|p| p.as_ref() == b"xml")
        {
            continue;
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(unbound_prefix(&prefix));
        }
    }
    Ok(())
}

fn unbound_prefix(prefix: &[u8]) -> HwpxError {
    HwpxError::MalformedXml(format!(
        "unbound prefix '{}'",
        String::from_utf8_lossy(prefix)
    ))
}

fn junk_after_root() -> HwpxError {
    HwpxError::MalformedXml("junk after document element".to_string())
}

fn append_to_open(paragraphs: &mut [String], open: &[usize], text: &str) {
    if text.is_empty() {
        return;
    }
    for &i in open {
        paragraphs[i].push_str(text);
    }
}
