//! Minimal XMP packet scanner.
//!
//! Lens names written by editing tools live in XMP (`aux:Lens`,
//! `exifEX:LensModel`), not in EXIF. Rather than pull in an XML stack for
//! a handful of flat properties, this scans the raw file bytes for the
//! `<x:xmpmeta>` packet and collects:
//!
//! - attribute-form properties: `<rdf:Description aux:Lens="XCD 90V" />`
//! - simple element-form properties: `<aux:Lens>XCD 90V</aux:Lens>`
//!
//! Namespace declarations and `rdf:` plumbing are skipped. Nested
//! structures (`rdf:Alt`, `rdf:Seq`) are ignored; the normalizer only needs
//! simple text values.

use crate::metadata::AuxMap;

const PACKET_START: &[u8] = b"<x:xmpmeta";
const PACKET_END: &[u8] = b"</x:xmpmeta>";

/// Locate the XMP packet in a file's bytes, if any.
pub fn find_packet(data: &[u8]) -> Option<&[u8]> {
    let start = find(data, PACKET_START)?;
    let end = find(&data[start..], PACKET_END)? + start + PACKET_END.len();
    Some(&data[start..end])
}

/// Collect `prefix:Name` → value pairs from an XMP packet, in document order.
pub fn parse_properties(packet: &[u8]) -> AuxMap {
    let text = String::from_utf8_lossy(packet);
    let mut props = AuxMap::new();
    let mut rest: &str = &text;

    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find('>') else {
            break;
        };
        let tag = &rest[..close];
        let after = &rest[close + 1..];
        rest = after;

        if tag.starts_with(['/', '?', '!']) {
            continue;
        }
        let self_closing = tag.ends_with('/');
        let tag = tag.trim_end_matches('/');
        let (name, attrs) = match tag.find(char::is_whitespace) {
            Some(i) => (&tag[..i], &tag[i..]),
            None => (tag, ""),
        };

        collect_attributes(attrs, &mut props);

        if !self_closing && is_property(name) {
            let content = after.split('<').next().unwrap_or_default().trim();
            if !content.is_empty() {
                props.push((name.to_string(), unescape(content)));
            }
        }
    }
    props
}

fn collect_attributes(mut attrs: &str, props: &mut AuxMap) {
    loop {
        attrs = attrs.trim_start();
        let Some(eq) = attrs.find('=') else {
            return;
        };
        let key = attrs[..eq].trim();
        let value_part = attrs[eq + 1..].trim_start();
        let Some(quote) = value_part.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            return;
        };
        let body = &value_part[1..];
        let Some(end) = body.find(quote) else {
            return;
        };
        let value = &body[..end];
        if is_property(key) && !value.trim().is_empty() {
            props.push((key.to_string(), unescape(value.trim())));
        }
        attrs = &body[end + 1..];
    }
}

/// `prefix:Name`, excluding XML/RDF machinery.
fn is_property(name: &str) -> bool {
    name.contains(':')
        && !["xmlns", "xml:", "rdf:", "x:"]
            .iter()
            .any(|p| name.starts_with(p))
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
