// src/ingest/parse.rs
//! RSS 2.0 / Atom parsing into raw [`FeedEntry`] values.
//!
//! Streaming `quick_xml` reader: `<item>` and `<entry>` both open an entry; field
//! text is accumulated across Text/CData events (and nested markup, e.g. Atom xhtml).

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::ingest::types::{Enclosure, FeedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Summary,
    Content,
    Published,
    Updated,
    Link,
}

fn field_for(name: &str) -> Option<Field> {
    match name {
        "title" => Some(Field::Title),
        "description" | "summary" => Some(Field::Summary),
        "content" | "content:encoded" => Some(Field::Content),
        "pubDate" | "published" | "dc:date" => Some(Field::Published),
        "updated" => Some(Field::Updated),
        "link" => Some(Field::Link),
        _ => None,
    }
}

/// In-progress entry while the reader is inside `<item>`/`<entry>`.
#[derive(Default)]
struct Draft {
    title: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    published: Option<String>,
    updated: Option<String>,
    link: Option<String>,
    media_content: Vec<Option<String>>,
    enclosures: Vec<Enclosure>,
}

impl Draft {
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Content => &mut self.content,
            Field::Published => &mut self.published,
            Field::Updated => &mut self.updated,
            Field::Link => &mut self.link,
        };
        // First occurrence wins (e.g. several <link> elements).
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    fn finish(self) -> FeedEntry {
        let summary = match self.summary {
            Some(s) if !s.trim().is_empty() => Some(s),
            other => self.content.or(other),
        };
        FeedEntry {
            title: self.title.map(|t| clean_title(&t)),
            summary,
            published: self.published.or(self.updated),
            link: self.link,
            media_content: self.media_content,
            enclosures: self.enclosures,
        }
    }
}

fn clean_title(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_string()
}

fn qname(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Handles the attribute-only elements that matter inside an entry
/// (`media:content`, `enclosure`, Atom `link`). Returns true if consumed.
fn take_attr_element(draft: &mut Draft, name: &str, e: &BytesStart<'_>) -> bool {
    match name {
        "media:content" => {
            draft.media_content.push(attr(e, "url"));
            true
        }
        "enclosure" => {
            draft.enclosures.push(Enclosure {
                url: attr(e, "url"),
                mime_type: attr(e, "type"),
            });
            true
        }
        "link" => match attr(e, "href") {
            Some(href) => {
                let rel = attr(e, "rel").unwrap_or_else(|| "alternate".to_string());
                if rel.eq_ignore_ascii_case("enclosure") {
                    draft.enclosures.push(Enclosure {
                        url: Some(href),
                        mime_type: attr(e, "type"),
                    });
                } else if rel.eq_ignore_ascii_case("alternate") {
                    draft.set(Field::Link, href);
                }
                true
            }
            None => false,
        },
        _ => false,
    }
}

/// Parse an RSS 2.0 or Atom document into entries, in document order.
///
/// Malformed XML is an error; the caller isolates it to this feed.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut draft: Option<Draft> = None;
    // Field currently collecting text, with the element depth it opened at.
    let mut open: Option<(Field, usize)> = None;
    let mut buf = String::new();
    let mut depth = 0usize;

    loop {
        let event = reader
            .read_event()
            .with_context(|| format!("xml error at byte {}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => {
                depth += 1;
                let name = qname(&e);
                if name == "item" || name == "entry" {
                    draft = Some(Draft::default());
                    open = None;
                    continue;
                }
                let Some(d) = draft.as_mut() else { continue };
                if open.is_some() {
                    continue; // nested markup inside a field
                }
                if take_attr_element(d, &name, &e) && name != "link" {
                    continue;
                }
                if let Some(f) = field_for(&name) {
                    open = Some((f, depth));
                    buf.clear();
                }
            }
            Event::Empty(e) => {
                if let Some(d) = draft.as_mut() {
                    if open.is_none() {
                        let name = qname(&e);
                        take_attr_element(d, &name, &e);
                    }
                }
            }
            Event::Text(t) => {
                if open.is_some() {
                    let text = t
                        .unescape()
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(t.as_ref()).into_owned());
                    push_text(&mut buf, &text);
                }
            }
            Event::CData(c) => {
                if open.is_some() {
                    push_text(&mut buf, &String::from_utf8_lossy(c.as_ref()));
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some((field, at)) = open {
                    if at == depth {
                        if let Some(d) = draft.as_mut() {
                            // An Atom <link href> already recorded its value; the
                            // text of an RSS <link> is the URL.
                            if !(field == Field::Link && buf.trim().is_empty()) {
                                d.set(field, std::mem::take(&mut buf));
                            }
                        }
                        open = None;
                    }
                }
                if (name == "item" || name == "entry") && open.is_none() {
                    if let Some(d) = draft.take() {
                        entries.push(d.finish());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(entries)
}

fn push_text(buf: &mut String, text: &str) {
    if !buf.is_empty() && !text.is_empty() {
        buf.push(' ');
    }
    buf.push_str(text);
}
