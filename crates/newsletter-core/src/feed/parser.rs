use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::clean::clean_markup;
use super::models::{Article, RawItem};
use crate::{Error, Result};

/// Item children the newsletter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    PubDate,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

impl RawItem {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::PubDate => &mut self.pub_date,
        }
    }
}

// Depths in the open-element stack: root, channel, item, field
const CHANNEL_DEPTH: usize = 1;
const ITEM_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

struct FieldCapture {
    field: Field,
    text: String,
    /// Leading text only; closed at the first child element
    open: bool,
}

struct OpenElement {
    name: Vec<u8>,
    /// Not in any XML namespace, neither prefixed nor under a default `xmlns`
    unqualified: bool,
}

/// Walks the event stream and keeps the leading `channel/item` elements
struct ItemCollector {
    max_items: usize,
    stack: Vec<OpenElement>,
    seen_root: bool,
    items_seen: usize,
    current: Option<RawItem>,
    capture: Option<FieldCapture>,
    items: Vec<RawItem>,
}

impl ItemCollector {
    fn new(max_items: usize) -> Self {
        Self {
            max_items,
            stack: Vec::new(),
            seen_root: false,
            items_seen: 0,
            current: None,
            capture: None,
            items: Vec::new(),
        }
    }

    fn is_under(&self, depth: usize, name: &[u8]) -> bool {
        self.stack.len() == depth + 1
            && self.stack[depth].unqualified
            && self.stack[depth].name == name
    }

    fn on_start(&mut self, name: &[u8], unqualified: bool) -> Result<()> {
        let depth = self.stack.len();

        if depth == 0 {
            if self.seen_root {
                return Err(Error::FeedParse(
                    "junk after document element".to_string(),
                ));
            }
            self.seen_root = true;
        }

        if depth == FIELD_DEPTH + 1 {
            if let Some(capture) = self.capture.as_mut() {
                capture.open = false;
            }
        }

        if depth == ITEM_DEPTH
            && unqualified
            && name == b"item"
            && self.is_under(CHANNEL_DEPTH, b"channel")
        {
            if self.items_seen < self.max_items {
                self.current = Some(RawItem::default());
            }
            self.items_seen += 1;
        }

        if depth == FIELD_DEPTH && unqualified && self.is_under(ITEM_DEPTH, b"item") {
            if let (Some(item), Some(field)) = (self.current.as_mut(), Field::from_name(name)) {
                // Only the first child with a given name counts
                if item.slot(field).is_none() {
                    self.capture = Some(FieldCapture {
                        field,
                        text: String::new(),
                        open: true,
                    });
                }
            }
        }

        self.stack.push(OpenElement {
            name: name.to_vec(),
            unqualified,
        });
        Ok(())
    }

    fn on_end(&mut self, name: &[u8]) -> Result<()> {
        match self.stack.pop() {
            Some(open) if open.name == name => {}
            Some(open) => {
                return Err(Error::FeedParse(format!(
                    "mismatched tag: expected </{}>, found </{}>",
                    String::from_utf8_lossy(&open.name),
                    String::from_utf8_lossy(name)
                )));
            }
            None => {
                return Err(Error::FeedParse(format!(
                    "unexpected closing tag </{}>",
                    String::from_utf8_lossy(name)
                )));
            }
        }

        let depth = self.stack.len();

        if depth == FIELD_DEPTH {
            if let (Some(item), Some(capture)) = (self.current.as_mut(), self.capture.take()) {
                *item.slot(capture.field) = Some(capture.text);
            }
        }

        // `current` is only set while the matched item is the open element at this depth
        if depth == ITEM_DEPTH {
            if let Some(item) = self.current.take() {
                self.items.push(item);
            }
        }

        Ok(())
    }

    fn on_text(&mut self, text: &str) -> Result<()> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::FeedParse(
                "text outside of the document element".to_string(),
            ));
        }

        if self.stack.len() == FIELD_DEPTH + 1 {
            if let Some(capture) = self.capture.as_mut().filter(|c| c.open) {
                capture.text.push_str(text);
            }
        }

        Ok(())
    }

    fn finish(self) -> Result<Vec<RawItem>> {
        if let Some(open) = self.stack.last() {
            return Err(Error::FeedParse(format!(
                "unexpected end of document, <{}> is not closed",
                String::from_utf8_lossy(&open.name)
            )));
        }
        if !self.seen_root {
            return Err(Error::FeedParse("no element found".to_string()));
        }
        Ok(self.items)
    }
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::FeedParse(format!("XML parse error: {}", err))
}

/// Namespace state of an element, detached from the reader's borrow
enum Namespacing {
    None,
    Bound,
    UnknownPrefix(Vec<u8>),
}

impl Namespacing {
    fn from_resolved(ns: ResolveResult) -> Self {
        match ns {
            ResolveResult::Unbound => Namespacing::None,
            ResolveResult::Bound(_) => Namespacing::Bound,
            ResolveResult::Unknown(prefix) => Namespacing::UnknownPrefix(prefix),
        }
    }

    /// Whether the element is outside every namespace. Undeclared prefixes are malformed.
    fn unqualified(self, name: &[u8]) -> Result<bool> {
        match self {
            Namespacing::None => Ok(true),
            Namespacing::Bound => Ok(false),
            Namespacing::UnknownPrefix(prefix) => Err(Error::FeedParse(format!(
                "unbound prefix {} on <{}>",
                String::from_utf8_lossy(&prefix),
                String::from_utf8_lossy(name)
            ))),
        }
    }
}

/// Duplicate or malformed attributes make the document malformed
fn check_attributes(e: &BytesStart) -> Result<()> {
    for attr in e.attributes() {
        attr.map_err(xml_error)?;
    }
    Ok(())
}

/// Parse the feed XML and return the raw text of at most `max_items` leading items.
///
/// The whole document is read, so malformed XML past the cap is still an error.
/// Text is decoded with the encoding named in the XML declaration.
pub fn parse_items(content: &[u8], max_items: usize) -> Result<Vec<RawItem>> {
    let mut reader = NsReader::from_reader(content);
    let mut collector = ItemCollector::new(max_items);
    let mut buf = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf).map_err(xml_error)?;
        let ns = Namespacing::from_resolved(ns);

        match event {
            Event::Start(e) => {
                check_attributes(&e)?;
                let unqualified = ns.unqualified(e.name().as_ref())?;
                collector.on_start(e.name().as_ref(), unqualified)?;
            }
            Event::Empty(e) => {
                check_attributes(&e)?;
                let unqualified = ns.unqualified(e.name().as_ref())?;
                let name = e.name().as_ref().to_vec();
                collector.on_start(&name, unqualified)?;
                collector.on_end(&name)?;
            }
            Event::End(e) => collector.on_end(e.name().as_ref())?,
            Event::Text(e) => {
                let text = e.unescape().map_err(xml_error)?;
                collector.on_text(&text)?;
            }
            Event::CData(e) => {
                let text = reader.decoder().decode(&e).map_err(xml_error)?;
                collector.on_text(&text)?;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    collector.finish()
}

/// Clean one item; `None` when the cleaned title or link is empty
pub fn extract_article(raw: RawItem) -> Option<Article> {
    let title = clean_markup(raw.title.as_deref());
    let link = clean_markup(raw.link.as_deref());

    if title.is_empty() || link.is_empty() {
        return None;
    }

    Some(Article {
        title,
        link,
        description: clean_markup(raw.description.as_deref()),
        published: clean_markup(raw.pub_date.as_deref()),
    })
}

/// Parse RSS content into cleaned articles, in document order
pub fn parse_feed(content: &[u8], max_items: usize) -> Result<Vec<Article>> {
    let raw_items = parse_items(content, max_items)?;
    let total = raw_items.len();

    let articles: Vec<Article> = raw_items
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let article = extract_article(raw);
            if article.is_none() {
                tracing::debug!("Dropping item {}: empty title or link", index + 1);
            }
            article
        })
        .collect();

    tracing::info!("Kept {} of {} feed items", articles.len(), total);
    Ok(articles)
}
