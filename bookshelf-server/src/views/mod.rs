//! HTML pages
//!
//! Pages are written with quick-xml so every piece of book data is escaped on
//! the way out. [`Views`] is built once at startup and shared through the
//! application state.

mod detail;
mod edit;
mod list;

use bookshelf_core::Book;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub(crate) type HtmlWriter = Writer<Vec<u8>>;

/// Result of rendering a page
pub type RenderResult = Result<String, quick_xml::Error>;

/// Page renderer holding the shared layout
#[derive(Debug, Clone)]
pub struct Views {
    site_title: String,
}

impl Views {
    pub fn new(site_title: impl Into<String>) -> Self {
        Self {
            site_title: site_title.into(),
        }
    }

    /// List of all books
    pub fn list(&self, books: &[Book]) -> RenderResult {
        self.page(|w| list::write(w, books))
    }

    /// Details of a single book
    pub fn detail(&self, book: &Book) -> RenderResult {
        self.page(|w| detail::write(w, book))
    }

    /// Add form when `book` is `None`, edit form otherwise
    pub fn edit(&self, book: Option<&Book>) -> RenderResult {
        self.page(|w| edit::write(w, book))
    }

    /// Wrap `body` in the shared layout
    fn page<F>(&self, body: F) -> RenderResult
    where
        F: FnOnce(&mut HtmlWriter) -> Result<(), quick_xml::Error>,
    {
        let mut writer = Writer::new(Vec::new());

        writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
        writer.write_event(Event::Start(
            BytesStart::new("html").with_attributes([("lang", "en")]),
        ))?;

        writer.write_event(Event::Start(BytesStart::new("head")))?;
        writer.write_event(Event::Empty(
            BytesStart::new("meta").with_attributes([("charset", "utf-8")]),
        ))?;
        text_element(&mut writer, "title", &self.site_title)?;
        writer.write_event(Event::End(BytesEnd::new("head")))?;

        writer.write_event(Event::Start(BytesStart::new("body")))?;
        writer.write_event(Event::Start(BytesStart::new("nav")))?;
        link(&mut writer, "/books", &self.site_title)?;
        writer.write_event(Event::End(BytesEnd::new("nav")))?;

        writer.write_event(Event::Start(BytesStart::new("main")))?;
        body(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("main")))?;

        writer.write_event(Event::End(BytesEnd::new("body")))?;
        writer.write_event(Event::End(BytesEnd::new("html")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new("Bookshelf")
    }
}

/// Write a simple text element
pub(crate) fn text_element(
    writer: &mut HtmlWriter,
    name: &str,
    content: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Write an anchor with text content
pub(crate) fn link(writer: &mut HtmlWriter, href: &str, text: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(
        BytesStart::new("a").with_attributes([("href", href)]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("a")))?;
    Ok(())
}

/// Write an `<img>` for a cover, if the book has one
pub(crate) fn cover(writer: &mut HtmlWriter, book: &Book) -> Result<(), quick_xml::Error> {
    if let Some(url) = book.image_url.as_deref() {
        writer.write_event(Event::Empty(BytesStart::new("img").with_attributes([
            ("src", url),
            ("alt", book.title.as_str()),
            ("class", "cover"),
        ])))?;
    }
    Ok(())
}
