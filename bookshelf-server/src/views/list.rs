//! Book list page

use super::{cover, link, text_element, HtmlWriter};
use bookshelf_core::Book;
use quick_xml::events::{BytesEnd, BytesStart, Event};

pub(super) fn write(writer: &mut HtmlWriter, books: &[Book]) -> Result<(), quick_xml::Error> {
    text_element(writer, "h1", "Books")?;
    link(writer, "/books/add", "Add book")?;

    if books.is_empty() {
        return text_element(writer, "p", "No books found.");
    }

    writer.write_event(Event::Start(
        BytesStart::new("ul").with_attributes([("class", "books")]),
    ))?;
    for book in books {
        let path = book.path();
        writer.write_event(Event::Start(BytesStart::new("li")))?;
        writer.write_event(Event::Start(
            BytesStart::new("a").with_attributes([("href", path.as_str())]),
        ))?;
        cover(writer, book)?;
        text_element(writer, "h2", &book.title)?;
        text_element(writer, "p", &book.author)?;
        writer.write_event(Event::End(BytesEnd::new("a")))?;
        writer.write_event(Event::End(BytesEnd::new("li")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("ul")))?;

    Ok(())
}
