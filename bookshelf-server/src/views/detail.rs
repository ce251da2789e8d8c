//! Single book page

use super::{cover, link, text_element, HtmlWriter};
use bookshelf_core::Book;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

pub(super) fn write(writer: &mut HtmlWriter, book: &Book) -> Result<(), quick_xml::Error> {
    let path = book.path();

    writer.write_event(Event::Start(BytesStart::new("h1")))?;
    writer.write_event(Event::Text(BytesText::new(&book.title)))?;
    if !book.published_date.is_empty() {
        writer.write_event(Event::Text(BytesText::new(" ")))?;
        text_element(writer, "small", &book.published_date)?;
    }
    writer.write_event(Event::End(BytesEnd::new("h1")))?;

    let author = if book.author.is_empty() {
        "Unknown"
    } else {
        book.author.as_str()
    };
    text_element(writer, "p", &format!("By {author}"))?;

    cover(writer, book)?;
    if let Some(description) = book.description.as_deref() {
        text_element(writer, "p", description)?;
    }

    link(writer, &format!("{path}/edit"), "Edit book")?;

    let delete_action = format!("{path}:delete");
    writer.write_event(Event::Start(
        BytesStart::new("form").with_attributes([
            ("method", "post"),
            ("action", delete_action.as_str()),
        ]),
    ))?;
    writer.write_event(Event::Start(
        BytesStart::new("button").with_attributes([("type", "submit")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new("Delete book")))?;
    writer.write_event(Event::End(BytesEnd::new("button")))?;
    writer.write_event(Event::End(BytesEnd::new("form")))?;

    Ok(())
}
