//! Add/edit form
//!
//! Field names match what `handlers::form` reads back.

use super::{text_element, HtmlWriter};
use bookshelf_core::Book;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

pub(super) fn write(writer: &mut HtmlWriter, book: Option<&Book>) -> Result<(), quick_xml::Error> {
    let (heading, action) = match book {
        Some(book) => ("Edit book", book.path()),
        None => ("Add book", "/books".to_string()),
    };
    let empty = Book::default();
    let book = book.unwrap_or(&empty);

    text_element(writer, "h1", heading)?;

    writer.write_event(Event::Start(BytesStart::new("form").with_attributes([
        ("method", "post"),
        ("action", action.as_str()),
        ("enctype", "multipart/form-data"),
    ])))?;

    input(writer, "Title", "title", &book.title)?;
    input(writer, "Author", "author", &book.author)?;
    input(writer, "Date Published", "publishedDate", &book.published_date)?;

    // Description
    writer.write_event(Event::Start(
        BytesStart::new("label").with_attributes([("for", "description")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new("Description")))?;
    writer.write_event(Event::End(BytesEnd::new("label")))?;
    writer.write_event(Event::Start(
        BytesStart::new("textarea").with_attributes([("id", "description"), ("name", "description")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(
        book.description.as_deref().unwrap_or_default(),
    )))?;
    writer.write_event(Event::End(BytesEnd::new("textarea")))?;

    // Cover image
    writer.write_event(Event::Start(
        BytesStart::new("label").with_attributes([("for", "image")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new("Cover Image")))?;
    writer.write_event(Event::End(BytesEnd::new("label")))?;
    writer.write_event(Event::Empty(BytesStart::new("input").with_attributes([
        ("type", "file"),
        ("id", "image"),
        ("name", "image"),
        ("accept", "image/*"),
    ])))?;
    writer.write_event(Event::Empty(BytesStart::new("input").with_attributes([
        ("type", "hidden"),
        ("name", "imageURL"),
        ("value", book.image_url.as_deref().unwrap_or_default()),
    ])))?;

    writer.write_event(Event::Start(
        BytesStart::new("button").with_attributes([("type", "submit")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new("Save")))?;
    writer.write_event(Event::End(BytesEnd::new("button")))?;

    writer.write_event(Event::End(BytesEnd::new("form")))?;
    Ok(())
}

/// Labelled text input
fn input(writer: &mut HtmlWriter, label: &str, name: &str, value: &str) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(
        BytesStart::new("label").with_attributes([("for", name)]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(label)))?;
    writer.write_event(Event::End(BytesEnd::new("label")))?;
    writer.write_event(Event::Empty(BytesStart::new("input").with_attributes([
        ("type", "text"),
        ("id", name),
        ("name", name),
        ("value", value),
    ])))?;
    Ok(())
}
