//! Streaming reader for the library XML.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::error::LibraryError;
use super::types::BookRecord;

/// Parse the library file and invoke `handler` once per `<book>` element.
///
/// The parse is incremental: one record exists at a time and the event
/// buffer is reused between elements, so memory stays bounded however large
/// the library grows. Handlers run synchronously in document order and must
/// not retain the record. Returns the number of records seen.
pub fn for_each_book<F, E>(path: &Path, mut handler: F) -> Result<usize, E>
where
    F: FnMut(BookRecord) -> Result<(), E>,
    E: From<LibraryError>,
{
    let file = File::open(path).map_err(LibraryError::from)?;
    let mut reader = Reader::from_reader(BufReader::new(file));
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(LibraryError::from)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"book" => {
                handler(book_from_element(e)?)?;
                count += 1;
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(count)
}

fn book_from_element(element: &BytesStart<'_>) -> Result<BookRecord, LibraryError> {
    let mut id = None;
    let mut name = None;
    let mut url = None;
    let mut tags = None;
    let mut favicon = None;
    let mut favicon_mime_type = None;
    let mut size = None;
    let mut media_count = None;
    let mut article_count = None;
    let mut title = None;
    let mut description = None;
    let mut creator = None;
    let mut publisher = None;
    let mut flavour = None;

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"id" => id = Some(value),
            b"name" => name = Some(value),
            b"url" => url = Some(value),
            b"tags" => tags = Some(value),
            b"favicon" => favicon = Some(value),
            b"faviconMimeType" => favicon_mime_type = Some(value),
            b"size" => size = Some(parse_count("size", value)?),
            b"mediaCount" => media_count = Some(parse_count("mediaCount", value)?),
            b"articleCount" => article_count = Some(parse_count("articleCount", value)?),
            b"title" => title = Some(value),
            b"description" => description = Some(value),
            b"creator" => creator = Some(value),
            b"publisher" => publisher = Some(value),
            b"flavour" => flavour = Some(value),
            _ => {}
        }
    }

    Ok(BookRecord {
        id: required("id", id)?,
        name: required("name", name)?,
        url: required("url", url)?,
        tags: required("tags", tags)?,
        favicon: required("favicon", favicon)?,
        favicon_mime_type: required("faviconMimeType", favicon_mime_type)?,
        size,
        media_count,
        article_count,
        title,
        description,
        creator,
        publisher,
        flavour,
    })
}

fn required(name: &'static str, value: Option<String>) -> Result<String, LibraryError> {
    value.ok_or(LibraryError::MissingAttribute { name })
}

fn parse_count(name: &'static str, value: String) -> Result<u64, LibraryError> {
    value
        .parse()
        .map_err(|_| LibraryError::InvalidAttribute { name, value })
}
