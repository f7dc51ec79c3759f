// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Markup parsing and printing on top of `quick-xml`.

use std::fmt::Display;
use std::io::Write;

use log::trace;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{Attribute, Document, Element};
use crate::config::Config;
use crate::error::Error;

fn tree_error(err: impl Display) -> Error {
    Error::tree(err.to_string())
}

fn utf8(bytes: &[u8]) -> Result<&str, Error> {
    std::str::from_utf8(bytes).map_err(tree_error)
}

/// Parses markup into a [`Document`].
///
/// Declarations, comments, processing instructions and doctypes are
/// dropped. Whitespace-only text is dropped from elements that also carry
/// child elements.
/// Parses `text`, rejecting elements nested deeper than `max_depth`.
pub(crate) fn parse(text: &str, max_depth: u32) -> Result<Document, Error> {
    let mut reader = Reader::from_str(text);
    // index 0 is the document's pseudo element
    let mut stack: Vec<Element> = vec![Element::default()];
    loop {
        let event = reader.read_event().map_err(|err| {
            Error::tree(format!(
                "malformed markup near byte {}: {}",
                reader.buffer_position(),
                err
            ))
        })?;
        match event {
            Event::Start(start) => {
                check_nesting(stack.len(), max_depth)?;
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                check_nesting(stack.len(), max_depth)?;
                let element = open_element(&start)?;
                close_element(&mut stack, element)?;
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(Error::tree("closing tag without a matching opening tag"));
                }
                if let Some(element) = stack.pop() {
                    close_element(&mut stack, element)?;
                }
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(tree_error)?;
                push_text(&mut stack, &content);
            }
            Event::CData(content) => {
                let content = utf8(&content)?;
                push_text(&mut stack, content);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if stack.len() != 1 {
        let open = stack.last().map(|e| e.name().to_owned()).unwrap_or_default();
        return Err(Error::tree(format!("element `{}` is never closed", open)));
    }
    let node = stack.pop().unwrap_or_default();
    Ok(Document::from_node(node))
}

// `depth` counts the element about to open; the root element is 1.
fn check_nesting(depth: usize, max_depth: u32) -> Result<(), Error> {
    if depth > max_depth as usize {
        return Err(Error::tree(format!(
            "elements nest deeper than {} levels",
            max_depth
        )));
    }
    Ok(())
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, Error> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(tree_error)?;
        let key = utf8(attribute.key.as_ref())?;
        let value = attribute.unescape_value().map_err(tree_error)?;
        element.push_attribute(Attribute::new(key, value.into_owned()));
    }
    Ok(element)
}

fn close_element(stack: &mut [Element], mut element: Element) -> Result<(), Error> {
    if element.child_count() > 0 && element.text().trim().is_empty() {
        element.clear_text();
    }
    match stack.last_mut() {
        Some(parent) => parent.add_child(element).map(|_| ()),
        None => Err(Error::tree("element closed outside of the document")),
    }
}

fn push_text(stack: &mut [Element], content: &str) {
    match stack {
        [_] | [] => {
            if !content.trim().is_empty() {
                trace!("ignoring text outside of the root element: {:?}", content);
            }
        }
        [.., current] => current.append_text(content),
    }
}

/// Prints a [`Document`] as markup according to `config`.
pub(crate) fn print(document: &Document, config: &Config) -> Result<String, Error> {
    let mut writer = match config.indent() {
        Some(width) => Writer::new_with_indent(Vec::new(), b' ', width),
        None => Writer::new(Vec::new()),
    };
    if config.is_declaration() {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(tree_error)?;
    }
    for element in document.child_elements() {
        write_element(&mut writer, element)?;
    }
    String::from_utf8(writer.into_inner()).map_err(tree_error)
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), Error> {
    let mut start = BytesStart::new(element.name());
    for attribute in element.attributes() {
        start.push_attribute((attribute.name(), attribute.value()));
    }
    if !element.has_text() && element.child_count() == 0 {
        return writer.write_event(Event::Empty(start)).map_err(tree_error);
    }
    writer.write_event(Event::Start(start)).map_err(tree_error)?;
    if element.has_text() {
        writer
            .write_event(Event::Text(BytesText::new(element.text())))
            .map_err(tree_error)?;
    }
    for child in element.child_elements() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(tree_error)
}
