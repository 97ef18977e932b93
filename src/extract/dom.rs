// src/extract/dom.rs

//! Small DOM helpers shared by the extraction routines.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector literal.
///
/// Only called with static literals; an invalid literal is a programming
/// error, not a runtime condition.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector literal")
}

/// Whitespace-normalized text content of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text selected under `scope`.
pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .map(text_of)
        .find(|t| !t.is_empty())
}

/// Apply one field rule under `scope`: the selected node's text, or the
/// field default when selection fails. Field failures never propagate.
pub(crate) fn field(scope: ElementRef<'_>, selector: &Selector, default: &str) -> String {
    first_text(scope, selector).unwrap_or_else(|| default.to_string())
}

/// First element selected in the whole document.
pub(crate) fn doc_first<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).next()
}

/// Document-level field rule.
pub(crate) fn doc_field(doc: &Html, selector: &Selector, default: &str) -> String {
    doc.select(selector)
        .map(text_of)
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Require the document's top-level container, the only extraction failure
/// that surfaces to the caller.
pub(crate) fn require_container<'a>(
    doc: &'a Html,
    selector: &Selector,
    context: &str,
) -> Result<ElementRef<'a>> {
    doc_first(doc, selector).ok_or_else(|| AppError::container_not_found(context))
}

/// Whether the element carries the given class.
pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// The first element after `el` (its own following siblings first, then the
/// parent's) that carries the given class. Covers the "heading followed by
/// its data card" page shape.
pub(crate) fn following_with_class<'a>(
    el: ElementRef<'a>,
    class: &str,
) -> Option<ElementRef<'a>> {
    let direct = el
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| has_class(*sib, class));
    if direct.is_some() {
        return direct;
    }

    let parent = el.parent().and_then(ElementRef::wrap)?;
    parent
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| has_class(*sib, class))
}
