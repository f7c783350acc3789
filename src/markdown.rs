//! Renders the markdown found in project names, taglines, and descriptions.
//! Single newlines in the source are significant: they render as `<br />`
//! rather than being folded into a space.

use pulldown_cmark::{html, Event, Options, Parser, Tag};
use regex::Regex;
use std::sync::LazyLock;

/// Renders `markdown` as a full HTML fragment (paragraphs, lists, etc.).
/// Used for descriptions.
pub fn render_block(markdown: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, events(markdown));
    out
}

/// Renders `markdown` as phrasing content only, so `**Foo**` renders as
/// `<strong>Foo</strong>` rather than `<p><strong>Foo</strong></p>`. Used for
/// names and taglines.
///
/// Line-leading block syntax is kept as text: `1. Install` stays
/// `1. Install` rather than becoming a list. Anything that still parses as
/// a block (a table, say) is rendered as escaped plain text.
pub fn render_inline(markdown: &str) -> String {
    let escaped = escape_block_markers(markdown);
    let events: Vec<Event> = events(&escaped).collect();
    if events.iter().any(is_block) {
        return plain_text(markdown);
    }

    let mut out = String::new();
    html::push_html(
        &mut out,
        events.into_iter().filter(|ev| {
            !matches!(ev, Event::Start(Tag::Paragraph) | Event::End(Tag::Paragraph))
        }),
    );
    out.trim_end().to_owned()
}

fn events(markdown: &str) -> impl Iterator<Item = Event<'_>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    Parser::new_ext(markdown, options).map(|ev| match ev {
        Event::SoftBreak => Event::HardBreak,
        _ => ev,
    })
}

// Lines opening a list item, heading, quote, thematic break, setext
// underline, code fence, or link reference definition.
static BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:[0-9]{1,9}[.)](?:\s|$)",
        r"|#{1,6}(?:\s|$)",
        r"|[*+-](?:\s|$)",
        r"|>",
        r"|(?:\*[ \t]*){3,}$|(?:_[ \t]*){3,}$|(?:-[ \t]*){3,}$",
        r"|=+[ \t]*$",
        r"|`{3,}|~{3,}",
        r"|\[[^\]]+\]:)",
    ))
    .unwrap()
});

/// Backslash-escapes the marker at the start of each line that would
/// otherwise open a block. Leading indentation is dropped so nothing turns
/// into an indented code block.
fn escape_block_markers(markdown: &str) -> String {
    markdown
        .lines()
        .map(|line| {
            let line = line.trim_start();
            if !BLOCK_MARKER.is_match(line) {
                return line.to_owned();
            }
            // Ordered list markers are escaped after their digits: `1\.`.
            let at = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(0);
            format!("{}\\{}", &line[..at], &line[at..])
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_block(ev: &Event) -> bool {
    match ev {
        Event::Start(tag) => !matches!(
            tag,
            Tag::Paragraph
                | Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Link(..)
                | Tag::Image(..)
        ),
        Event::Rule => true,
        _ => false,
    }
}

/// Escapes `text` line by line, joining lines with `<br />`.
fn plain_text(text: &str) -> String {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            events.push(Event::HardBreak);
        }
        events.push(Event::Text(line.trim().into()));
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out.trim_end().to_owned()
}
