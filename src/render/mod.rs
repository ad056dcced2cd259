//! View Rendering
//!
//! Pages are built as a [`View`] tree and then written out by one of two
//! back ends:
//!
//! - [`View::to_html`]: markup with every text node and attribute escaped
//! - [`View::to_text`]: plain terminal text
//!
//! `<details>` elements are collapsible. HTML keeps them closed unless they
//! carry `open`; the text back end prints only their `<summary>` unless
//! [`TextOptions::expand`] is set.

mod dashboard;

pub use dashboard::{
    dashboard_loading_view, dashboard_view, loading_view, missing_data_view, render, transcript_view, DashboardState,
    NO_RISKS_MESSAGE,
};

use maud::{html, PreEscaped, Render, DOCTYPE};
use std::fmt::Write;

/// A node in the view tree
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Element(Element),
    Text(String),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<View>,
}

/// Start building an element
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// A text node
pub fn text(content: impl Into<String>) -> View {
    View::Text(content.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, V>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<View>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Shorthand for a single text child
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(text(content))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl From<&str> for View {
    fn from(content: &str) -> Self {
        View::Text(content.to_string())
    }
}

impl From<String> for View {
    fn from(content: String) -> Self {
        View::Text(content)
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

const BLOCK_TAGS: &[&str] = &[
    "article", "aside", "body", "details", "div", "footer", "h1", "h2", "h3", "h4", "h5",
    "header", "li", "main", "nav", "p", "section", "summary", "ul",
];

/// Options for plain-text output
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Print the body of collapsed `<details>` elements too
    pub expand: bool,
}

impl Render for View {
    fn render_to(&self, buffer: &mut String) {
        match self {
            View::Text(content) => content.render_to(buffer),
            View::Element(element) => {
                buffer.push('<');
                buffer.push_str(element.tag);
                for (name, value) in &element.attrs {
                    buffer.push(' ');
                    buffer.push_str(name);
                    buffer.push_str("=\"");
                    value.render_to(buffer);
                    buffer.push('"');
                }
                buffer.push('>');

                if VOID_TAGS.contains(&element.tag) {
                    return;
                }

                for child in &element.children {
                    child.render_to(buffer);
                }
                buffer.push_str("</");
                buffer.push_str(element.tag);
                buffer.push('>');
            }
        }
    }
}

impl View {
    /// Render as escaped HTML
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }

    /// Render as plain text for a terminal
    pub fn to_text(&self, options: TextOptions) -> String {
        let mut lines = Vec::new();
        let mut current = String::new();
        self.write_text(options, 0, &mut lines, &mut current);
        flush_line(&mut lines, &mut current);

        // Collapse runs of blank lines left by nested blocks
        let mut out = String::new();
        let mut previous_blank = true;
        for line in lines {
            let blank = line.trim().is_empty();
            if blank && previous_blank {
                continue;
            }
            out.push_str(line.trim_end());
            out.push('\n');
            previous_blank = blank;
        }
        out.trim_end().to_string()
    }

    fn write_text(
        &self,
        options: TextOptions,
        depth: usize,
        lines: &mut Vec<String>,
        current: &mut String,
    ) {
        let element = match self {
            View::Text(content) => {
                if current.is_empty() {
                    current.push_str(&"  ".repeat(depth));
                }
                current.push_str(content);
                return;
            }
            View::Element(element) => element,
        };

        let block = BLOCK_TAGS.contains(&element.tag);
        if block {
            flush_line(lines, current);
        }

        match element.tag {
            "h1" | "h2" | "h3" => {
                let mut heading = String::new();
                for child in &element.children {
                    child.write_text(options, 0, lines, &mut heading);
                }
                let heading = heading.trim().to_string();
                lines.push(String::new());
                lines.push(format!("{}{}", "  ".repeat(depth), heading));
                lines.push(format!("{}{}", "  ".repeat(depth), "=".repeat(heading.chars().count())));
                return;
            }
            "details" => {
                let open = options.expand || element.get_attr("open").is_some();
                let marker = if open { "[-] " } else { "[+] " };
                for child in &element.children {
                    match child {
                        View::Element(inner) if inner.tag == "summary" => {
                            current.push_str(&"  ".repeat(depth));
                            current.push_str(marker);
                            for grandchild in &inner.children {
                                grandchild.write_text(options, depth, lines, current);
                            }
                            flush_line(lines, current);
                        }
                        _ if open => child.write_text(options, depth + 1, lines, current),
                        _ => {}
                    }
                }
                lines.push(String::new());
                return;
            }
            "a" => {
                for child in &element.children {
                    child.write_text(options, depth, lines, current);
                }
                if let Some(href) = element.get_attr("href") {
                    let _ = write!(current, " <{}>", href);
                }
                return;
            }
            _ => {}
        }

        if let Some(tooltip) = element.get_attr("data-tooltip") {
            if current.is_empty() {
                current.push_str(&"  ".repeat(depth));
            }
            let _ = write!(current, "[{}] ", tooltip);
        }

        for child in &element.children {
            child.write_text(options, depth, lines, current);
        }

        if block {
            flush_line(lines, current);
            if matches!(element.tag, "section" | "p" | "li") {
                lines.push(String::new());
            }
        }
    }
}

fn flush_line(lines: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        lines.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Wrap a body view in a standalone HTML document
pub fn html_document(title: &str, body: &View) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLESHEET)) }
            }
            body { (body) }
        }
    }
    .into_string()
}

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#1f2937}\
.risk-item{display:flex;gap:.75rem;padding:.75rem;border-radius:.5rem;margin-bottom:.5rem}\
.risk-red{background:#fee2e2}.risk-yellow{background:#fef3c7}\
.risk-indicator{font-weight:600;white-space:nowrap}\
.accordion-item{border:1px solid #e5e7eb;border-radius:.5rem;margin-bottom:.5rem;padding:.5rem}\
.accordion-trigger{cursor:pointer;font-weight:600}\
.chat-user{text-align:right}.chat-ai{text-align:left}\
.document-name{color:#7c3aed}";
