//! OPF templating.
//!
//! `metadata.opf` is rendered from an [upon] template so users can ship their
//! own package document layout. Templates are compiled once, up front.
//!
//! # Template Variables
//!
//! | Variable          | Description                                   |
//! |-------------------|-----------------------------------------------|
//! | `author`          | Primary author, or `_unknown_`                |
//! | `title`           | Book title                                    |
//! | `subtitle`        |                                               |
//! | `summary`         |                                               |
//! | `narrator`        | Primary narrator                              |
//! | `publisher`       |                                               |
//! | `publish_year`    |                                               |
//! | `genres`          | All genres joined with `", "`                 |
//! | `isbn`            |                                               |
//! | `asin`            |                                               |
//! | `series`          | Series name                                   |
//! | `series_position` | Position within the series, as written        |
//! | `has_series`      | `true` when both series values are present    |
//! | `language`        |                                               |
//!
//! Every variable is a string except `has_series`. Missing values render as
//! empty strings. The `xml` formatter escapes markup characters:
//! `{{ title|xml }}`.
//!
//! # Example
//!
//! ```
//! use shelve_library::OpfTemplate;
//! use shelve_metadata::BookMetadata;
//!
//! let template: OpfTemplate = "<dc:title>{{ title|xml }}</dc:title>".parse().unwrap();
//! let metadata = BookMetadata::new("Pride & Prejudice", ["Jane Austen"]);
//! assert_eq!(template.render(&metadata).unwrap(), "<dc:title>Pride &amp; Prejudice</dc:title>");
//! ```

use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;
use shelve_metadata::BookMetadata;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template};

/// Built-in OPF 2.0 package document.
pub const DEFAULT_OPF_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>{{ title|xml }}</dc:title>
    <dc:subtitle>{{ subtitle|xml }}</dc:subtitle>
    <dc:creator opf:role="aut">{{ author|xml }}</dc:creator>
    <dc:contributor opf:role="nrt">{{ narrator|xml }}</dc:contributor>
    <dc:publisher>{{ publisher|xml }}</dc:publisher>
    <dc:date>{{ publish_year|xml }}</dc:date>
    <dc:description>{{ summary|xml }}</dc:description>
    <dc:subject>{{ genres|xml }}</dc:subject>
    <dc:language>{{ language|xml }}</dc:language>
    <dc:identifier opf:scheme="ISBN">{{ isbn|xml }}</dc:identifier>
    <dc:identifier opf:scheme="ASIN">{{ asin|xml }}</dc:identifier>
{% if has_series %}
    <meta name="calibre:series" content="{{ series|xml }}"/>
    <meta name="calibre:series_index" content="{{ series_position|xml }}"/>
{% endif %}
  </metadata>
</package>
"#;

/// A compiled OPF template.
///
/// Construct via [`FromStr`] or [`from_file`](Self::from_file); syntax errors
/// surface there rather than at render time.
pub struct OpfTemplate {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for OpfTemplate {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}
impl OpfTemplate {
    /// Compiles [`DEFAULT_OPF_TEMPLATE`].
    pub fn builtin() -> Result<Self> {
        DEFAULT_OPF_TEMPLATE.parse()
    }

    /// Reads and compiles a template file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).or_raise(|| ErrorKind::ReadTemplate(path.to_path_buf()))?;
        source.parse()
    }

    pub fn render(&self, metadata: &BookMetadata) -> Result<String> {
        self.template
            .render(&self.engine, Self::parameters(metadata))
            .to_string()
            .or_raise(|| ErrorKind::Template)
    }

    fn parameters(metadata: &BookMetadata) -> upon::Value {
        upon::value! {
            author: metadata.primary_author(),
            title: &metadata.title,
            subtitle: &metadata.subtitle,
            summary: &metadata.summary,
            narrator: metadata.primary_narrator(),
            publisher: &metadata.publisher,
            publish_year: &metadata.publish_year,
            genres: metadata.genres.join(", "),
            isbn: &metadata.isbn,
            asin: &metadata.asin,
            series: &metadata.series,
            series_position: &metadata.series_position,
            has_series: metadata.has_series(),
            language: &metadata.language,
        }
    }
}

/// Custom [`upon`] extensions for markup output.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Escapes the five XML special characters; other values use the default formatter.
    fn xml_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => write!(f, "{}", escape(s))?,
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(super) fn escape(s: &str) -> String {
        let mut escaped = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                c => escaped.push(c),
            }
        }
        escaped
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("xml", xml_formatter);
    }
}
