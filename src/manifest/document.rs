//! Structured view of a manifest document
//!
//! The text is split into a preamble and heading-delimited sections. Splitting and
//! re-joining on `\n` is lossless, so an untouched document serializes byte-for-byte.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*?)[ \t\r]*$").expect("valid heading regex"));

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").expect("valid reference regex"));

/// A `#`-style heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub name: String,
    raw: String,
}

impl Heading {
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADING_RE.captures(line)?;
        Some(Self {
            level: caps[1].len(),
            name: caps[2].to_string(),
            raw: line.to_string(),
        })
    }

    pub fn new(level: usize, name: &str) -> Self {
        Self {
            level,
            name: name.to_string(),
            raw: format!("{} {}", "#".repeat(level), name),
        }
    }

    pub fn line(&self) -> &str {
        &self.raw
    }
}

/// An image reference, `![alt](path)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub alt: String,
    pub path: String,
}

impl Reference {
    pub fn new(alt: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            path: path.into(),
        }
    }

    /// All references on one line, in order
    pub fn find_all(line: &str) -> impl Iterator<Item = Reference> + '_ {
        REFERENCE_RE
            .captures_iter(line)
            .map(|caps| Reference::new(&caps[1], caps[2].trim()))
    }

    /// Last path component of the link target
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn to_line(&self) -> String {
        format!("![{}]({})", self.alt, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: Heading,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDocument {
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl ManifestDocument {
    pub fn parse(text: &str) -> Self {
        let mut preamble = Vec::new();
        let mut sections: Vec<Section> = Vec::new();

        for line in text.split('\n') {
            if let Some(heading) = Heading::parse(line) {
                sections.push(Section {
                    heading,
                    body: Vec::new(),
                });
            } else if let Some(section) = sections.last_mut() {
                section.body.push(line.to_string());
            } else {
                preamble.push(line.to_string());
            }
        }

        Self { preamble, sections }
    }

    pub fn to_text(&self) -> String {
        let mut lines: Vec<&str> = self.preamble.iter().map(String::as_str).collect();
        for section in &self.sections {
            lines.push(section.heading.line());
            lines.extend(section.body.iter().map(String::as_str));
        }
        lines.join("\n")
    }

    /// Every reference in the document, in order
    pub fn references(&self) -> Vec<Reference> {
        self.preamble
            .iter()
            .chain(self.sections.iter().flat_map(|s| s.body.iter()))
            .flat_map(|line| Reference::find_all(line))
            .collect()
    }

    /// First `##` or `###` section titled exactly `name`
    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.section_index(name).map(|i| &self.sections[i])
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| is_component_heading(&s.heading, name))
    }

    /// Insert `reference` and a blank line directly below the component's heading,
    /// keeping the heading's line ending. Returns false when there is no such heading.
    pub fn insert_under_heading(&mut self, name: &str, reference: &Reference) -> bool {
        let Some(index) = self.section_index(name) else {
            return false;
        };
        let section = &mut self.sections[index];
        let eol = if section.heading.line().ends_with('\r') { "\r" } else { "" };
        section.body.insert(0, format!("{}{}", reference.to_line(), eol));
        section.body.insert(1, eol.to_string());
        true
    }

    /// Append a `## name` section holding `reference`.
    /// Same text as appending `"\n## name\n<reference>\n\n"` to the document.
    pub fn append_section(&mut self, name: &str, reference: &Reference) {
        self.sections.push(Section {
            heading: Heading::new(2, name),
            body: vec![reference.to_line(), String::new(), String::new()],
        });
    }
}

fn is_component_heading(heading: &Heading, name: &str) -> bool {
    (heading.level == 2 || heading.level == 3) && heading.name == name
}
