//! Minimal single-page PDF writer
//!
//! Pages are drawn by appending raw content-stream operators; [`assemble`]
//! wraps them in a catalog, page tree, one A4 page, two base-14 fonts and
//! a cross-reference table with byte offsets.

pub mod work_order;

use std::fmt::Write as _;

const HEADER: &str = "%PDF-1.4\n";

pub const PAGE_WIDTH: f64 = 595.0;
pub const PAGE_HEIGHT: f64 = 842.0;

/// Regular or bold Helvetica
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Accumulates drawing operators, one per line
#[derive(Debug, Default)]
pub struct ContentStream {
    ops: Vec<String>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, value: &str, x: f64, y: f64, size: f64, font: Font) {
        self.ops.push(format!(
            "BT /{} {} Tf 1 0 0 1 {} {} Tm ({}) Tj ET",
            font.resource(),
            size,
            x,
            y,
            escape(value)
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.ops
            .push(format!("{} w {} {} m {} {} l S", width, x1, y1, x2, y2));
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, border: f64) {
        self.ops
            .push(format!("{} w {} {} {} {} re S", border, x, y, w, h));
    }

    pub fn finish(self) -> String {
        self.ops.join("\n")
    }
}

/// Escapes the characters that delimit PDF literal strings
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Greedy word wrap; a single word longer than the limit keeps its own line
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wraps a content stream into a complete one-page document
pub fn assemble(content: &str) -> Vec<u8> {
    let objects = [
        "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n".to_string(),
        "2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n".to_string(),
        format!(
            "3 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 4 0 R /F2 6 0 R >> >> /Contents 5 0 R >>\nendobj\n",
            PAGE_WIDTH, PAGE_HEIGHT
        ),
        "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>\nendobj\n".to_string(),
        format!(
            "5 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content.len(),
            content
        ),
        "6 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>\nendobj\n".to_string(),
    ];

    let mut out = String::from(HEADER);
    let mut offsets = Vec::with_capacity(objects.len());
    for object in &objects {
        offsets.push(out.len());
        out.push_str(object);
    }

    let xref_start = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        xref_start
    );
    out.into_bytes()
}
