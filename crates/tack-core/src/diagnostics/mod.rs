use crate::ast::Span;
use serde::Serialize;
use std::fmt;

/// Which front-end stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Parse,
    Name,
    Type,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Parse => "parse",
            DiagnosticKind::Name => "name",
            DiagnosticKind::Type => "type",
        }
    }
}

/// A single text edit suggestion that can be applied to the source
/// Represented using byte spans; mapping to line/column is done by frontends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FixIt {
    /// Replace the text in `span` with `replacement`
    Replace {
        span: Span,
        replacement: String,
        /// Short label for UI like "Insert '}'"
        label: String,
    },
}

impl FixIt {
    pub fn replace(span: Span, replacement: impl Into<String>, label: impl Into<String>) -> Self {
        FixIt::Replace {
            span,
            replacement: replacement.into(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FixIt::Replace { label, .. } => label,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            FixIt::Replace { span, .. } => *span,
        }
    }

    pub fn replacement(&self) -> &str {
        match self {
            FixIt::Replace { replacement, .. } => replacement,
        }
    }
}

/// Diagnostic error code for categorization (e.g., "T0004")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DiagnosticCode {
    /// Code identifier (e.g., "T0004", "N0001")
    pub code: String,
    /// Brief description of the error code
    pub title: String,
}

impl DiagnosticCode {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}

/// Information about a related diagnostic location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    pub message: String,
    pub span: Span,
    pub filename: String,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, span: Span, filename: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
            filename: filename.into(),
        }
    }
}

/// An error message with location and context
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub filename: String,
    pub code: Option<DiagnosticCode>,
    pub related_info: Vec<RelatedInfo>,
    pub help: Option<String>,
    /// Human-friendly suggestions that don't imply an automatic edit
    pub suggestions: Vec<String>,
    /// Machine-applicable edits the user or tooling can apply
    pub fixits: Vec<FixIt>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: String, span: Span, filename: String) -> Self {
        Self {
            kind,
            message,
            span,
            filename,
            code: None,
            related_info: Vec::new(),
            help: None,
            suggestions: Vec::new(),
            fixits: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_related(mut self, related: RelatedInfo) -> Self {
        self.related_info.push(related);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Format the diagnostic with source code snippet
    pub fn format(&self, source: &str) -> String {
        let line_index = LineIndex::new(source);
        let formatter = DiagnosticFormatter {
            diagnostic: self,
            source,
            line_index: &line_index,
        };
        formatter.format()
    }

    /// Machine-readable form with 1-based line/column resolved against `source`
    pub fn to_json(&self, source: &str) -> serde_json::Value {
        let (line, col) = LineIndex::new(source).line_col(self.span.start);
        serde_json::json!({
            "stage": self.kind.as_str(),
            "code": self.code.as_ref().map(|c| c.code.clone()),
            "kind": self.code.as_ref().map(|c| c.title.clone()),
            "message": self.message,
            "file": self.filename,
            "line": line,
            "col": col,
            "span": self.span,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: {} at {}:{}:{}",
            self.message, self.filename, self.span.start, self.span.end
        )
    }
}

/// Line index for efficient offset-to-line/column conversion
#[derive(Debug)]
pub struct LineIndex {
    /// Starting byte offset of each line
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert byte offset to (line, column) (both 1-indexed)
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let col = offset.saturating_sub(line_start);

        (line + 1, col + 1)
    }

    /// Get the byte range for a given line (1-indexed)
    pub fn line_range(&self, line: usize) -> Option<(usize, usize)> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = if line < self.line_starts.len() {
            self.line_starts[line].saturating_sub(1) // Exclude newline
        } else {
            usize::MAX // Last line extends to EOF
        };
        Some((start, end))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Formats a diagnostic with source code snippet
struct DiagnosticFormatter<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
    line_index: &'a LineIndex,
}

impl<'a> DiagnosticFormatter<'a> {
    fn format(&self) -> String {
        let mut output = String::new();

        match &self.diagnostic.code {
            Some(code) => output.push_str(&format!(
                "error[{}]: {}\n",
                code.code, self.diagnostic.message
            )),
            None => output.push_str(&format!("error: {}\n", self.diagnostic.message)),
        }

        let (start_line, start_col) = self.line_index.line_col(self.diagnostic.span.start);
        let (end_line, end_col) = self.line_index.line_col(self.diagnostic.span.end);

        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.diagnostic.filename, start_line, start_col
        ));

        output.push_str(&self.format_snippet(start_line, start_col, end_line, end_col));

        for related in &self.diagnostic.related_info {
            let (line, col) = self.line_index.line_col(related.span.start);
            output.push_str(&format!(
                "note: {} ({}:{}:{})\n",
                related.message, related.filename, line, col
            ));
        }

        if let Some(help) = &self.diagnostic.help {
            output.push_str(&format!("help: {help}\n"));
        }

        for suggestion in &self.diagnostic.suggestions {
            output.push_str(&format!("suggestion: {suggestion}\n"));
        }

        // Fix-its (labels only in CLI formatter)
        for fix in &self.diagnostic.fixits {
            output.push_str(&format!("fix: {}\n", fix.label()));
        }

        output
    }

    fn format_snippet(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> String {
        let mut output = String::new();

        let max_line = end_line.max(start_line);
        let line_num_width = max_line.to_string().len();

        // Show lines with context (1 line before/after)
        let context_start = start_line.saturating_sub(1).max(1);
        let context_end = (end_line + 1).min(self.line_index.line_count());

        output.push_str(&format!("{:width$} |\n", "", width = line_num_width));

        for line_num in context_start..=context_end {
            if let Some((line_start, line_end)) = self.line_index.line_range(line_num) {
                let line_end = line_end.min(self.source.len());
                let line_text = &self.source[line_start..line_end];

                output.push_str(&format!("{line_num:line_num_width$} | {line_text}\n"));

                if line_num >= start_line && line_num <= end_line {
                    output.push_str(&format!("{:width$} | ", "", width = line_num_width));

                    let line_span_start = if line_num == start_line {
                        start_col - 1
                    } else {
                        0
                    };
                    let line_span_end = if line_num == end_line {
                        end_col - 1
                    } else {
                        line_text.chars().count()
                    };

                    for _ in 0..line_span_start {
                        output.push(' ');
                    }

                    let span_width = (line_span_end.saturating_sub(line_span_start)).max(1);
                    output.push('^');
                    for _ in 1..span_width {
                        output.push('~');
                    }

                    output.push('\n');
                }
            }
        }

        output.push_str(&format!("{:width$} |\n", "", width = line_num_width));

        output
    }
}
