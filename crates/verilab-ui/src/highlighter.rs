//! Verilog syntax highlighting for the editor.
//!
//! Token-level highlighting by pattern matching, one line at a time. Block
//! comments are the only construct that carries state across lines.

use iced::advanced::text::highlighter::{Format, Highlighter};
use iced::{Color, Font};
use std::ops::Range;
use verilab_core::{EditorTheme, SyntaxMode};

use crate::theme::{EditorPalette, SyntaxColors};

/// Settings for the highlighter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HighlightSettings {
    pub mode: SyntaxMode,
    pub theme: EditorTheme,
}

/// Format for highlighted text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightFormat {
    pub color: Color,
}

impl HighlightFormat {
    pub fn to_format(self, _font: Font) -> Format<Font> {
        Format {
            color: Some(self.color),
            font: None,
        }
    }
}

/// Token kind used internally for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Keyword,
    Control,
    Type,
    SystemTask,
    Directive,
    String,
    Number,
    Comment,
    Operator,
    Default,
}

impl TokenKind {
    fn color(self, syntax: &SyntaxColors) -> Color {
        match self {
            Self::Keyword => syntax.keyword,
            Self::Control => syntax.control,
            Self::Type => syntax.type_name,
            Self::SystemTask => syntax.system_task,
            Self::Directive => syntax.directive,
            Self::String => syntax.string,
            Self::Number => syntax.number,
            Self::Comment => syntax.comment,
            Self::Operator => syntax.operator,
            Self::Default => syntax.default,
        }
    }
}

// ============================================================================
// Keyword sets
// ============================================================================

const KEYWORDS: &[&str] = &[
    "module", "endmodule", "macromodule", "primitive", "endprimitive", "function",
    "endfunction", "task", "endtask", "initial", "always", "assign", "deassign",
    "generate", "endgenerate", "genvar", "specify", "endspecify", "table",
    "endtable", "posedge", "negedge", "or", "and", "not", "nand", "nor", "xor",
    "xnor", "buf", "automatic", "signed", "unsigned", "defparam", "force",
    "release", "disable", "fork", "join", "edge", "scalared", "vectored",
];

const CONTROL: &[&str] = &[
    "if", "else", "case", "casex", "casez", "endcase", "default", "for",
    "while", "repeat", "forever", "begin", "end", "wait",
];

const TYPES: &[&str] = &[
    "reg", "wire", "integer", "real", "realtime", "time", "input", "output",
    "inout", "parameter", "localparam", "supply0", "supply1", "tri", "tri0",
    "tri1", "triand", "trior", "wand", "wor", "event", "logic", "bit",
];

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone)]
struct Span {
    range: Range<usize>,
    kind: TokenKind,
}

/// Syntax highlighter for the Verilog editor.
pub struct VerilogHighlighter {
    settings: HighlightSettings,
    syntax: SyntaxColors,
    in_block_comment: bool,
    /// Block-comment state at the start of each highlighted line
    line_states: Vec<bool>,
    spans: Vec<Span>,
    current_line_idx: usize,
}

impl Highlighter for VerilogHighlighter {
    type Settings = HighlightSettings;
    type Highlight = HighlightFormat;
    type Iterator<'a> = std::vec::IntoIter<(Range<usize>, HighlightFormat)> where Self: 'a;

    fn new(settings: &Self::Settings) -> Self {
        Self {
            settings: settings.clone(),
            syntax: EditorPalette::for_theme(settings.theme).syntax,
            in_block_comment: false,
            line_states: Vec::new(),
            spans: Vec::new(),
            current_line_idx: 0,
        }
    }

    fn update(&mut self, new_settings: &Self::Settings) {
        if self.settings != *new_settings {
            self.settings = new_settings.clone();
            self.syntax = EditorPalette::for_theme(new_settings.theme).syntax;
            self.in_block_comment = false;
            self.line_states.clear();
            self.current_line_idx = 0;
        }
    }

    fn change_line(&mut self, line: usize) {
        if line < self.current_line_idx {
            self.current_line_idx = line;
            self.in_block_comment = self.line_states.get(line).copied().unwrap_or(false);
            self.line_states.truncate(line);
        }
    }

    fn highlight_line(&mut self, line: &str) -> Self::Iterator<'_> {
        self.spans.clear();
        self.line_states.truncate(self.current_line_idx);
        self.line_states.push(self.in_block_comment);
        match self.settings.mode {
            SyntaxMode::Verilog => self.tokenize_line(line),
            SyntaxMode::PlainText => {}
        }
        self.current_line_idx += 1;

        if self.spans.is_empty() && !line.is_empty() {
            self.spans.push(Span {
                range: 0..line.len(),
                kind: TokenKind::Default,
            });
        }

        let syntax = self.syntax;
        self.spans
            .iter()
            .map(|s| {
                (
                    s.range.clone(),
                    HighlightFormat {
                        color: s.kind.color(&syntax),
                    },
                )
            })
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn current_line(&self) -> usize {
        self.current_line_idx
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

impl VerilogHighlighter {
    fn push(&mut self, range: Range<usize>, kind: TokenKind) {
        self.spans.push(Span { range, kind });
    }

    fn tokenize_line(&mut self, line: &str) {
        let bytes = line.as_bytes();
        let len = bytes.len();
        let mut i = 0;

        if self.in_block_comment {
            match line.find("*/") {
                Some(pos) => {
                    self.push(0..pos + 2, TokenKind::Comment);
                    self.in_block_comment = false;
                    i = pos + 2;
                }
                None => {
                    self.push(0..len, TokenKind::Comment);
                    return;
                }
            }
        }

        while i < len {
            let b = bytes[i];

            if b.is_ascii_whitespace() {
                let start = i;
                while i < len && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                self.push(start..i, TokenKind::Default);
                continue;
            }

            if line[i..].starts_with("//") {
                self.push(i..len, TokenKind::Comment);
                return;
            }

            if line[i..].starts_with("/*") {
                let start = i;
                match line[i + 2..].find("*/") {
                    Some(pos) => {
                        i = i + 2 + pos + 2;
                        self.push(start..i, TokenKind::Comment);
                        continue;
                    }
                    None => {
                        self.in_block_comment = true;
                        self.push(start..len, TokenKind::Comment);
                        return;
                    }
                }
            }

            if b == b'"' {
                let start = i;
                i += 1;
                while i < len {
                    if bytes[i] == b'\\' && i + 1 < len {
                        i += 2;
                    } else if bytes[i] == b'"' {
                        i += 1;
                        break;
                    } else {
                        i += 1;
                    }
                }
                self.push(start..i.min(len), TokenKind::String);
                continue;
            }

            // System tasks and functions: $display, $finish, ...
            if b == b'$' && i + 1 < len && is_ident_start(bytes[i + 1]) {
                let start = i;
                i += 1;
                while i < len && is_ident_char(bytes[i]) {
                    i += 1;
                }
                self.push(start..i, TokenKind::SystemTask);
                continue;
            }

            // Compiler directives and macro uses: `define, `timescale, `WIDTH
            if b == b'`' {
                let start = i;
                i += 1;
                while i < len && is_ident_char(bytes[i]) {
                    i += 1;
                }
                self.push(start..i, TokenKind::Directive);
                continue;
            }

            // Delays: #5, #(10)
            if b == b'#' && i + 1 < len && bytes[i + 1].is_ascii_digit() {
                let start = i;
                i += 1;
                while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'.' || bytes[i] == b'_') {
                    i += 1;
                }
                self.push(start..i, TokenKind::Number);
                continue;
            }

            // Numbers: 10, 4'b1010, 'hFF, 8'sd3, 1.5e3
            if b.is_ascii_digit() || (b == b'\'' && i + 1 < len && bytes[i + 1].is_ascii_alphabetic()) {
                let start = i;
                while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
                    i += 1;
                }
                if i < len && bytes[i] == b'\'' {
                    i += 1;
                    if i < len && (bytes[i] == b's' || bytes[i] == b'S') {
                        i += 1;
                    }
                    if i < len && matches!(bytes[i], b'b' | b'B' | b'o' | b'O' | b'd' | b'D' | b'h' | b'H') {
                        i += 1;
                    }
                    while i < len
                        && (bytes[i].is_ascii_hexdigit()
                            || matches!(bytes[i], b'_' | b'x' | b'X' | b'z' | b'Z' | b'?'))
                    {
                        i += 1;
                    }
                } else {
                    while i < len && (bytes[i].is_ascii_digit() || matches!(bytes[i], b'.' | b'_' | b'e' | b'E')) {
                        i += 1;
                    }
                }
                self.push(start..i, TokenKind::Number);
                continue;
            }

            if is_ident_start(b) {
                let start = i;
                while i < len && is_ident_char(bytes[i]) {
                    i += 1;
                }
                let word = &line[start..i];
                let kind = if CONTROL.contains(&word) {
                    TokenKind::Control
                } else if KEYWORDS.contains(&word) {
                    TokenKind::Keyword
                } else if TYPES.contains(&word) {
                    TokenKind::Type
                } else {
                    TokenKind::Default
                };
                self.push(start..i, kind);
                continue;
            }

            if b"=+-*/%<>!&|^~?:".contains(&b) {
                let start = i;
                while i < len && b"=+-*/%<>!&|^~?:".contains(&bytes[i]) {
                    // Don't swallow the start of a comment
                    if line[i..].starts_with("//") || line[i..].starts_with("/*") {
                        break;
                    }
                    i += 1;
                }
                if i > start {
                    self.push(start..i, TokenKind::Operator);
                    continue;
                }
            }

            // Punctuation and anything non-ASCII: advance one char
            let start = i;
            i += line[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            self.push(start..i, TokenKind::Default);
        }
    }

    /// Kinds of the spans produced for the last highlighted line.
    #[cfg(test)]
    pub(crate) fn kinds_of(&self, line: &str) -> Vec<(String, TokenKind)> {
        self.spans
            .iter()
            .filter(|s| s.kind != TokenKind::Default || !line[s.range.clone()].trim().is_empty())
            .map(|s| (line[s.range.clone()].to_string(), s.kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verilog() -> VerilogHighlighter {
        VerilogHighlighter::new(&HighlightSettings::default())
    }

    fn kinds(h: &mut VerilogHighlighter, line: &str) -> Vec<(String, TokenKind)> {
        let _ = h.highlight_line(line).count();
        h.kinds_of(line)
    }

    #[test]
    fn test_keywords_and_system_tasks() {
        let mut h = verilog();
        let tokens = kinds(&mut h, r#"  $display("Count = %d", count);"#);
        assert_eq!(tokens[0], ("$display".to_string(), TokenKind::SystemTask));
        assert!(tokens.contains(&("\"Count = %d\"".to_string(), TokenKind::String)));

        let tokens = kinds(&mut h, "module counter;");
        assert_eq!(tokens[0], ("module".to_string(), TokenKind::Keyword));
        assert_eq!(tokens[1], ("counter".to_string(), TokenKind::Default));
    }

    #[test]
    fn test_sized_literals_and_delays() {
        let mut h = verilog();
        let tokens = kinds(&mut h, "#5 count = 4'b1010 + 'hF;");
        assert_eq!(tokens[0], ("#5".to_string(), TokenKind::Number));
        assert!(tokens.contains(&("4'b1010".to_string(), TokenKind::Number)));
        assert!(tokens.contains(&("'hF".to_string(), TokenKind::Number)));
        assert!(tokens.contains(&("=".to_string(), TokenKind::Operator)));
    }

    #[test]
    fn test_types_and_control() {
        let mut h = verilog();
        let tokens = kinds(&mut h, "reg [3:0] count; repeat (10) begin");
        assert_eq!(tokens[0], ("reg".to_string(), TokenKind::Type));
        assert!(tokens.contains(&("repeat".to_string(), TokenKind::Control)));
        assert!(tokens.contains(&("begin".to_string(), TokenKind::Control)));
    }

    #[test]
    fn test_directive() {
        let mut h = verilog();
        let tokens = kinds(&mut h, "`timescale 1ns/1ps");
        assert_eq!(tokens[0], ("`timescale".to_string(), TokenKind::Directive));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut h = verilog();
        let first = kinds(&mut h, "wire a; /* start");
        assert_eq!(first.last().unwrap().1, TokenKind::Comment);

        let middle = kinds(&mut h, "still comment");
        assert_eq!(middle, vec![("still comment".to_string(), TokenKind::Comment)]);

        let last = kinds(&mut h, "end */ wire b;");
        assert_eq!(last[0], ("end */".to_string(), TokenKind::Comment));
        assert!(last.contains(&("wire".to_string(), TokenKind::Type)));
    }

    #[test]
    fn test_going_back_resets_comment_state() {
        let mut h = verilog();
        let _ = kinds(&mut h, "/* open");
        h.change_line(0);
        let tokens = kinds(&mut h, "module m;");
        assert_eq!(tokens[0], ("module".to_string(), TokenKind::Keyword));
    }

    #[test]
    fn test_editing_inside_block_comment_keeps_state() {
        let mut h = verilog();
        let _ = kinds(&mut h, "/* header");
        let _ = kinds(&mut h, "inside");
        let _ = kinds(&mut h, "module not_code;");
        let _ = kinds(&mut h, "*/");

        h.change_line(1);
        assert_eq!(h.current_line(), 1);
        let edited = kinds(&mut h, "inside, edited");
        assert_eq!(edited, vec![("inside, edited".to_string(), TokenKind::Comment)]);
        let next = kinds(&mut h, "module not_code;");
        assert_eq!(next, vec![("module not_code;".to_string(), TokenKind::Comment)]);
    }

    #[test]
    fn test_plain_text_mode_is_one_span() {
        let mut h = VerilogHighlighter::new(&HighlightSettings {
            mode: SyntaxMode::PlainText,
            theme: EditorTheme::Github,
        });
        let spans: Vec<_> = h.highlight_line("module m; endmodule").collect();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].0, 0..19);
    }

    #[test]
    fn test_line_comment_inside_operator_run() {
        let mut h = verilog();
        let tokens = kinds(&mut h, "a =// note");
        assert!(tokens.contains(&("=".to_string(), TokenKind::Operator)));
        assert_eq!(tokens.last().unwrap(), &("// note".to_string(), TokenKind::Comment));
    }
}
