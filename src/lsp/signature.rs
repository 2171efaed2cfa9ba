//! Signature help selection, formatting and placement

use std::fmt;

use tower_lsp::lsp_types::{ParameterLabel, SignatureHelp, SignatureInformation};

use crate::config::SignaturePalette;
use crate::host::{CursorGeometry, Point, Size, Viewport};
use crate::text::utf16_to_byte_offset;

/// Display role of a label fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Neutral,
    Punctuation,
    Active,
}

impl SpanStyle {
    pub fn color(self, palette: &SignaturePalette) -> u32 {
        match self {
            SpanStyle::Neutral => palette.neutral,
            SpanStyle::Punctuation => palette.punctuation,
            SpanStyle::Active => palette.active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

/// Signature label split into styled fragments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLabel {
    spans: Vec<Span>,
}

impl StyledLabel {
    fn push(&mut self, text: impl Into<String>, style: SpanStyle) {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Text of the active parameter, if any is highlighted
    pub fn active_parameter(&self) -> Option<&str> {
        self.spans
            .iter()
            .find(|span| span.style == SpanStyle::Active)
            .map(|span| span.text.as_str())
    }
}

impl fmt::Display for StyledLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

/// The signature currently on display
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureHelpState {
    pub candidates: Vec<SignatureInformation>,
    pub active_parameter: Option<u32>,
    pub label: StyledLabel,
}

fn parameter_count(signature: &SignatureInformation) -> usize {
    signature.parameters.as_ref().map_or(0, Vec::len)
}

/// Picks the candidate with the most parameters; the first one wins ties.
///
/// Candidates without parameters are never selected.
pub fn select_signature(help: &SignatureHelp) -> Option<&SignatureInformation> {
    let mut best: Option<&SignatureInformation> = None;
    let mut most = 0;

    for signature in &help.signatures {
        let count = parameter_count(signature);
        if count > most {
            most = count;
            best = Some(signature);
        }
    }

    best
}

/// Renders `name(param, param, ...)` with the parameter at `active` highlighted.
///
/// Returns `None` for a label without `(` or a parameter whose offsets do not
/// fall inside the label. An out-of-range `active` highlights nothing.
pub fn format_signature(
    signature: &SignatureInformation,
    active: Option<u32>,
) -> Option<StyledLabel> {
    let name_end = signature.label.find('(')?;

    let mut label = StyledLabel::default();
    label.push(&signature.label[..name_end], SpanStyle::Neutral);
    label.push("(", SpanStyle::Punctuation);

    let parameters = signature.parameters.as_deref().unwrap_or_default();
    for (index, parameter) in parameters.iter().enumerate() {
        if index > 0 {
            label.push(",", SpanStyle::Punctuation);
            label.push(" ", SpanStyle::Neutral);
        }

        let text = parameter_text(&signature.label, &parameter.label)?;
        let style = if active.is_some_and(|active| active as usize == index) {
            SpanStyle::Active
        } else {
            SpanStyle::Neutral
        };
        label.push(text, style);
    }

    label.push(")", SpanStyle::Punctuation);
    Some(label)
}

fn parameter_text<'a>(signature_label: &'a str, label: &'a ParameterLabel) -> Option<&'a str> {
    match label {
        ParameterLabel::Simple(text) => Some(text.as_str()),
        ParameterLabel::LabelOffsets([start, end]) => {
            let from = utf16_to_byte_offset(signature_label, *start)?;
            let to = utf16_to_byte_offset(signature_label, *end)?;
            signature_label.get(from..to)
        }
    }
}

/// Positions the popup centered on the cursor column, above the cursor's
/// line, and clamped inside the viewport.
pub fn place_popup(cursor: CursorGeometry, popup: Size, viewport: Viewport) -> Point {
    let x = cursor.x - popup.width / 2.0;
    let y = viewport.top + cursor.y - cursor.row_height - cursor.scroll_y - popup.height;

    Point {
        x: x.clamp(0.0, (viewport.width - popup.width).max(0.0)),
        y: y.clamp(0.0, (viewport.height - popup.height).max(0.0)),
    }
}
