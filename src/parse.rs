//! The tolerant, line-oriented deserializer for the save format.
//!
//! The document has no version field and no escapes: a canvas header, zero
//! or more connector records, zero or more box records. Each line is
//! classified by running it through one of the pest rules in `suml.pest`;
//! the first line that fits neither the section we are in nor the next one
//! truncates the parse. Everything read up to that point is kept and the
//! cut is reported, never raised - a half-readable file should load half a
//! diagram, not nothing.

use glam::{DVec2, dvec2};
use miette::{NamedSource, SourceSpan};
use pest::Parser;

use crate::classbox::Section;
use crate::connector::ConnectorKind;
use crate::context::Diagram;
use crate::errors::{DocumentError, Truncation, TruncationReason};
use crate::geometry::Canvas;
use crate::{Rule, SumlParser};

/// Byte offsets at which each line starts, for diagnostic spans.
struct LineMap<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineMap<'a> {
    fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        LineMap { text, starts }
    }

    /// Span covering line `index` (0-based); collapses to the end of the
    /// document when the parse ran out of lines.
    fn span(&self, index: usize, lines: &[&str]) -> SourceSpan {
        match lines.get(index) {
            Some(line) => (self.starts[index], line.len()).into(),
            None => (self.text.len(), 0).into(),
        }
    }

    fn source(&self) -> NamedSource<String> {
        NamedSource::new("diagram", self.text.to_string())
    }
}

/// Parse `"{w} {h}"`.
fn canvas_record(line: &str) -> Option<(f64, f64)> {
    let pair = SumlParser::parse(Rule::canvas_line, line).ok()?.next()?;
    let mut numbers = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| p.as_str().parse::<f64>());
    Some((numbers.next()?.ok()?, numbers.next()?.ok()?))
}

/// Parse a box position line: exactly two numbers.
fn position_record(line: &str) -> Option<(f64, f64)> {
    let pair = SumlParser::parse(Rule::position_line, line).ok()?.next()?;
    let mut numbers = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| p.as_str().parse::<f64>());
    Some((numbers.next()?.ok()?, numbers.next()?.ok()?))
}

/// Parse a connector record: four numbers and a trailing kind name.
fn connector_record(line: &str) -> Option<(DVec2, DVec2, &str)> {
    let pair = SumlParser::parse(Rule::connector_line, line).ok()?.next()?;
    let mut numbers = [0.0f64; 4];
    let mut filled = 0;
    let mut kind = "";
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number if filled < 4 => {
                numbers[filled] = inner.as_str().parse().ok()?;
                filled += 1;
            }
            Rule::kind_name => kind = inner.as_str(),
            _ => {}
        }
    }
    if filled < 4 || kind.is_empty() {
        return None;
    }
    Some((
        dvec2(numbers[0], numbers[1]),
        dvec2(numbers[2], numbers[3]),
        kind,
    ))
}

pub(crate) fn deserialize_into(
    diagram: &mut Diagram,
    text: &str,
) -> Result<Option<Truncation>, DocumentError> {
    if text.trim().is_empty() {
        return Err(DocumentError::EmptySource);
    }

    let map = LineMap::new(text);
    let lines: Vec<&str> = text.lines().collect();

    let (width, height) =
        canvas_record(lines[0]).ok_or_else(|| DocumentError::MalformedHeader {
            src: map.source(),
            span: map.span(0, &lines),
        })?;

    let mut doc = Diagram::with_canvas(Canvas::new(width, height));
    let mut cursor = 1;
    let mut truncation: Option<Truncation> = None;
    let truncate = |cursor: usize, reason: TruncationReason| {
        crate::log::warn!(line = cursor + 1, %reason, "document truncated");
        Truncation {
            line: cursor + 1,
            reason,
            src: map.source(),
            span: map.span(cursor, &lines),
        }
    };

    // Connector section: runs until the first line that is not a complete
    // connector record.
    while cursor < lines.len() {
        let Some((origin, end, kind_name)) = connector_record(lines[cursor]) else {
            break;
        };
        match kind_name.parse::<ConnectorKind>() {
            Ok(kind) => doc.connectors_mut().add_with_ends(kind, origin, end),
            Err(_) => {
                truncation = Some(truncate(cursor, TruncationReason::UnknownKind));
                break;
            }
        }
        cursor += 1;
    }

    // Box section: the line that ended the connector loop is reinterpreted
    // as the first box's position.
    if truncation.is_none() {
        'boxes: while cursor < lines.len() {
            let Some((x, y)) = position_record(lines[cursor]) else {
                truncation = Some(truncate(cursor, TruncationReason::UnrecognizedLine));
                break;
            };
            cursor += 1;
            let canvas = doc.canvas();
            doc.boxes_mut().add(x, y, canvas);

            for section in Section::ALL {
                if lines.get(cursor).copied() != Some("[") {
                    truncation = Some(truncate(cursor, TruncationReason::UnterminatedBox));
                    break 'boxes;
                }
                cursor += 1;

                let mut body: Vec<&str> = Vec::new();
                loop {
                    match lines.get(cursor) {
                        None => {
                            truncation =
                                Some(truncate(cursor, TruncationReason::UnterminatedBox));
                            break 'boxes;
                        }
                        Some(&"]") => {
                            cursor += 1;
                            break;
                        }
                        Some(&line) => {
                            body.push(line);
                            cursor += 1;
                        }
                    }
                }

                if let Some(class_box) = doc.boxes_mut().last_mut() {
                    class_box.set_section_text(section, body.join("\n"), canvas);
                }
            }
        }
    }

    *diagram = doc;
    Ok(truncation)
}
