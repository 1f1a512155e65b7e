use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::element::Element;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Expected {expected} atoms but the file ends after {found}")]
    Truncated { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidCount(String),
    #[error("Unexpected trailing text '{0}'")]
    TrailingText(String),
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("An atom line needs an element and three coordinates, optionally followed by a three-component gradient; found {0} fields")]
    FieldCount(usize),
}

/// The plain XYZ format: an atom count line, a free-text description line and
/// one `Element x y z` line per atom.
///
/// Atom lines may carry three trailing gradient components, which are ignored.
/// Blank lines after the last atom are accepted; anything else is an error.
pub struct XyzFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Count,
    Description,
    Atoms { remaining: usize },
    End,
}

fn parse_error(line: usize, kind: XyzParseErrorKind) -> XyzError {
    XyzError::Parse { line, kind }
}

fn parse_count(text: &str, line: usize) -> Result<usize, XyzError> {
    let mut fields = text.split_whitespace();
    let first = fields.next().unwrap_or("");
    let count = first
        .parse::<usize>()
        .map_err(|_| parse_error(line, XyzParseErrorKind::InvalidCount(first.to_string())))?;
    if let Some(extra) = fields.next() {
        return Err(parse_error(
            line,
            XyzParseErrorKind::TrailingText(extra.to_string()),
        ));
    }
    Ok(count)
}

fn parse_atom(text: &str, line: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 7 {
        return Err(parse_error(line, XyzParseErrorKind::FieldCount(fields.len())));
    }
    let element: Element = fields[0]
        .parse()
        .map_err(|_| parse_error(line, XyzParseErrorKind::UnknownElement(fields[0].to_string())))?;

    let mut values = [0.0f64; 7];
    for (slot, field) in values.iter_mut().zip(&fields[1..]) {
        *slot = field.parse().map_err(|_| {
            parse_error(line, XyzParseErrorKind::InvalidCoordinate(field.to_string()))
        })?;
    }
    Ok(Atom::new(element, Point3::new(values[0], values[1], values[2])))
}

impl MolecularFile for XyzFile {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let mut structure = Structure::default();
        let mut expected = 0;
        let mut phase = Phase::Count;

        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = line_index + 1;
            phase = match phase {
                Phase::Count => {
                    expected = parse_count(&line, line_num)?;
                    Phase::Description
                }
                Phase::Description => {
                    structure.set_description(line.trim_end());
                    if expected == 0 {
                        Phase::End
                    } else {
                        Phase::Atoms {
                            remaining: expected,
                        }
                    }
                }
                Phase::Atoms { remaining } => {
                    structure.add_atom(parse_atom(&line, line_num)?);
                    if remaining == 1 {
                        Phase::End
                    } else {
                        Phase::Atoms {
                            remaining: remaining - 1,
                        }
                    }
                }
                Phase::End => {
                    if let Some(text) = line.split_whitespace().next() {
                        return Err(parse_error(
                            line_num,
                            XyzParseErrorKind::TrailingText(text.to_string()),
                        ));
                    }
                    Phase::End
                }
            };
        }

        if phase != Phase::End {
            return Err(XyzError::Truncated {
                expected,
                found: structure.len(),
            });
        }
        Ok(structure)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.len())?;
        writeln!(writer, "{}", structure.description())?;
        for (_, atom) in structure.atoms_iter() {
            let p = &atom.position;
            writeln!(
                writer,
                "{} {:.5} {:.5} {:.5}",
                atom.element, p.x, p.y, p.z
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER: &str = "3\nwater molecule\nO 0.0 0.0 0.0\nH 0.9572 0.0 0.0\nH -0.2399 0.9266 0.0\n";

    fn read(text: &str) -> Result<Structure, XyzError> {
        XyzFile::read_from(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn reads_atoms_and_description() {
        let water = read(WATER).unwrap();

        assert_eq!(water.len(), 3);
        assert_eq!(water.description(), "water molecule");
        let elements: Vec<Element> = water.atoms_iter().map(|(_, a)| a.element).collect();
        assert_eq!(elements, vec![Element::O, Element::H, Element::H]);
        let (_, last) = water.atoms_iter().last().unwrap();
        assert_eq!(last.position, Point3::new(-0.2399, 0.9266, 0.0));
        assert_eq!(water.bond_count(), 0);
    }

    #[test]
    fn accepts_gradient_columns_and_trailing_blank_lines() {
        let text = "1\n\nC 1.0 2.0 3.0 0.1 0.2 0.3\n\n   \n";
        let structure = read(text).unwrap();
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.description(), "");
    }

    #[test]
    fn accepts_empty_structure() {
        let structure = read("0\nnothing here\n").unwrap();
        assert!(structure.is_empty());
    }

    #[test]
    fn rejects_garbage_after_count() {
        let err = read("3 atoms\nwater\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse { line: 1, kind: XyzParseErrorKind::TrailingText(_) }
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = read("1\n\nC 1.0 2.0 3.0 0.1\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse { line: 3, kind: XyzParseErrorKind::FieldCount(5) }
        ));
    }

    #[test]
    fn rejects_unknown_element_and_bad_coordinates() {
        assert!(matches!(
            read("1\n\nQq 1.0 2.0 3.0\n").unwrap_err(),
            XyzError::Parse { kind: XyzParseErrorKind::UnknownElement(_), .. }
        ));
        assert!(matches!(
            read("1\n\nC 1.0 two 3.0\n").unwrap_err(),
            XyzError::Parse { kind: XyzParseErrorKind::InvalidCoordinate(_), .. }
        ));
    }

    #[test]
    fn rejects_trailing_text_after_atoms() {
        let text = format!("{WATER}H 1.0 1.0 1.0\n");
        assert!(matches!(
            read(&text).unwrap_err(),
            XyzError::Parse { line: 6, kind: XyzParseErrorKind::TrailingText(_) }
        ));
    }

    #[test]
    fn reports_truncated_files() {
        let err = read("3\nwater\nO 0 0 0\n").unwrap_err();
        assert!(matches!(err, XyzError::Truncated { expected: 3, found: 1 }));
    }

    #[test]
    fn writes_five_decimal_places() {
        let water = read(WATER).unwrap();
        let mut out = Vec::new();
        XyzFile::write_to(&water, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "water molecule");
        assert_eq!(lines[2], "O 0.00000 0.00000 0.00000");
        assert_eq!(lines[4], "H -0.23990 0.92660 0.00000");
    }

    #[test]
    fn path_helpers_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("water.xyz");
        let water = read(WATER).unwrap();

        XyzFile::write_to_path(&water, &path).unwrap();
        let reread = XyzFile::read_from_path(&path).unwrap();

        assert!(water.is_equal(&reread));
        assert_eq!(reread.description(), "water molecule");
    }
}
