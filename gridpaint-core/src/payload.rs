//! Grid import and export.
//!
//! The export format is a JSON object:
//!
//! ```json
//! {
//!   "rows": 2,
//!   "cols": 2,
//!   "bitmap": [
//!     [0,1],
//!     [1,0]
//!   ]
//! }
//! ```
//!
//! Import accepts that object, any object with some key holding an array of
//! rows, a bare array of rows, or (through [`import_text`]) a loose literal
//! pasted from source code.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::grid::{Grid, PaletteIndex};
use crate::literal::parse_literal;

/// Key the exporter writes the rows under, and the first key import checks.
pub const BITMAP_KEY: &str = "bitmap";

/// Build a grid from an already-decoded JSON value.
pub fn import_value(value: &Value) -> crate::Result<Grid> {
    match value {
        Value::Array(rows) => rows_from_array(rows),
        Value::Object(map) => {
            if let Some(v) = map.get(BITMAP_KEY) {
                return match v {
                    Value::Array(rows) => rows_from_array(rows),
                    _ => Err(CoreError::malformed(format!(
                        "'{BITMAP_KEY}' is not an array of rows"
                    ))),
                };
            }
            let rows = map
                .iter()
                .find_map(|(key, v)| match v {
                    Value::Array(rows) if is_array_of_arrays(rows) => Some((key, rows)),
                    _ => None,
                })
                .map(|(key, rows)| {
                    debug!("Importing grid from key '{key}'");
                    rows
                })
                .ok_or_else(|| CoreError::malformed("no key holds an array of rows"))?;
            rows_from_array(rows)
        }
        _ => Err(CoreError::malformed(
            "expected an array of rows or an object containing one",
        )),
    }
}

/// Parse strict JSON text into a grid.
pub fn import_json(text: &str) -> crate::Result<Grid> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CoreError::parse(format!("invalid JSON: {e}")))?;
    import_value(&value)
}

/// Parse pasted text: strict JSON first, then the lenient literal grammar.
pub fn import_text(text: &str) -> crate::Result<Grid> {
    let result = match serde_json::from_str::<Value>(text) {
        Ok(value) => import_value(&value),
        Err(_) => parse_literal(text).and_then(Grid::from_rows),
    };
    if let Err(e) = &result {
        warn!("Rejected grid import: {e}");
    }
    result
}

#[derive(Serialize)]
struct ExportPayload {
    rows: u32,
    cols: u32,
    bitmap: Vec<Vec<PaletteIndex>>,
}

/// Serialize a grid to the export format, one row per line.
pub fn export_json(grid: &Grid) -> crate::Result<String> {
    let payload = ExportPayload {
        rows: grid.rows(),
        cols: grid.cols(),
        bitmap: grid.to_rows(),
    };
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, RowPerLineFormatter::default());
    payload
        .serialize(&mut ser)
        .map_err(|e| CoreError::Serialization {
            reason: e.to_string(),
        })?;
    out.push(b'\n');
    String::from_utf8(out).map_err(|e| CoreError::Serialization {
        reason: e.to_string(),
    })
}

/// Pretty-prints like [`PrettyFormatter`] except that arrays nested inside
/// another array stay on one line.
#[derive(Default)]
struct RowPerLineFormatter {
    pretty: PrettyFormatter<'static>,
    array_depth: usize,
}

impl RowPerLineFormatter {
    fn inline(&self) -> bool {
        self.array_depth >= 2
    }
}

impl Formatter for RowPerLineFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.array_depth += 1;
        if self.inline() {
            writer.write_all(b"[")
        } else {
            self.pretty.begin_array(writer)
        }
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        let result = if self.inline() {
            writer.write_all(b"]")
        } else {
            self.pretty.end_array(writer)
        };
        self.array_depth -= 1;
        result
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if !self.inline() {
            self.pretty.begin_array_value(writer, first)
        } else if first {
            Ok(())
        } else {
            writer.write_all(b",")
        }
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.inline() {
            Ok(())
        } else {
            self.pretty.end_array_value(writer)
        }
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}

fn is_array_of_arrays(rows: &[Value]) -> bool {
    !rows.is_empty() && rows.iter().all(Value::is_array)
}

fn rows_from_array(rows: &[Value]) -> crate::Result<Grid> {
    if rows.is_empty() {
        return Err(CoreError::malformed("grid has no rows"));
    }
    let parsed = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let cells = row
                .as_array()
                .ok_or_else(|| CoreError::malformed(format!("row {r} is not an array")))?;
            cells
                .iter()
                .enumerate()
                .map(|(c, v)| {
                    v.as_u64()
                        .and_then(|n| PaletteIndex::try_from(n).ok())
                        .ok_or_else(|| {
                            CoreError::malformed(format!(
                                "cell ({r}, {c}) is not a palette index: {v}"
                            ))
                        })
                })
                .collect::<crate::Result<Vec<_>>>()
        })
        .collect::<crate::Result<Vec<_>>>()?;
    Grid::from_rows(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn imports_bare_array() {
        let g = import_value(&json!([[1, 2], [3, 4]])).unwrap();
        assert_eq!(g.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn imports_bitmap_key() {
        let g = import_value(&json!({"bitmap": [[1, 2], [3, 4]]})).unwrap();
        assert_eq!(g.to_rows(), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn imports_any_key_holding_rows() {
        let g = import_value(&json!({"name": "smile", "pixels": [[7]]})).unwrap();
        assert_eq!(g.to_rows(), vec![vec![7]]);
    }

    #[test]
    fn empty_object_is_malformed() {
        assert!(matches!(
            import_value(&json!({})),
            Err(CoreError::MalformedPayload { .. })
        ));
    }

    #[test]
    fn rejects_bad_structures() {
        for v in [
            json!(42),
            json!("[[1]]"),
            json!([]),
            json!([[1, 2], [3]]),
            json!([[1, 2], 3]),
            json!([[1, -2]]),
            json!([[1.5]]),
            json!([[4294967296u64]]),
            json!({"bitmap": "nope", "other": [[1]]}),
        ] {
            assert!(
                matches!(import_value(&v), Err(CoreError::MalformedPayload { .. })),
                "{v} should be malformed"
            );
        }
    }

    #[test]
    fn invalid_json_is_parse_failure() {
        assert!(matches!(
            import_json("{bitmap: [[1]]}"),
            Err(CoreError::ParseFailure { .. })
        ));
    }

    #[test]
    fn import_text_falls_back_to_literal() {
        let g = import_text("const bitmap = [['1', 2], [3, 4],];").unwrap();
        assert_eq!(g.to_rows(), vec![vec![1, 2], vec![3, 4]]);
        let g = import_text("{bitmap: [[0, 1], [1, 0]]}").unwrap();
        assert_eq!(g.to_rows(), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn import_text_applies_shape_rules_to_literals() {
        assert!(matches!(
            import_text("x = [[1, 2], [3]]"),
            Err(CoreError::MalformedPayload { .. })
        ));
        assert!(matches!(
            import_text("nothing to see"),
            Err(CoreError::ParseFailure { .. })
        ));
    }

    #[test]
    fn export_is_valid_json_with_dimensions() {
        let g = Grid::from_rows(vec![vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        let text = export_json(&g).unwrap();
        let v: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["rows"], 2);
        assert_eq!(v["cols"], 3);
        assert_eq!(v["bitmap"], json!([[0, 1, 2], [3, 4, 5]]));
    }

    #[test]
    fn export_round_trips() {
        let g = Grid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        let text = export_json(&g).unwrap();
        assert_eq!(import_json(&text).unwrap(), g);
        assert_eq!(import_text(&text).unwrap(), g);
    }

    #[test]
    fn export_writes_one_row_per_line() {
        let g = Grid::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        let expected = concat!(
            "{\n",
            "  \"rows\": 2,\n",
            "  \"cols\": 2,\n",
            "  \"bitmap\": [\n",
            "    [0,1],\n",
            "    [1,0]\n",
            "  ]\n",
            "}\n",
        );
        assert_eq!(export_json(&g).unwrap(), expected);
    }
}
