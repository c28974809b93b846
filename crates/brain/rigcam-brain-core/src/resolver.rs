//! Blend definition resolution.
//!
//! Lookup order for a (from, to) camera pair: custom table rows (empty-string
//! names act as "any" wildcards, more specific rows win), then the default
//! definition, then an optional global override hook that may replace the
//! result unconditionally (hosts use it to force cuts while scrubbing).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{BlendCurve, BlendDefinition};

/// Wildcard camera name matching any camera.
pub const ANY_CAMERA: &str = "";

/// One custom blend table entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendRow {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub curve: BlendCurve,
    pub duration: f32,
}

impl BlendRow {
    fn definition(&self) -> BlendDefinition {
        BlendDefinition::new(self.curve.clone(), self.duration)
    }

    /// Match specificity: 2 for exact/exact, 1 for one wildcard, 0 for
    /// any/any, None for no match.
    fn score(&self, from: &str, to: &str) -> Option<u8> {
        let mut score = 0;
        if self.from == from {
            score += 1;
        } else if self.from != ANY_CAMERA {
            return None;
        }
        if self.to == to {
            score += 1;
        } else if self.to != ANY_CAMERA {
            return None;
        }
        Some(score)
    }
}

/// Errors surfaced by the JSON table loader. Tick-time resolution itself
/// never fails.
#[derive(Debug, Error)]
pub enum BlendTableError {
    #[error("invalid blend table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("blend row {index}: duration must be finite and >= 0 (got {duration})")]
    BadDuration { index: usize, duration: f32 },
}

/// Parse and validate a JSON array of blend rows.
pub fn parse_blend_table_json(json: &str) -> Result<Vec<BlendRow>, BlendTableError> {
    let rows: Vec<BlendRow> = serde_json::from_str(json)?;
    for (index, row) in rows.iter().enumerate() {
        if !row.duration.is_finite() || row.duration < 0.0 {
            return Err(BlendTableError::BadDuration {
                index,
                duration: row.duration,
            });
        }
    }
    Ok(rows)
}

/// Per-pair blend settings with default fallback and override hook.
pub struct BlendTable {
    rows: Vec<BlendRow>,
    pub default_def: BlendDefinition,
    hook: Option<Box<dyn FnMut(&str, &str, BlendDefinition) -> BlendDefinition>>,
}

impl std::fmt::Debug for BlendTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlendTable")
            .field("rows", &self.rows)
            .field("default_def", &self.default_def)
            .field("hook", &self.hook.as_ref().map(|_| "..."))
            .finish()
    }
}

impl BlendTable {
    pub fn new(default_def: BlendDefinition) -> Self {
        Self {
            rows: Vec::new(),
            default_def,
            hook: None,
        }
    }

    pub fn push_row(&mut self, row: BlendRow) {
        self.rows.push(row);
    }

    pub fn set_rows(&mut self, rows: Vec<BlendRow>) {
        self.rows = rows;
    }

    /// Install (or clear) the global override hook.
    pub fn set_hook(
        &mut self,
        hook: Option<Box<dyn FnMut(&str, &str, BlendDefinition) -> BlendDefinition>>,
    ) {
        self.hook = hook;
    }

    /// Resolve the blend for a transition. The most specific matching row
    /// wins; earlier rows win ties; the hook gets the last word.
    pub fn resolve(&mut self, from: &str, to: &str) -> BlendDefinition {
        let mut best: Option<(u8, &BlendRow)> = None;
        for row in &self.rows {
            if let Some(score) = row.score(from, to) {
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((score, row));
                }
            }
        }
        let mut def = best
            .map(|(_, row)| row.definition())
            .unwrap_or_else(|| self.default_def.clone());
        if let Some(hook) = &mut self.hook {
            def = hook(from, to, def);
        }
        def
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_row_beats_wildcard() {
        let mut table = BlendTable::new(BlendDefinition::default());
        table.push_row(BlendRow {
            from: ANY_CAMERA.into(),
            to: "B".into(),
            curve: BlendCurve::Linear,
            duration: 5.0,
        });
        table.push_row(BlendRow {
            from: "A".into(),
            to: "B".into(),
            curve: BlendCurve::Linear,
            duration: 1.0,
        });
        assert_eq!(table.resolve("A", "B").duration, 1.0);
        assert_eq!(table.resolve("C", "B").duration, 5.0);
    }

    #[test]
    fn default_when_no_row_matches() {
        let mut table = BlendTable::new(BlendDefinition::new(BlendCurve::Linear, 3.0));
        assert_eq!(table.resolve("A", "B").duration, 3.0);
    }

    #[test]
    fn hook_gets_last_word() {
        let mut table = BlendTable::new(BlendDefinition::default());
        table.set_hook(Some(Box::new(|_, _, _| BlendDefinition::cut())));
        assert!(table.resolve("A", "B").is_cut());
    }

    #[test]
    fn loader_rejects_bad_duration() {
        let json = r#"[{"from":"A","to":"B","curve":"Linear","duration":-1.0}]"#;
        assert!(matches!(
            parse_blend_table_json(json),
            Err(BlendTableError::BadDuration { index: 0, .. })
        ));
    }

    #[test]
    fn loader_accepts_wildcard_rows() {
        let json = r#"[{"to":"B","curve":"EaseInOut","duration":2.5}]"#;
        let rows = parse_blend_table_json(json).expect("valid table");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].from, ANY_CAMERA);
        assert_eq!(rows[0].duration, 2.5);
    }
}
