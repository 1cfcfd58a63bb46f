//! Page geometry and document containers produced by the extraction layer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LabGridError, Result};
use crate::grid::Grid;

/// Axis-aligned box in page coordinates (origin top-left, `top < bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// True when the point lies strictly inside the box (edges excluded).
    pub fn strictly_contains(&self, x: f64, y: f64) -> bool {
        x > self.x0 && x < self.x1 && y > self.top && y < self.bottom
    }
}

/// A line of text with its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    #[serde(flatten)]
    pub bbox: BBox,
    pub text: String,
}

impl TextLine {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Self {
            bbox,
            text: text.into(),
        }
    }
}

/// A table found on a page. The box is optional because some extractors
/// cannot report table geometry; such tables never receive a new label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTable {
    #[serde(default)]
    pub bbox: Option<BBox>,
    pub grid: Grid,
}

impl PageTable {
    pub fn new(grid: Grid, bbox: Option<BBox>) -> Self {
        Self { bbox, grid }
    }
}

/// One page: tables and text lines. Page numbers are implied by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub tables: Vec<PageTable>,
    #[serde(default)]
    pub text_lines: Vec<TextLine>,
}

impl Page {
    /// Tables ordered top-to-bottom; tables without a box keep their
    /// relative order after the positioned ones.
    pub fn tables_top_to_bottom(&self) -> Vec<&PageTable> {
        let mut tables: Vec<&PageTable> = self.tables.iter().collect();
        tables.sort_by(|a, b| {
            let a_top = a.bbox.map_or(f64::INFINITY, |bbox| bbox.top);
            let b_top = b.bbox.map_or(f64::INFINITY, |bbox| bbox.top);
            a_top.total_cmp(&b_top)
        });
        tables
    }

    /// Page text in reading order, one text line per output line.
    pub fn raw_text(&self) -> String {
        let mut lines: Vec<&TextLine> = self.text_lines.iter().collect();
        lines.sort_by(|a, b| {
            a.bbox
                .top
                .total_cmp(&b.bbox.top)
                .then(a.bbox.x0.total_cmp(&b.bbox.x0))
        });
        lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A paginated document with geometry (PDF-style extraction output).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LabGridError::io(path, e))?;
        Self::from_json_str(&text)
    }
}

/// One block of a word-processor style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowBlock {
    Paragraph(String),
    Table(Grid),
}

/// A document without page geometry: paragraphs and tables in body order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    pub blocks: Vec<FlowBlock>,
}

impl FlowDocument {
    pub fn new(blocks: Vec<FlowBlock>) -> Self {
        Self { blocks }
    }

    pub fn tables(&self) -> impl Iterator<Item = &Grid> {
        self.blocks.iter().filter_map(|block| match block {
            FlowBlock::Table(grid) => Some(grid),
            FlowBlock::Paragraph(_) => None,
        })
    }

    pub fn paragraph_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                FlowBlock::Paragraph(text) => Some(text.as_str()),
                FlowBlock::Table(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LabGridError::io(path, e))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_containment_excludes_edges() {
        let bbox = BBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.strictly_contains(5.0, 5.0));
        assert!(!bbox.strictly_contains(0.0, 5.0));
        assert!(!bbox.strictly_contains(5.0, 10.0));
    }

    #[test]
    fn text_line_uses_flat_coordinates() {
        let line: TextLine =
            serde_json::from_str(r#"{"x0": 1, "top": 2, "x1": 3, "bottom": 4, "text": "A"}"#)
                .unwrap();
        assert_eq!(line.bbox, BBox::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(line.text, "A");
    }

    #[test]
    fn tables_sort_by_top() {
        let page = Page {
            tables: vec![
                PageTable::new(
                    Grid::from_text_rows(vec![vec!["low"]]),
                    Some(BBox::new(0.0, 300.0, 1.0, 400.0)),
                ),
                PageTable::new(Grid::from_text_rows(vec![vec!["none"]]), None),
                PageTable::new(
                    Grid::from_text_rows(vec![vec!["high"]]),
                    Some(BBox::new(0.0, 10.0, 1.0, 50.0)),
                ),
            ],
            text_lines: vec![],
        };
        let order: Vec<_> = page
            .tables_top_to_bottom()
            .iter()
            .map(|t| t.grid.cell(0, 0).unwrap_or_default())
            .collect();
        assert_eq!(order, vec!["high", "low", "none"]);
    }
}
