use serde::Serialize;
use utoipa::ToSchema;

const LEGACY_NAME_MARKER: &str = "0 ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlockShape {
    /// `0 NAME` line followed by both element lines.
    Legacy,
    /// Element lines with no name line.
    Anonymous,
    /// Bare name line followed by both element lines.
    Named,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TleBlock {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub shape: BlockShape,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockScan {
    pub blocks: Vec<TleBlock>,
    /// Non-blank lines seen.
    pub lines: usize,
    /// Lines at which no block shape matched.
    pub skipped_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RejectedRecord {
    pub name: String,
    pub reason: String,
}

/// What happened to the input text during a catalog parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParseDiagnostics {
    pub lines: usize,
    pub blocks: usize,
    pub skipped_lines: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl ParseDiagnostics {
    pub fn accepted(&self) -> usize {
        self.blocks - self.rejected.len()
    }
}

/// Splits raw TLE text into element-set blocks.
///
/// Scanning is lossy: when no shape matches at the cursor the line is
/// skipped and the scan moves on by one line. There is no look-ahead
/// re-synchronization, so a stray line inside a block shifts how the
/// following lines are grouped.
pub fn split_blocks(text: &str) -> BlockScan {
    let lines: Vec<&str> = text
        .trim_start_matches('\u{feff}')
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let is_line1 = |i: usize| lines.get(i).is_some_and(|l| l.starts_with('1'));
    let is_line2 = |i: usize| lines.get(i).is_some_and(|l| l.starts_with('2'));

    let mut scan = BlockScan {
        lines: lines.len(),
        ..Default::default()
    };
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if let Some(name) = line.strip_prefix(LEGACY_NAME_MARKER) {
            if is_line1(i + 1) && is_line2(i + 2) {
                scan.blocks.push(TleBlock {
                    name: name.trim().to_string(),
                    line1: lines[i + 1].to_string(),
                    line2: lines[i + 2].to_string(),
                    shape: BlockShape::Legacy,
                });
                i += 3;
            } else {
                scan.skipped_lines += 1;
                i += 1;
            }
        } else if is_line1(i) && is_line2(i + 1) {
            scan.blocks.push(TleBlock {
                name: format!("UNKNOWN_{}", scan.blocks.len()),
                line1: line.to_string(),
                line2: lines[i + 1].to_string(),
                shape: BlockShape::Anonymous,
            });
            i += 2;
        } else if !is_line1(i) && !is_line2(i) && is_line1(i + 1) && is_line2(i + 2) {
            scan.blocks.push(TleBlock {
                name: line.to_string(),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
                shape: BlockShape::Named,
            });
            i += 3;
        } else {
            log::debug!("skipping unrecognized TLE line {}: {:?}", i, line);
            scan.skipped_lines += 1;
            i += 1;
        }
    }

    scan
}
