/// Rows of ASCII art trimmed to the minimal box enclosing all ink.
///
/// Every row has the same number of characters, and neither the first nor the
/// last row is blank. An empty art (no rows) is a valid, degenerate value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AsciiArt {
    rows: Vec<String>,
}

impl AsciiArt {
    /// Trim raw rows: drop leading and trailing rows made only of `blank`,
    /// then cut every row to the rightmost non-blank column found in any row.
    ///
    /// Columns stay aligned across rows; rows are never trimmed individually.
    pub fn from_raw_rows(rows: Vec<Vec<char>>, blank: char) -> Self {
        let is_blank = |row: &Vec<char>| row.iter().all(|&c| c == blank);

        let Some(first) = rows.iter().position(|r| !is_blank(r)) else {
            return Self::default();
        };
        let last = rows.iter().rposition(|r| !is_blank(r)).unwrap_or(first);

        let kept = &rows[first..=last];
        let max_right = kept
            .iter()
            .map(|r| r.iter().rposition(|&c| c != blank).map_or(0, |i| i + 1))
            .max()
            .unwrap_or(0);

        let rows = kept
            .iter()
            .map(|r| {
                let mut s: String = r.iter().take(max_right).collect();
                // Raw rows shorter than the box are padded so columns line up.
                let len = r.len().min(max_right);
                s.extend(std::iter::repeat_n(blank, max_right - len));
                s
            })
            .collect();
        Self { rows }
    }

    /// The trimmed rows, top to bottom.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Characters per row (the longest row; all rows are equal).
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// `true` when the art has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl std::fmt::Display for AsciiArt {
    /// Rows joined by `\n`, without a trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ascii/art.rs"]
mod tests;
