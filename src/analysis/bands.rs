//! Grouping of blank rows into contiguous bands

/// A maximal run of consecutive candidate rows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Band {
    /// First row of the run
    pub start: u32,
    /// Number of rows in the run
    pub len: u32,
    /// Length relative to the longest band of the same patch, in (0, 1]
    pub rel_size: f64,
}

impl Band {
    /// One past the last row of the run
    pub const fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// Split ascending candidate rows into maximal consecutive runs
///
/// Relative sizes are filled in against the longest run found.
pub fn bands(candidates: &[u32]) -> Vec<Band> {
    let mut runs: Vec<Band> = Vec::new();

    for &row in candidates {
        match runs.last_mut() {
            Some(band) if band.end() == row => band.len += 1,
            _ => runs.push(Band {
                start: row,
                len: 1,
                rel_size: 0.0,
            }),
        }
    }

    let longest = runs.iter().map(|band| band.len).max().unwrap_or(0);
    if longest > 0 {
        for band in &mut runs {
            band.rel_size = f64::from(band.len) / f64::from(longest);
        }
    }

    runs
}
