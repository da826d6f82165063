//! Tests for uniform row detection, edge trimming and safe cut lookup

#[cfg(test)]
mod tests {
    use crate::support::{BACKGROUND, striped_patch};
    use codequilt::QuiltError;
    use codequilt::analysis::cut_points::{
        Direction, SafeCutSet, analyze_patch, analyze_pixels, raw_cut_points, trim_consecutive,
        uniform_rows,
    };
    use codequilt::io::patch::{MemoryPatch, PatchFile};
    use image::{Rgba, RgbaImage};

    // Leading and trailing runs are both removed, interior rows survive
    // Fails if either trim direction is skipped
    #[test]
    fn test_trims_both_edge_runs() {
        let safe = SafeCutSet::from_candidates(&[0, 1, 2, 5, 6, 9, 10, 11]);
        assert_eq!(safe.rows(), &[5, 6]);
    }

    // A single contiguous run is entirely padding
    // Fails if a whole-list run is kept instead of emptied
    #[test]
    fn test_single_run_trims_to_empty() {
        assert!(trim_consecutive(&[3, 4, 5, 6], Direction::Leading).is_empty());
        assert!(trim_consecutive(&[3, 4, 5, 6], Direction::Trailing).is_empty());
        assert!(SafeCutSet::from_candidates(&[7]).is_empty());
        assert!(SafeCutSet::from_candidates(&[]).is_empty());
    }

    // Each direction only touches its own end
    // Fails if the trailing trim scans forwards
    #[test]
    fn test_trim_directions_are_independent() {
        let candidates = [0, 1, 4, 8, 9];
        assert_eq!(trim_consecutive(&candidates, Direction::Leading), &[4, 8, 9]);
        assert_eq!(trim_consecutive(&candidates, Direction::Trailing), &[0, 1, 4]);
    }

    // Rows not starting at the edge still count as a leading run
    // Fails if trimming only removes runs anchored at row 0
    #[test]
    fn test_leading_run_need_not_start_at_zero() {
        let safe = SafeCutSet::from_candidates(&[2, 3, 10, 20, 30, 31]);
        assert_eq!(safe.rows(), &[10, 20]);
    }

    // Uniform means equal to the first pixel of the row, whatever its color
    // Fails if rows are compared against a fixed background color
    #[test]
    fn test_uniform_rows_compare_against_first_pixel() {
        let mut pixels = RgbaImage::from_pixel(4, 3, BACKGROUND);
        for x in 0..4 {
            pixels.put_pixel(x, 1, Rgba([255, 0, 0, 255]));
        }
        pixels.put_pixel(3, 2, Rgba([0, 0, 0, 255]));

        let mask = uniform_rows(&pixels);
        assert_eq!(mask.len(), 3);
        assert!(mask[0]);
        assert!(mask[1]);
        assert!(!mask[2]);
    }

    // Raw candidates come back in ascending order
    // Fails if the mask is read in reverse
    #[test]
    fn test_raw_cut_points_ascending() {
        let patch = striped_patch("a", 6, 10, &[0, 4, 5, 9]);
        let pixels = patch.into_pixels();
        assert_eq!(raw_cut_points(&pixels), vec![0, 4, 5, 9]);
        assert_eq!(analyze_pixels(&pixels).rows(), &[4, 5]);
    }

    // Zero-area patches are never scanned
    // Fails if an empty patch is read or yields candidates
    #[test]
    fn test_zero_area_patch_is_empty() {
        let patch = MemoryPatch::new("empty", RgbaImage::new(0, 12));
        let safe = analyze_patch(&patch);
        assert!(matches!(safe, Ok(ref s) if s.is_empty()));
        assert!(raw_cut_points(&RgbaImage::new(5, 0)).is_empty());
    }

    // Nearest safe row wins, ties go to the lower row
    // Fails if ties prefer the later row
    #[test]
    fn test_closest_to_breaks_ties_low() {
        let safe = SafeCutSet::from_rows(vec![40, 10, 30]);
        assert_eq!(safe.rows(), &[10, 30, 40]);
        assert_eq!(safe.closest_to(20), Some(10));
        assert_eq!(safe.closest_to(36), Some(40));
        assert_eq!(safe.closest_to(0), Some(10));
        assert_eq!(SafeCutSet::default().closest_to(5), None);
        assert!(safe.contains(30));
        assert!(!safe.contains(31));
    }

    // Restricted lookup only considers rows strictly inside the interval
    // Fails if a row at or behind the cursor is returned
    #[test]
    fn test_closest_between_is_exclusive() {
        let safe = SafeCutSet::from_rows(vec![50, 95, 400, 500]);
        assert_eq!(safe.closest_between(95, 500, 200), Some(400));
        assert_eq!(safe.closest_between(0, 500, 105), Some(95));
        assert_eq!(safe.closest_between(0, 500, 72), Some(50));
        assert_eq!(safe.closest_between(400, 500, 450), None);
        assert_eq!(safe.closest_between(500, 100, 300), None);
        assert_eq!(safe.closest_between(0, 1000, 999), Some(500));
    }

    // Read failures carry the patch identity
    // Fails if the error is returned without the patch name attached
    #[test]
    fn test_unreadable_patch_reports_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.png");
        RgbaImage::from_pixel(3, 3, BACKGROUND).save(&path).unwrap();
        let patch = PatchFile::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        match analyze_patch(&patch) {
            Err(QuiltError::PatchAnalysis { patch: name, .. }) => {
                assert!(name.ends_with("patch.png"));
            }
            other => unreachable!("Expected PatchAnalysis error, got {other:?}"),
        }
    }
}
