//! Tests for greedy column filling, partition completeness and stall detection

#[cfg(test)]
mod tests {
    use codequilt::QuiltError;
    use codequilt::analysis::cut_points::SafeCutSet;
    use codequilt::layout::chunking::{Chunk, Column, PatchExtent, chunk};

    fn extent<'a>(name: &'a str, height: u32, cut_points: &'a SafeCutSet) -> PatchExtent<'a> {
        PatchExtent {
            name,
            height,
            cut_points,
        }
    }

    fn chunks_of(columns: &[Column], patch: usize) -> Vec<Chunk> {
        columns
            .iter()
            .flat_map(|column| column.chunks().iter().copied())
            .filter(|chunk| chunk.patch == patch)
            .collect()
    }

    // Patches that fit are stacked whole in one column
    // Fails if a new column opens before the current one is full
    #[test]
    fn test_whole_patches_share_a_column() {
        let none = SafeCutSet::default();
        let patches = [extent("a", 40, &none), extent("b", 50, &none)];

        let columns = chunk(100, &patches).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].content_height(), 90);
        assert_eq!(columns[0].dangling(100), 10);
        assert_eq!(
            columns[0].chunks(),
            &[
                Chunk { patch: 0, start: 0, stop: 40 },
                Chunk { patch: 1, start: 0, stop: 50 },
            ]
        );
    }

    // A filled column forces the next patch into a new one
    // Fails if a zero-space column keeps receiving chunks
    #[test]
    fn test_exact_fill_opens_new_column() {
        let none = SafeCutSet::default();
        let patches = [extent("a", 100, &none), extent("b", 30, &none)];

        let columns = chunk(100, &patches).unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[1].chunks(), &[Chunk { patch: 1, start: 0, stop: 30 }]);
    }

    // Tall patches split at the safe row nearest the ideal break
    // Fails if the split ignores the safe cut set
    #[test]
    fn test_split_at_nearest_safe_row() {
        let cuts = SafeCutSet::from_rows(vec![45, 70, 130, 160]);
        let none = SafeCutSet::default();
        let patches = [extent("a", 30, &none), extent("b", 200, &cuts)];

        let columns = chunk(100, &patches).unwrap();
        // Ideal break for "b" is row 70 in the first column, then 170
        assert_eq!(
            chunks_of(&columns, 1),
            vec![
                Chunk { patch: 1, start: 0, stop: 70 },
                Chunk { patch: 1, start: 70, stop: 160 },
                Chunk { patch: 1, start: 160, stop: 200 },
            ]
        );
        assert_eq!(columns.len(), 3);
    }

    // Splits may overshoot the ideal row, giving negative dangling space
    // Fails if dangling space saturates at zero
    #[test]
    fn test_overshooting_split_counts_negative() {
        let cuts = SafeCutSet::from_rows(vec![110]);
        let patches = [extent("a", 150, &cuts)];

        let columns = chunk(100, &patches).unwrap();
        assert_eq!(columns[0].content_height(), 110);
        assert_eq!(columns[0].dangling(100), -10);
    }

    // Every patch is partitioned exactly and non-final stops are safe rows
    // Fails if rows are dropped or duplicated across a split
    #[test]
    fn test_partition_and_safe_split_invariants() {
        let cut_sets = [
            SafeCutSet::from_rows((10..300).step_by(17).collect()),
            SafeCutSet::from_rows((5..120).step_by(9).collect()),
            SafeCutSet::from_rows(vec![]),
            SafeCutSet::from_rows((20..500).step_by(23).collect()),
        ];
        let heights = [310, 125, 60, 505];
        let names = ["a", "b", "c", "d"];
        let patches: Vec<PatchExtent<'_>> = (0..4)
            .map(|i| extent(names[i], heights[i], &cut_sets[i]))
            .collect();

        let columns = chunk(137, &patches).unwrap();

        for (index, patch) in patches.iter().enumerate() {
            let pieces = chunks_of(&columns, index);
            assert_eq!(pieces.first().map(|c| c.start), Some(0));
            assert_eq!(pieces.last().map(|c| c.stop), Some(patch.height));
            for pair in pieces.windows(2) {
                assert_eq!(pair[0].stop, pair[1].start);
                assert!(patch.cut_points.contains(pair[0].stop));
            }
            assert!(pieces.iter().all(|c| c.stop > c.start));
        }
    }

    // Patch order never changes across columns
    // Fails if chunks are reordered to improve packing
    #[test]
    fn test_order_preserved() {
        let cuts = SafeCutSet::from_rows((8..400).step_by(8).collect());
        let patches: Vec<PatchExtent<'_>> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .zip([90, 210, 35, 160, 75])
            .map(|(name, height)| extent(name, height, &cuts))
            .collect();

        let columns = chunk(120, &patches).unwrap();
        let order: Vec<usize> = columns
            .iter()
            .flat_map(|column| column.chunks().iter().map(|c| c.patch))
            .collect();
        assert!(order.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    // No safe row ahead of the cursor is an error, not an endless loop
    // Fails if the chunker spins opening empty columns
    #[test]
    fn test_stall_reports_unsafe_split() {
        let cuts = SafeCutSet::from_rows(vec![50]);
        let patches = [extent("wall", 300, &cuts)];

        match chunk(100, &patches) {
            Err(QuiltError::UnsafeSplit {
                patch,
                start,
                ideal_row,
            }) => {
                assert_eq!(patch, "wall");
                assert_eq!(start, 50);
                assert_eq!(ideal_row, 150);
            }
            other => unreachable!("Expected UnsafeSplit, got {other:?}"),
        }
    }

    // A nearer cut behind the cursor does not hide a later safe row
    // Fails if the split ignores safe rows past the cursor when the nearest lies behind it
    #[test]
    fn test_split_skips_cuts_behind_cursor() {
        let cuts = SafeCutSet::from_rows(vec![50, 95, 400]);
        let patches = [extent("p", 500, &cuts)];

        let columns = chunk(105, &patches).unwrap();
        assert_eq!(
            chunks_of(&columns, 0),
            vec![
                Chunk { patch: 0, start: 0, stop: 95 },
                Chunk { patch: 0, start: 95, stop: 400 },
                Chunk { patch: 0, start: 400, stop: 500 },
            ]
        );
        assert_eq!(columns[1].dangling(105), -200);
    }

    // Inverted ranges have no length
    #[test]
    fn test_inverted_chunk_has_no_length() {
        let inverted = Chunk { patch: 0, start: 9, stop: 4 };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());

        let column: Column = [inverted].into_iter().collect();
        assert_eq!(column.content_height(), 0);
    }

    // A tall patch without any interior blank rows cannot be split
    #[test]
    fn test_empty_cut_set_cannot_split() {
        let none = SafeCutSet::default();
        let patches = [extent("solid", 101, &none)];
        assert!(matches!(
            chunk(100, &patches),
            Err(QuiltError::UnsafeSplit { start: 0, .. })
        ));
    }

    // Zero target height is rejected up front
    #[test]
    fn test_zero_target_is_degenerate() {
        let none = SafeCutSet::default();
        let patches = [extent("a", 10, &none)];
        assert!(matches!(
            chunk(0, &patches),
            Err(QuiltError::DegenerateGeometry { .. })
        ));
    }

    // Zero-height patches contribute no chunk
    // Fails if an empty chunk is emitted
    #[test]
    fn test_zero_height_patch_emits_nothing() {
        let none = SafeCutSet::default();
        let patches = [extent("a", 20, &none), extent("b", 0, &none), extent("c", 20, &none)];

        let columns = chunk(100, &patches).unwrap();
        assert!(chunks_of(&columns, 1).is_empty());
        assert_eq!(columns[0].chunks().len(), 2);
        assert_eq!(columns[0].padded_height(5), 45);
    }
}
