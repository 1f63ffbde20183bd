//! Property tests for segment assembly across whole traverses.

use proptest::prelude::*;

use super::*;

fn bearing_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["N", "S", "Norte", "sur"]),
        0u32..360,
        0u32..60,
        0u32..60,
        prop::sample::select(vec!["E", "O", "W", "oeste"]),
    )
        .prop_map(|(c1, d, m, s, c2)| format!("{c1} {d} {m} {s} {c2}"))
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,3}[A-Da-d]?"
}

fn traverse_strategy() -> impl Strategy<Value = Vec<SegmentInput>> {
    prop::collection::vec(
        (label_strategy(), label_strategy(), bearing_strategy(), any::<bool>()),
        1..8,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(start, end, bearing, chain)| SegmentInput {
                start: if chain { String::new() } else { start },
                end,
                bearing,
                ..Default::default()
            })
            .collect()
    })
}

fn blank() -> SegmentInput {
    SegmentInput {
        start: " ".into(),
        end: "".into(),
        bearing: "\t".into(),
        distance: "".into(),
        adjacency: "  ".into(),
        ..Default::default()
    }
}

proptest! {
    /// Every row after the first renders, and an empty start takes the
    /// previous row's end station.
    #[test]
    fn chained_traverse_renders_every_row(rows in traverse_strategy()) {
        let mut rows = rows;
        if rows[0].start.is_empty() {
            rows[0].start = "1".into();
        }

        let report = assemble(rows.clone(), false);
        prop_assert!(report.errors.is_empty(), "{:?}", report.error_messages());
        prop_assert_eq!(report.segments.len(), rows.len());

        for i in 1..rows.len() {
            if rows[i].start.is_empty() {
                prop_assert_eq!(
                    &report.segments[i].start_label_text,
                    &report.segments[i - 1].end_label_text
                );
            }
        }
    }

    /// Interleaving blank rows changes neither segments nor chaining.
    #[test]
    fn blank_rows_are_invisible(rows in traverse_strategy(), at in any::<prop::sample::Index>()) {
        let mut rows = rows;
        if rows[0].start.is_empty() {
            rows[0].start = "1".into();
        }
        let baseline = assemble(rows.clone(), true);

        let mut padded = rows.clone();
        padded.insert(at.index(rows.len() + 1), blank());
        let report = assemble(padded, true);

        prop_assert_eq!(report.segments, baseline.segments);
        prop_assert!(report.errors.is_empty());
    }

    /// The narrative has one numbered line per segment.
    #[test]
    fn narrative_matches_segments(rows in traverse_strategy()) {
        let report = assemble(rows, true);
        let lines = report.narrative_lines();
        prop_assert_eq!(lines.len(), report.segments.len());
        for (i, line) in lines.iter().enumerate() {
            let prefix = format!("Tramo {}: De la estación ", i + 1);
            prop_assert!(line.starts_with(&prefix));
        }
    }
}

#[test]
fn two_row_chain_from_columns() {
    let columns = SegmentColumns {
        start_labels: vec!["1A".into(), "".into()],
        end_labels: vec!["2B".into(), "3C".into()],
        bearings: vec!["N 10 0 0 O".into(), "N 10 0 0 O".into()],
        ..Default::default()
    };
    let report = assemble(columns.rows(), true);

    assert!(report.errors.is_empty());
    assert_eq!(report.segments[1].start_label_text, "dos B");
    assert_eq!(report.segments[1].end_label_text, "tres C");
}

#[test]
fn all_blank_rows_yield_single_error() {
    let report = assemble(vec![blank(), blank()], true);
    assert!(report.segments.is_empty());
    assert_eq!(
        report.error_messages(),
        vec!["Agrega al menos un tramo.".to_string()]
    );
}
