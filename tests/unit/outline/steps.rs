use super::*;

fn square(size: f64) -> GlyphOutline {
    GlyphOutline::new(vec![
        OutlineCommand::MoveTo(Point::new(0.0, 0.0)),
        OutlineCommand::LineTo(Point::new(size, 0.0)),
        OutlineCommand::LineTo(Point::new(size, size)),
        OutlineCommand::LineTo(Point::new(0.0, size)),
        OutlineCommand::LineTo(Point::new(0.0, 0.0)),
        OutlineCommand::ClosePath,
    ])
}

fn two_steps() -> StepTable {
    StepTable {
        steps: vec![
            Step {
                command_index: 1,
                offset: 0,
                length: 10,
            },
            Step {
                command_index: 2,
                offset: 10,
                length: 15,
            },
        ],
        total_length: 25,
    }
}

fn assert_complete(table: &StepTable) {
    let sum: u32 = table.steps.iter().map(|s| s.length).sum();
    assert_eq!(sum, table.total_length);
    let mut expected_offset = 0;
    for s in &table.steps {
        assert!(s.length > 0);
        assert_eq!(s.offset, expected_offset);
        expected_offset += s.length;
    }
}

#[test]
fn square_produces_one_step_per_side() {
    let table = StepTable::build(&square(10.0));
    assert_eq!(table.total_length, 40);
    assert_eq!(
        table.steps.iter().map(|s| s.command_index).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_complete(&table);
}

#[test]
fn lengths_round_up_to_whole_pixels() {
    let outline = GlyphOutline::new(vec![
        OutlineCommand::MoveTo(Point::new(0.0, 0.0)),
        OutlineCommand::LineTo(Point::new(2.2, 0.0)),
        OutlineCommand::QuadTo(Point::new(5.0, 4.0), Point::new(8.0, 0.0)),
        OutlineCommand::CurveTo(
            Point::new(9.0, 3.0),
            Point::new(12.0, 3.0),
            Point::new(13.0, 0.0),
        ),
    ]);
    let table = StepTable::build(&outline);
    assert_eq!(table.steps.len(), 3);
    assert_eq!(table.steps[0].length, 3);
    assert_complete(&table);
}

#[test]
fn zero_length_segments_move_cursor_without_steps() {
    let outline = GlyphOutline::new(vec![
        OutlineCommand::MoveTo(Point::new(5.0, 5.0)),
        OutlineCommand::LineTo(Point::new(5.0, 5.0)),
        OutlineCommand::LineTo(Point::new(8.0, 9.0)),
        OutlineCommand::ClosePath,
        OutlineCommand::LineTo(Point::new(8.0, 19.0)),
    ]);
    let table = StepTable::build(&outline);
    assert_eq!(table.steps.len(), 2);
    assert_eq!(table.steps[0].command_index, 2);
    assert_eq!(table.steps[0].length, 5);
    // ClosePath leaves the cursor at (8, 9).
    assert_eq!(table.steps[1].command_index, 4);
    assert_eq!(table.steps[1].length, 10);
    assert_eq!(table.total_length, 15);
}

#[test]
fn first_segment_measures_from_origin_without_move() {
    let outline = GlyphOutline::new(vec![OutlineCommand::LineTo(Point::new(3.0, 4.0))]);
    let table = StepTable::build(&outline);
    assert_eq!(table.total_length, 5);
}

#[test]
fn empty_and_move_only_outlines_have_no_steps() {
    assert!(StepTable::build(&GlyphOutline::default()).is_empty());
    let table = StepTable::build(&GlyphOutline::new(vec![
        OutlineCommand::MoveTo(Point::new(1.0, 1.0)),
        OutlineCommand::ClosePath,
    ]));
    assert!(table.is_empty());
    assert_eq!(table.total_length, 0);
    assert_eq!(table.locate(3.0), None);
}

#[test]
fn locate_inside_second_step() {
    let cursor = two_steps().locate(12.0).unwrap();
    assert_eq!(cursor.step, 1);
    assert_eq!(cursor.command_index, 2);
    assert!((cursor.t - 2.0 / 15.0).abs() < 1e-12);
}

#[test]
fn locate_on_step_boundary_completes_previous_step() {
    let cursor = two_steps().locate(10.0).unwrap();
    assert_eq!(cursor.step, 0);
    assert_eq!(cursor.t, 1.0);
}

#[test]
fn locate_clamps_past_end_and_before_start() {
    let table = two_steps();
    let end = table.locate(99.0).unwrap();
    assert_eq!(end.step, 1);
    assert_eq!(end.t, 1.0);

    let start = table.locate(0.5).unwrap();
    assert_eq!(start.step, 0);
    assert!((start.t - 0.05).abs() < 1e-12);
}
