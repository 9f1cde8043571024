use std::collections::HashMap;
use std::f64::consts::PI;

use mosaic_area_core::{AreaBatchRunner, AreaConfig, FrameRange, SkipReason};
use mosaic_frame_model::{
    AreaFamily, BioLandmarks, FrameLayout, FrameTable, LipRegion, Point2D, Quadrant,
    TIMESTAMP_COLUMN,
};

const KAPPA: f64 = 0.552_284_749_8;

/// Counter-clockwise quarter arc of a circle for one region.
fn outer_arc(region: LipRegion, c: Point2D, r: f64) -> Vec<Point2D> {
    let k = KAPPA * r;
    let at = |dx: f64, dy: f64| Point2D::new(c.x + dx, c.y + dy);
    match region {
        LipRegion::UpperRight => vec![at(r, 0.0), at(r, k), at(k, r), at(0.0, r)],
        LipRegion::UpperLeft => vec![at(0.0, r), at(-k, r), at(-r, k), at(-r, 0.0)],
        LipRegion::LowerLeft => vec![at(-r, 0.0), at(-r, -k), at(-k, -r), at(0.0, -r)],
        LipRegion::LowerRight => vec![at(0.0, -r), at(k, -r), at(r, -k), at(r, 0.0)],
    }
}

fn inner_arc(region: LipRegion, c: Point2D, r: f64) -> Vec<Point2D> {
    let at = |dx: f64, dy: f64| Point2D::new(c.x + dx, c.y + dy);
    match region {
        LipRegion::UpperRight => vec![at(r, 0.0), at(r, r), at(0.0, r)],
        LipRegion::UpperLeft => vec![at(0.0, r), at(-r, r), at(-r, 0.0)],
        LipRegion::LowerLeft => vec![at(-r, 0.0), at(-r, -r), at(0.0, -r)],
        LipRegion::LowerRight => vec![at(0.0, -r), at(r, -r), at(r, 0.0)],
    }
}

fn headers(layout: &FrameLayout) -> Vec<String> {
    let mut headers = vec![TIMESTAMP_COLUMN.to_string()];
    headers.extend(layout.outer.required_columns());
    headers.extend(layout.inner.required_columns());
    headers.extend(layout.landmarks.required_columns());
    headers
}

fn mouth_cells(
    layout: &FrameLayout,
    center: Point2D,
    landmarks: &BioLandmarks,
) -> HashMap<String, f64> {
    let mut cells = HashMap::new();
    for (curves, radius, inner) in [(&layout.outer, 20.0, false), (&layout.inner, 8.0, true)] {
        for segment in &curves.segments {
            let points = if inner {
                inner_arc(segment.region, center, radius)
            } else {
                outer_arc(segment.region, center, radius)
            };
            for ((x, y), point) in curves.point_columns(segment).into_iter().zip(points) {
                cells.insert(x, point.x);
                cells.insert(y, point.y);
            }
        }
    }
    let lm = &layout.landmarks;
    for (index, point) in [
        (lm.left_commissure, landmarks.left_commissure),
        (lm.right_commissure, landmarks.right_commissure),
        (lm.philtrum, landmarks.philtrum),
        (lm.lower_lip, landmarks.lower_lip),
    ] {
        cells.insert(format!("{}{index}", lm.x_prefix), point.x);
        cells.insert(format!("{}{index}", lm.y_prefix), point.y);
    }
    cells
}

fn render(headers: &[String], rows: &[HashMap<String, f64>]) -> String {
    let mut csv = headers.join(",");
    csv.push('\n');
    for row in rows {
        let line = headers
            .iter()
            .map(|h| row.get(h).map(|v| v.to_string()).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }
    csv
}

fn oblique_landmarks() -> BioLandmarks {
    BioLandmarks {
        left_commissure: Point2D::new(18.0, 1.0),
        right_commissure: Point2D::new(-22.0, -1.0),
        philtrum: Point2D::new(1.0, -9.0),
        lower_lip: Point2D::new(3.0, 12.0),
    }
}

fn collinear_landmarks() -> BioLandmarks {
    BioLandmarks {
        left_commissure: Point2D::new(10.0, 0.0),
        right_commissure: Point2D::new(-10.0, 0.0),
        philtrum: Point2D::new(-5.0, 0.0),
        lower_lip: Point2D::new(5.0, 0.0),
    }
}

/// Frame 1 is clean, frame 2 has collinear landmarks, frame 3 is missing
/// one outer control point, frame 4 has nothing but a timestamp.
fn sample_table() -> FrameTable {
    let layout = FrameLayout::default();
    let headers = headers(&layout);
    let center = Point2D::new(2.0, -1.0);

    let mut clean = mouth_cells(&layout, center, &oblique_landmarks());
    clean.insert(TIMESTAMP_COLUMN.to_string(), 0.0);

    let mut singular = mouth_cells(&layout, center, &collinear_landmarks());
    singular.insert(TIMESTAMP_COLUMN.to_string(), 0.04);

    let mut malformed = clean.clone();
    malformed.remove("UR_Ax");
    malformed.insert(TIMESTAMP_COLUMN.to_string(), 0.08);

    let mut empty = HashMap::new();
    empty.insert(TIMESTAMP_COLUMN.to_string(), 0.12);

    let csv = render(&headers, &[clean, singular, malformed, empty]);
    FrameTable::from_reader(csv.as_bytes()).expect("synthetic table should parse")
}

#[test]
fn batch_computes_every_family_for_clean_frame() {
    mosaic_common::logging::init_default_logging();
    let table = sample_table();
    let runner = AreaBatchRunner::new(AreaConfig::default());
    let output = runner.run(&table, FrameRange::all());

    let row = &output.rows[0];
    assert_eq!(row.frame, 1);
    assert_eq!(row.timestamp, Some(0.0));
    assert_eq!(row.areas.len(), 4);

    let quad = row.get(AreaFamily::QuadOuter).unwrap();
    let bio = row.get(AreaFamily::BioOuter).unwrap();
    assert!((quad.total - PI * 400.0).abs() < 0.01 * PI * 400.0);
    assert!((quad.total - bio.total).abs() < 1e-9 * quad.total);
    for quadrant in Quadrant::ALL {
        assert!(quad.get(quadrant) > 0.0);
    }
    // Centre sits right of and below the origin.
    assert!(quad.get(Quadrant::Q4) > quad.get(Quadrant::Q2));

    let inner = row.get(AreaFamily::QuadInner).unwrap();
    assert!(inner.total > 0.0 && inner.total < quad.total);
}

#[test]
fn singular_bio_frame_keeps_axis_aligned_families() {
    let table = sample_table();
    let runner = AreaBatchRunner::new(AreaConfig::default());
    let output = runner.run(&table, FrameRange::all());

    let row = output.rows.iter().find(|r| r.frame == 2).unwrap();
    assert!(row.get(AreaFamily::QuadOuter).is_some());
    assert!(row.get(AreaFamily::QuadInner).is_some());
    assert!(row.get(AreaFamily::BioOuter).is_none());
    assert!(row.get(AreaFamily::BioInner).is_none());
    assert_eq!(row.cells(AreaFamily::BioOuter), None);

    let skipped: Vec<_> = output.skipped.iter().filter(|s| s.frame == 2).collect();
    assert_eq!(skipped.len(), 2);
    assert!(skipped.iter().all(|s| s.reason == SkipReason::SingularFrame));

    // Same curves as frame 1, so the image-axis areas agree.
    let clean = output.rows.iter().find(|r| r.frame == 1).unwrap();
    assert_eq!(clean.get(AreaFamily::QuadOuter), row.get(AreaFamily::QuadOuter));
}

#[test]
fn malformed_frames_are_skipped_and_reported() {
    let table = sample_table();
    let runner = AreaBatchRunner::new(AreaConfig::default());
    let output = runner.run(&table, FrameRange::all());

    assert_eq!(output.frames_processed, 4);
    let frames: Vec<u32> = output.rows.iter().map(|r| r.frame).collect();
    assert_eq!(frames, vec![1, 2, 3]);

    let partial = &output.rows[2];
    assert!(partial.get(AreaFamily::QuadOuter).is_none());
    assert!(partial.get(AreaFamily::BioOuter).is_none());
    assert!(partial.get(AreaFamily::QuadInner).is_some());
    assert!(partial.get(AreaFamily::BioInner).is_some());

    let frame3: Vec<_> = output.skipped.iter().filter(|s| s.frame == 3).collect();
    assert_eq!(frame3.len(), 2);
    assert!(frame3
        .iter()
        .all(|s| s.reason == SkipReason::MalformedInput && s.detail.contains("UR_Ax")));

    let frame4 = output.skipped.iter().filter(|s| s.frame == 4).count();
    assert_eq!(frame4, 4);
    assert_eq!(output.skipped.len(), 8);
}

#[test]
fn batch_is_deterministic_across_pools() {
    let table = sample_table();
    let global = AreaBatchRunner::new(AreaConfig::default()).run(&table, FrameRange::all());
    let again = AreaBatchRunner::new(AreaConfig::default()).run(&table, FrameRange::all());
    let pooled = AreaBatchRunner::new(AreaConfig::default())
        .with_threads(2)
        .unwrap()
        .run(&table, FrameRange::all());

    assert_eq!(global, again);
    assert_eq!(global, pooled);
}

#[test]
fn frame_range_selects_rows() {
    let table = sample_table();
    let runner = AreaBatchRunner::new(AreaConfig::default());

    let output = runner.run(&table, FrameRange::new(1, Some(2)));
    assert_eq!(output.frames_processed, 1);
    assert_eq!(output.rows.len(), 1);
    assert_eq!(output.rows[0].frame, 2);

    let clamped = runner.run(&table, FrameRange::new(2, Some(100)));
    assert_eq!(clamped.frames_processed, 2);

    let empty = runner.run(&table, FrameRange::new(3, Some(1)));
    assert!(empty.rows.is_empty() && empty.skipped.is_empty());
}

#[test]
fn family_selection_limits_output() {
    let table = sample_table();
    let config = AreaConfig {
        families: vec![AreaFamily::QuadOuter],
        ..AreaConfig::default()
    };
    let output = AreaBatchRunner::new(config).run(&table, FrameRange::all());

    assert!(output.rows.iter().all(|r| r.areas.len() == 1));
    // Collinear landmarks are irrelevant without a bio family.
    assert!(output.skipped.iter().all(|s| s.frame >= 3));
}

#[test]
fn undecodable_cell_skips_only_its_frame() {
    let layout = FrameLayout::default();
    let headers = headers(&layout);
    let center = Point2D::new(2.0, -1.0);
    let clean = mouth_cells(&layout, center, &oblique_landmarks());

    let mut marked = clean.clone();
    marked.insert("UR_Ax".to_string(), 12345.678);
    let text = render(&headers, &[clean.clone(), marked, clean]);

    let marker = "12345.678";
    let at = text.find(marker).expect("marker cell should be rendered");
    let mut bytes = text[..at].as_bytes().to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(text[at + marker.len()..].as_bytes());

    let table = FrameTable::from_reader(bytes.as_slice()).expect("table should still load");
    let output = AreaBatchRunner::new(AreaConfig::default()).run(&table, FrameRange::all());

    let frames: Vec<u32> = output.rows.iter().map(|r| r.frame).collect();
    assert_eq!(frames, vec![1, 2, 3]);
    assert_eq!(output.rows[0].areas.len(), 4);
    assert_eq!(output.rows[2].areas.len(), 4);
    assert!(output.rows[1].get(AreaFamily::QuadOuter).is_none());
    assert!(output.rows[1].get(AreaFamily::QuadInner).is_some());

    assert_eq!(output.skipped.len(), 2);
    assert!(output
        .skipped
        .iter()
        .all(|s| s.frame == 2 && s.reason == SkipReason::MalformedInput));
}
