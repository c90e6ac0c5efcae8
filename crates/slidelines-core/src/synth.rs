//! Ruled page synthesis
//!
//! Computes evenly spaced horizontal rules for a page of a given size and
//! renders them as a PDF content stream.

use crate::error::{Result, SlidelinesError};
use crate::layout::LayoutParams;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::debug;

/// One horizontal segment on a ruled page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleLine {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
}

/// A synthesized page of horizontal rules
#[derive(Debug, Clone, PartialEq)]
pub struct RuledPage {
    width: f64,
    height: f64,
    line_thickness: f64,
    lines: Vec<RuleLine>,
}

/// Build a ruled page of `width` x `height` points.
///
/// Lines start at `vert_margin + line_thickness` and advance by
/// `height / num_lines` while strictly below
/// `height - (line_thickness + vert_margin)`. Margins and thickness can
/// therefore leave room for fewer than `num_lines` rules.
pub fn synthesize_ruled_page(width: f64, height: f64, params: &LayoutParams) -> Result<RuledPage> {
    if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
        return Err(SlidelinesError::InvalidParameter(format!(
            "page dimensions must be positive, got {} x {}",
            width, height
        )));
    }

    let x_start = params.horiz_margin();
    let x_end = width - params.horiz_margin();
    if x_end <= x_start {
        return Err(SlidelinesError::InvalidParameter(format!(
            "horizontal margin {} leaves no room on a page {} wide",
            params.horiz_margin(),
            width
        )));
    }

    let thickness = params.line_thickness();
    let line_gap = height / f64::from(params.num_lines());
    let limit = height - (thickness + params.vert_margin());

    let mut y = params.vert_margin() + thickness;
    // sized from the band actually available, not the requested count
    let fits = ((limit - y) / line_gap).ceil().max(0.0);
    let mut lines = Vec::with_capacity(fits.min(f64::from(params.num_lines())) as usize);
    while y < limit {
        lines.push(RuleLine { y, x_start, x_end });
        y += line_gap;
    }

    debug!(
        width,
        height,
        requested = params.num_lines(),
        drawn = lines.len(),
        "synthesized ruled page"
    );

    Ok(RuledPage {
        width,
        height,
        line_thickness: thickness,
        lines,
    })
}

impl RuledPage {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn line_thickness(&self) -> f64 {
        self.line_thickness
    }

    pub fn lines(&self) -> &[RuleLine] {
        &self.lines
    }

    /// MediaBox array for this page, anchored at the origin
    pub fn media_box(&self) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.width as f32),
            Object::Real(self.height as f32),
        ])
    }

    /// Content stream operations: set the stroke width once, then
    /// move/line/stroke per rule. Coordinates are written as PDF reals, so
    /// they carry `f32` precision rather than the `f64` of [`RuleLine`].
    pub fn content(&self) -> Content {
        let mut operations = Vec::with_capacity(1 + self.lines.len() * 3);
        operations.push(Operation::new(
            "w",
            vec![Object::Real(self.line_thickness as f32)],
        ));
        for line in &self.lines {
            let y = Object::Real(line.y as f32);
            operations.push(Operation::new(
                "m",
                vec![Object::Real(line.x_start as f32), y.clone()],
            ));
            operations.push(Operation::new(
                "l",
                vec![Object::Real(line.x_end as f32), y],
            ));
            operations.push(Operation::new("S", vec![]));
        }
        Content { operations }
    }

    /// Encoded content stream, ready to be added to a document
    pub fn content_stream(&self) -> Result<Stream> {
        let encoded = self
            .content()
            .encode()
            .map_err(|e| SlidelinesError::OperationError(format!("encode content: {}", e)))?;
        Ok(Stream::new(Dictionary::new(), encoded))
    }

    /// Standalone single-page PDF containing only this ruled page
    pub fn to_document(&self) -> Result<Document> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let content_id = doc.add_object(self.content_stream()?);
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("MediaBox", self.media_box()),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(1)),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(n: i64, h_margin: f64, v_margin: f64, thickness: f64) -> LayoutParams {
        LayoutParams::new(n, h_margin, v_margin, thickness).unwrap()
    }

    #[test]
    fn test_letter_page_seven_lines() {
        let page = synthesize_ruled_page(612.0, 792.0, &params(7, 0.0, 0.0, 1.0)).unwrap();
        let gap = 792.0 / 7.0;

        assert_eq!(page.lines().len(), 7);
        for (i, line) in page.lines().iter().enumerate() {
            let expected = 1.0 + gap * i as f64;
            assert!(
                (line.y - expected).abs() < 1e-9,
                "line {} at {} expected {}",
                i,
                line.y,
                expected
            );
            assert_eq!(line.x_start, 0.0);
            assert_eq!(line.x_end, 612.0);
        }
        assert_eq!(page.lines()[0].y, 1.0);
        assert!(page.lines()[6].y < 791.0);
        assert!((page.lines()[1].y - 114.142_857).abs() < 1e-5);
    }

    #[test]
    fn test_margins_shorten_and_offset_lines() {
        let page = synthesize_ruled_page(600.0, 800.0, &params(4, 50.0, 20.0, 2.0)).unwrap();

        // start 22, gap 200, limit 778: 22, 222, 422, 622
        let ys: Vec<f64> = page.lines().iter().map(|l| l.y).collect();
        assert_eq!(ys, vec![22.0, 222.0, 422.0, 622.0]);
        assert!(page
            .lines()
            .iter()
            .all(|l| l.x_start == 50.0 && l.x_end == 550.0));
    }

    #[test]
    fn test_large_margins_draw_fewer_lines() {
        // start 301, gap 100, limit 499: 301, 401
        let page = synthesize_ruled_page(612.0, 800.0, &params(8, 0.0, 300.0, 1.0)).unwrap();
        assert_eq!(page.lines().len(), 2);
    }

    #[test]
    fn test_margins_consuming_page_draw_nothing() {
        let page = synthesize_ruled_page(612.0, 100.0, &params(5, 0.0, 60.0, 1.0)).unwrap();
        assert!(page.lines().is_empty());
    }

    #[test]
    fn test_huge_line_count_with_no_room_draws_nothing() {
        let page =
            synthesize_ruled_page(612.0, 792.0, &params(4_000_000_000, 0.0, 400.0, 1.0)).unwrap();
        assert!(page.lines().is_empty());
    }

    #[test]
    fn test_huge_line_count_is_bounded_by_page() {
        // gap 2^-17 is exact: start 1, limit 7, so 6 * 2^17 rules
        let page = synthesize_ruled_page(612.0, 8.0, &params(1 << 20, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(page.lines().len(), 6 << 17);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let p = params(7, 0.0, 0.0, 1.0);
        assert!(matches!(
            synthesize_ruled_page(-612.0, 792.0, &p),
            Err(SlidelinesError::InvalidParameter(_))
        ));
        assert!(matches!(
            synthesize_ruled_page(612.0, 0.0, &p),
            Err(SlidelinesError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_horizontal_margin_wider_than_page_rejected() {
        let result = synthesize_ruled_page(100.0, 792.0, &params(7, 50.0, 0.0, 1.0));
        assert!(matches!(result, Err(SlidelinesError::InvalidParameter(_))));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let p = params(12, 10.0, 5.0, 0.5);
        let a = synthesize_ruled_page(595.0, 842.0, &p).unwrap();
        let b = synthesize_ruled_page(595.0, 842.0, &p).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_content_operations() {
        let page = synthesize_ruled_page(200.0, 300.0, &params(3, 10.0, 0.0, 1.5)).unwrap();
        let content = page.content();
        let ops: Vec<&str> = content
            .operations
            .iter()
            .map(|op| op.operator.as_str())
            .collect();

        // start 1.5, gap 100, limit 298.5: three rules
        assert_eq!(ops, vec!["w", "m", "l", "S", "m", "l", "S", "m", "l", "S"]);
    }

    #[test]
    fn test_to_document_has_one_page_of_template_size() {
        let page = synthesize_ruled_page(612.0, 792.0, &params(7, 0.0, 0.0, 1.0)).unwrap();
        let mut doc = page.to_document().unwrap();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        let reloaded = Document::load_mem(&buffer).unwrap();

        let pages = reloaded.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();
        let pb = crate::geometry::page_box(&reloaded, page_id).unwrap();
        assert_eq!((pb.width(), pb.height()), (612.0, 792.0));

        let content = Content::decode(&reloaded.get_page_content(page_id).unwrap()).unwrap();
        let strokes = content
            .operations
            .iter()
            .filter(|op| op.operator == "S")
            .count();
        assert_eq!(strokes, 7);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every rule lies inside the vertical band and rules are one gap apart
        #[test]
        fn rules_stay_in_band(
            n in 1i64..60,
            height in 50.0f64..2000.0,
            v_margin in 0.0f64..100.0,
            thickness in 0.1f64..5.0,
        ) {
            let params = LayoutParams::new(n, 0.0, v_margin, thickness).unwrap();
            let page = synthesize_ruled_page(500.0, height, &params).unwrap();
            let gap = height / n as f64;
            let limit = height - (thickness + v_margin);

            for line in page.lines() {
                prop_assert!(line.y >= v_margin + thickness);
                prop_assert!(line.y < limit);
            }
            for pair in page.lines().windows(2) {
                prop_assert!(((pair[1].y - pair[0].y) - gap).abs() < 1e-6);
            }
        }

        /// Property: margins and thickness only ever remove rules
        #[test]
        fn never_exceeds_requested(
            n in 1i64..60,
            height in 50.0f64..2000.0,
            thickness in 0.1f64..5.0,
        ) {
            let params = LayoutParams::new(n, 0.0, 0.0, thickness).unwrap();
            let page = synthesize_ruled_page(500.0, height, &params).unwrap();
            prop_assert!(page.lines().len() <= n as usize);
        }
    }
}
