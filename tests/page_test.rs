//! Integration tests for the page operations built on `PageBackend`.

use poppler_page::export::{to_json, JsonFormat, PageContent};
use poppler_page::{
    Color, Error, FusionStrategy, Image, PageBackend, Rectangle, RenderOptions, RenderPlan,
    RenderedImage, Result, TextAttributes,
};

/// Mock page for testing.
struct MockPage {
    document: u64,
    index: usize,
    text: &'static str,
    attributes: Vec<TextAttributes>,
    layout: Option<Vec<Rectangle>>,
    size: (f64, f64),
    label: Option<&'static str>,
    images: Vec<Image>,
}

impl MockPage {
    fn new(text: &'static str, attributes: Vec<TextAttributes>) -> Self {
        let layout = Some(boxes(text.chars().count()));
        Self {
            document: 0,
            index: 0,
            text,
            attributes,
            layout,
            size: (612.0, 792.0),
            label: None,
            images: Vec::new(),
        }
    }

    fn blank() -> Self {
        Self::new("", Vec::new())
    }
}

/// One 10pt-wide box per character along a single line.
fn boxes(n: usize) -> Vec<Rectangle> {
    (0..n)
        .map(|i| {
            let x = 72.0 + i as f64 * 10.0;
            Rectangle::new(x, 700.0, x + 10.0, 712.0)
        })
        .collect()
}

impl PageBackend for MockPage {
    fn text(&self) -> String {
        self.text.to_string()
    }

    fn text_attributes(&self) -> Vec<TextAttributes> {
        self.attributes.clone()
    }

    fn text_layout(&self) -> Option<Vec<Rectangle>> {
        self.layout.clone()
    }

    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn index(&self) -> usize {
        self.index
    }

    fn label(&self) -> Option<String> {
        self.label.map(str::to_string)
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn images(&self) -> Vec<Image> {
        self.images.clone()
    }

    fn render(&self, options: &RenderOptions) -> Result<RenderedImage> {
        let plan = RenderPlan::new(self.size.0, self.size.1, options)?;
        Ok(RenderedImage::filled(plan.width, plan.height, options.fill_color))
    }

    fn image_data(&self, image: &Image) -> Result<RenderedImage> {
        image.check_owner(self.document, self.index)?;
        Ok(RenderedImage::filled(4, 4, Color::BLACK))
    }
}

// ==================== Fusion Tests ====================

#[test]
fn test_one_element_per_character() {
    let page = MockPage::new(
        "Héllo wörld",
        vec![TextAttributes::new("Helvetica", 12.0, 0, 10)],
    );
    let fused = page.text_layout_and_attrs().unwrap();

    assert_eq!(fused.len(), page.text().chars().count());
    assert_eq!(fused.text(), "Héllo wörld");
    for (i, el) in fused.elements.iter().enumerate() {
        assert_eq!(el.rect, boxes(11)[i]);
        assert_eq!(el.attrs, Some(0));
    }
}

#[test]
fn test_empty_page() {
    let page = MockPage::blank();
    let fused = page.text_layout_and_attrs().unwrap();
    assert!(fused.is_empty());
    assert!(fused.attributes.is_empty());
}

#[test]
fn test_empty_page_without_layout() {
    let mut page = MockPage::blank();
    page.layout = None;
    assert!(page.text_layout_and_attrs().unwrap().is_empty());
}

#[test]
fn test_missing_layout_with_text_fails() {
    let mut page = MockPage::new("abc", Vec::new());
    page.layout = None;
    assert!(matches!(
        page.text_layout_and_attrs(),
        Err(Error::IndexMismatch {
            text_len: 3,
            layout_len: 0
        })
    ));
}

#[test]
fn test_short_layout_fails() {
    let mut page = MockPage::new("abcd", Vec::new());
    page.layout = Some(boxes(3));
    let err = page.text_layout_and_attrs().unwrap_err();
    assert!(matches!(
        err,
        Error::IndexMismatch {
            text_len: 4,
            layout_len: 3
        }
    ));
}

#[test]
fn test_overlapping_runs_first_wins() {
    let page = MockPage::new(
        "abcdef",
        vec![
            TextAttributes::new("Times-Bold", 14.0, 2, 4),
            TextAttributes::new("Courier", 10.0, 0, 5),
        ],
    );

    for strategy in [FusionStrategy::LinearScan, FusionStrategy::Indexed] {
        let fused = page.text_layout_and_attrs_with(strategy).unwrap();
        let fonts: Vec<&str> = fused
            .iter()
            .map(|(_, attrs)| attrs.map(|a| a.font_name.as_str()).unwrap_or(""))
            .collect();
        assert_eq!(
            fonts,
            vec!["Courier", "Courier", "Times-Bold", "Times-Bold", "Times-Bold", "Courier"]
        );
    }
}

#[test]
fn test_uncovered_characters_have_no_run() {
    let page = MockPage::new("ab cd", vec![TextAttributes::new("Helvetica", 9.0, 0, 1)]);
    let fused = page.text_layout_and_attrs().unwrap();
    assert_eq!(fused.elements[1].attrs, Some(0));
    assert_eq!(fused.elements[2].attrs, None);
    assert!(fused.attributes_of(&fused.elements[4]).is_none());
}

#[test]
fn test_repeated_calls_are_identical() {
    let page = MockPage::new("xyz", vec![TextAttributes::new("Symbol", 8.0, 0, 2)]);
    let first = page.text_layout_and_attrs().unwrap();
    let second = page.text_layout_and_attrs().unwrap();
    assert_eq!(first, second);
}

// ==================== Size Tests ====================

#[test]
fn test_pixel_size_truncates() {
    let mut page = MockPage::blank();
    page.size = (595.92, 842.88);
    assert_eq!(page.pixel_size(), (595, 842));
    assert_eq!(page.size(), (595.92, 842.88));
}

// ==================== Render Tests ====================

#[test]
fn test_render_default_scale() {
    let page = MockPage::blank();
    let image = page.render(&RenderOptions::default()).unwrap();
    assert_eq!(image.dimensions(), (612, 792));
    assert!(image.is_uniform(Color::WHITE));
}

#[test]
fn test_render_double_scale() {
    let page = MockPage::blank();
    let image = page.render(&RenderOptions::new().with_scale(2.0)).unwrap();
    assert_eq!(image.dimensions(), (1224, 1584));
}

#[test]
fn test_render_fractional_page() {
    let mut page = MockPage::blank();
    page.size = (200.6, 100.4);
    let image = page.render(&RenderOptions::new().with_scale(1.5)).unwrap();
    assert_eq!(image.dimensions(), (300, 150));
}

#[test]
fn test_render_invalid_scale() {
    let page = MockPage::blank();
    for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = page.render(&RenderOptions::new().with_scale(scale));
        assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    }
}

#[test]
fn test_render_fill_color() {
    let page = MockPage::blank();
    let red = Color::rgb(255, 0, 0);
    let image = page
        .render(&RenderOptions::new().with_fill_color(red).with_scale(0.1))
        .unwrap();
    assert_eq!(image.pixel(0, 0), Some([255, 0, 0, 255]));
}

// ==================== Image Tests ====================

#[test]
fn test_image_from_other_page() {
    let page = MockPage::blank();
    let foreign = Image::new(3, Rectangle::new(0.0, 0.0, 10.0, 10.0), 2);
    assert!(matches!(
        page.image_data(&foreign),
        Err(Error::ForeignImage {
            id: 3,
            image_page: 2,
            page: 0
        })
    ));

    let own = Image::new(1, Rectangle::new(0.0, 0.0, 10.0, 10.0), 0);
    assert_eq!(page.image_data(&own).unwrap().dimensions(), (4, 4));
}

#[test]
fn test_image_from_other_document() {
    let mut page = MockPage::blank();
    page.document = 2;
    let area = Rectangle::new(0.0, 0.0, 10.0, 10.0);

    // Same id and page index, different document
    let foreign = Image::new(1, area, 0).with_document(1);
    assert!(matches!(
        page.image_data(&foreign),
        Err(Error::ForeignDocument {
            id: 1,
            image_document: 1,
            document: 2
        })
    ));

    let own = Image::new(1, area, 0).with_document(2);
    assert!(page.image_data(&own).is_ok());
}

// ==================== Content Tests ====================

#[test]
fn test_content_collects_everything() {
    let mut page = MockPage::new("Hi", vec![TextAttributes::new("Helvetica", 12.0, 0, 1)]);
    page.index = 4;
    page.label = Some("v");
    page.images = vec![Image::new(0, Rectangle::new(10.0, 10.0, 110.0, 60.0), 4)];

    let content = page.content().unwrap();
    assert_eq!(content.index, 4);
    assert_eq!(content.label.as_deref(), Some("v"));
    assert_eq!(content.text, "Hi");
    assert_eq!(content.elements.len(), 2);
    assert_eq!(content.images.len(), 1);
    assert_eq!(content.duration, None);
}

#[test]
fn test_content_json_round_trip() {
    let page = MockPage::new("ok", vec![TextAttributes::new("Helvetica", 12.0, 0, 1)]);
    let content = page.content().unwrap();

    let compact = to_json(&content, JsonFormat::Compact).unwrap();
    assert!(!compact.contains('\n'));
    assert!(compact.contains("\"font_name\":\"Helvetica\""));

    let parsed: PageContent = serde_json::from_str(&compact).unwrap();
    assert_eq!(parsed, content);
}
