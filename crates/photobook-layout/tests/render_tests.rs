use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use photobook_layout::*;
use std::io::Cursor;

/// Records every call instead of producing a document
#[derive(Debug, Default)]
struct RecordingWriter {
    calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Begin(PageSize),
    AddPage(PageSize),
    Rect(Rect),
    Image(ImageSize, Rect),
    Text(String, f64, f64, f64),
}

impl RecordingWriter {
    fn images(&self) -> Vec<(ImageSize, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Image(size, rect) => Some((*size, *rect)),
                _ => None,
            })
            .collect()
    }

    fn page_starts(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Begin(_) | Call::AddPage(_)))
            .count()
    }
}

impl DocumentWriter for RecordingWriter {
    fn begin_document(&mut self, size: PageSize) -> Result<()> {
        self.calls.push(Call::Begin(size));
        Ok(())
    }

    fn add_page(&mut self, size: PageSize) -> Result<()> {
        self.calls.push(Call::AddPage(size));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, _stroke: Color) -> Result<()> {
        self.calls.push(Call::Rect(rect));
        Ok(())
    }

    fn draw_image(&mut self, image: &DecodedImage, rect: Rect) -> Result<()> {
        self.calls.push(Call::Image(image.size, rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) -> Result<()> {
        self.calls.push(Call::Text(text.to_string(), x, y, font_size));
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([180, 60, 20]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn png_data_uri(width: u32, height: u32) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(width, height)))
}

fn page(layout: LayoutKind, placements: Vec<ImagePlacement>) -> RenderPage {
    RenderPage::new(layout, PageSize::A4, placements)
}

fn render(page: &RenderPage) -> (RecordingWriter, PageReport) {
    let mut writer = RecordingWriter::default();
    writer.begin_document(page.page_size).unwrap();
    let report = render_page(&mut writer, page, &RenderOptions::default()).unwrap();
    (writer, report)
}

#[test]
fn test_wide_image_fits_zone_width() {
    let page = page(
        LayoutKind::FullPage,
        vec![ImagePlacement::new(0, png_data_uri(40, 30))],
    );
    let (writer, report) = render(&page);

    let zone = resolve(LayoutKind::FullPage, PageSize::A4).unwrap()[0].rect;
    let images = writer.images();
    assert_eq!(images.len(), 1);
    let (size, drawn) = images[0];
    assert_eq!(size, ImageSize::new(40, 30));

    // 4:3 is wider than the portrait content area
    assert_eq!(drawn.width, zone.width);
    assert!((drawn.height - zone.width * 3.0 / 4.0).abs() < 1e-9);
    assert_eq!(drawn.x, zone.x);
    assert!((drawn.center_y() - zone.center_y()).abs() < 1e-9);
    assert_eq!(report.drawn, vec![0]);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_tall_image_fits_zone_height() {
    let page = page(
        LayoutKind::HorizontalTriplet,
        vec![ImagePlacement::new(2, png_data_uri(10, 40))],
    );
    let (writer, _) = render(&page);

    let zone = resolve(LayoutKind::HorizontalTriplet, PageSize::A4).unwrap()[2].rect;
    let (_, drawn) = writer.images()[0];
    assert_eq!(drawn.height, zone.height);
    assert!((drawn.width - zone.height / 4.0).abs() < 1e-9);
    assert_eq!(drawn.y, zone.y);
    assert!((drawn.center_x() - zone.center_x()).abs() < 1e-9);
}

#[test]
fn test_natural_size_overrides_decoded_size() {
    let placement = ImagePlacement::new(0, png_data_uri(10, 10)).with_natural_size(200, 100);
    let (writer, report) = render(&page(LayoutKind::FullPage, vec![placement]));

    let (_, drawn) = writer.images()[0];
    assert!((drawn.aspect_ratio() - 2.0).abs() < 1e-9);
    assert_eq!(report.drawn, vec![0]);
}

#[test]
fn test_zero_natural_size_is_skipped() {
    let placement = ImagePlacement::new(0, png_data_uri(10, 10)).with_natural_size(0, 100);
    let (writer, report) = render(&page(LayoutKind::FullPage, vec![placement]));

    assert!(writer.images().is_empty());
    assert!(matches!(
        report.warnings[..],
        [RenderWarning::ImageDecodeFailure { zone_index: 0, .. }]
    ));
}

#[test]
fn test_page_without_placements_draws_nothing() {
    for layout in LayoutKind::all() {
        let (writer, report) = render(&page(layout, Vec::new()));
        assert_eq!(writer.calls.len(), 1, "only the page start for {}", layout);
        assert!(report.drawn.is_empty());
        assert!(report.warnings.is_empty());
    }
}

#[test]
fn test_out_of_range_zone_is_skipped() {
    let page = page(
        LayoutKind::VerticalTuple,
        vec![
            ImagePlacement::new(0, png_data_uri(8, 8)),
            ImagePlacement::new(5, png_data_uri(8, 8)),
        ],
    );
    let (writer, report) = render(&page);

    assert_eq!(writer.images().len(), 1);
    assert_eq!(report.drawn, vec![0]);
    assert_eq!(
        report.warnings,
        vec![RenderWarning::ZoneIndexOutOfRange {
            zone_index: 5,
            zone_count: 2
        }]
    );
}

#[test]
fn test_undecodable_image_does_not_stop_the_page() {
    let page = page(
        LayoutKind::HorizontalTriplet,
        vec![
            ImagePlacement::new(0, "data:image/png;base64,!!not base64!!"),
            ImagePlacement::new(1, STANDARD.encode(b"plain text, not an image")),
            ImagePlacement::new(2, png_data_uri(30, 10)),
        ],
    );
    let (writer, report) = render(&page);

    assert_eq!(writer.images().len(), 1);
    assert_eq!(report.drawn, vec![2]);
    let skipped: Vec<usize> = report.warnings.iter().map(|w| w.zone_index()).collect();
    assert_eq!(skipped, vec![0, 1]);
}

#[test]
fn test_last_placement_for_a_zone_wins() {
    let page = page(
        LayoutKind::FullPage,
        vec![
            ImagePlacement::new(0, png_data_uri(10, 10)),
            ImagePlacement::new(0, png_data_uri(30, 10)),
        ],
    );
    let (writer, report) = render(&page);

    let images = writer.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].0, ImageSize::new(30, 10));
    assert_eq!(report.drawn, vec![0]);
}

#[test]
fn test_images_are_drawn_in_zone_order() {
    let page = page(
        LayoutKind::VerticalTriplet,
        vec![
            ImagePlacement::new(2, png_data_uri(12, 10)),
            ImagePlacement::new(0, png_data_uri(10, 10)),
            ImagePlacement::new(1, png_data_uri(11, 10)),
        ],
    );
    let (writer, report) = render(&page);

    assert_eq!(report.drawn, vec![0, 1, 2]);
    let widths: Vec<u32> = writer.images().iter().map(|(size, _)| size.width).collect();
    assert_eq!(widths, vec![10, 11, 12]);
}

#[test]
fn test_raw_bytes_are_accepted() {
    let page = page(
        LayoutKind::FullPage,
        vec![ImagePlacement::new(0, png_bytes(16, 9))],
    );
    let (writer, report) = render(&page);
    assert_eq!(writer.images()[0].0, ImageSize::new(16, 9));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_zone_outlines_are_drawn_when_enabled() {
    let page = page(LayoutKind::HorizontalTriplet, Vec::new());
    let options = RenderOptions {
        draw_zone_outlines: true,
        ..Default::default()
    };
    let mut writer = RecordingWriter::default();
    writer.begin_document(PageSize::A4).unwrap();
    render_page(&mut writer, &page, &options).unwrap();

    let zones = resolve(LayoutKind::HorizontalTriplet, PageSize::A4).unwrap();
    let rects: Vec<Call> = zones.iter().map(|z| Call::Rect(z.rect)).collect();
    assert_eq!(writer.calls[1..], rects[..]);
}

#[test]
fn test_invalid_page_size_is_an_error() {
    let page = RenderPage::new(LayoutKind::FullPage, PageSize::new(0.0, 0.0), Vec::new());
    let mut writer = RecordingWriter::default();
    let result = render_page(&mut writer, &page, &RenderOptions::default());
    assert!(matches!(result, Err(PhotobookError::InvalidPageSize { .. })));
}

#[test]
fn test_empty_book_gets_placeholder_page() {
    let mut writer = RecordingWriter::default();
    let report = render_book(&mut writer, &[], &RenderOptions::default()).unwrap();

    assert_eq!(
        writer.calls,
        vec![
            Call::Begin(PageSize::A4),
            Call::Text("No images uploaded yet".to_string(), 50.0, 50.0, 12.0),
        ]
    );
    assert!(report.pages.is_empty());
    assert_eq!(report.images_drawn(), 0);
}

#[test]
fn test_book_renders_one_page_per_entry() {
    let pages = vec![
        page(LayoutKind::FullPage, vec![ImagePlacement::new(0, png_data_uri(4, 3))]),
        page(LayoutKind::VerticalTuple, Vec::new()),
        page(
            LayoutKind::VerticalTuple,
            vec![ImagePlacement::new(3, png_data_uri(4, 3))],
        ),
    ];
    let mut writer = RecordingWriter::default();
    let report = render_book(&mut writer, &pages, &RenderOptions::default()).unwrap();

    assert_eq!(writer.page_starts(), 3);
    assert!(matches!(writer.calls[0], Call::Begin(_)));
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.images_drawn(), 1);

    let warnings: Vec<(usize, usize)> = report
        .warnings()
        .map(|(page, warning)| (page, warning.zone_index()))
        .collect();
    assert_eq!(warnings, vec![(2, 3)]);
}
