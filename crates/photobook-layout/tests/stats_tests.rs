use photobook_layout::*;

#[test]
fn test_stats_empty_book() {
    let stats = calculate_statistics(&Book::new("Empty"));
    assert_eq!(stats, BookStatistics::default());
}

#[test]
fn test_stats_counts_zones_and_layouts() {
    let mut book = Book::new("Stats");
    let triplet = book.add_page(LayoutKind::HorizontalTriplet);
    let full = book.add_page(LayoutKind::FullPage);
    book.add_page(LayoutKind::HorizontalTriplet);

    book.set_image(triplet, LayoutKind::HorizontalTriplet, "aGVsbG8=", 0);
    book.set_image(triplet, LayoutKind::HorizontalTriplet, "aGVsbG8=", 2);
    book.set_image(full, LayoutKind::FullPage, "aGVsbG8=", 0);
    // Not reachable in a full-page layout
    book.set_image(full, LayoutKind::FullPage, "aGVsbG8=", 3);

    let stats = calculate_statistics(&book);
    assert_eq!(stats.pages, 3);
    assert_eq!(stats.placed_images, 3);
    // 1 on the first triplet, 3 on the second
    assert_eq!(stats.empty_zones, 4);
    assert_eq!(stats.stale_placements, 1);
    assert_eq!(stats.layouts.get(&LayoutKind::HorizontalTriplet), Some(&2));
    assert_eq!(stats.layouts.get(&LayoutKind::FullPage), Some(&1));
    assert_eq!(stats.layouts.get(&LayoutKind::VerticalTuple), None);
}
