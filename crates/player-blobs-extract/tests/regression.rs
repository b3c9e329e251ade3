use player_blobs_core::{ColorImage, Frame, MaskImage, PixelPoint, PixelRect};
use player_blobs_extract::{label_blobs, BlobExtractor, BlobExtractorParams};

/// Torso, head and two legs with small gaps between them, as background
/// subtraction tends to produce for a running player.
fn draw_player(mask: &mut MaskImage, x: i32, y: i32) -> PixelRect {
    let head = PixelRect::new(x + 8, y, 10, 10);
    let torso = PixelRect::new(x, y + 14, 26, 36);
    let left_leg = PixelRect::new(x + 2, y + 56, 8, 30);
    let right_leg = PixelRect::new(x + 16, y + 56, 8, 30);
    for r in [head, torso, left_leg, right_leg] {
        mask.fill_rect(&r);
    }
    // Tight box as (min, span): the far column/row is inclusive.
    PixelRect::new(x, y, 25, 85)
}

fn pitch_frame() -> (Frame, Vec<PixelRect>) {
    let (w, h) = (320, 240);
    let mut mask = MaskImage::new(w, h);
    let players = vec![
        draw_player(&mut mask, 30, 40),
        draw_player(&mut mask, 140, 100),
        // Touches the right border; the padded box leaves the frame.
        draw_player(&mut mask, 294, 20),
    ];
    // Ball and speckle noise.
    mask.fill_rect(&PixelRect::new(100, 200, 6, 6));
    for (x, y) in [(5, 5), (250, 230), (200, 20)] {
        mask.set(x, y, 255);
    }

    let mut color = ColorImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            color.put_pixel(x, y, [(x % 256) as u8, (y % 256) as u8, 30]);
        }
    }
    (Frame::new(42, mask, color).expect("frame"), players)
}

#[test]
fn finds_each_player_once() {
    let (frame, expected) = pitch_frame();
    let players = BlobExtractor::default().extract(&frame);
    assert_eq!(players.len(), expected.len());

    for silhouette in &expected {
        let player = players
            .iter()
            .find(|p| p.bounds == silhouette.padded(20))
            .expect("candidate for every silhouette");
        assert_eq!(player.frame_index, 42);
        assert_eq!(player.blob_size, 100 + 26 * 36 + 2 * 8 * 30);
        assert!(player.crop.fits_within(frame.width(), frame.height()));
        assert_eq!(player.mask.width as i32, player.crop.width);
        assert_eq!(player.color.data.len(), player.mask.data.len() * 3);
    }
}

#[test]
fn border_player_is_clipped_not_dropped() {
    let (frame, _) = pitch_frame();
    let players = BlobExtractor::default().extract(&frame);
    let border = players
        .iter()
        .find(|p| p.bounds.right() > frame.width() as i32)
        .expect("border player");
    assert!(border.is_clipped());
    assert_eq!(border.crop.right(), frame.width() as i32);
    assert_eq!(border.crop.y, 0);
    let top_left = border.crop.origin();
    assert_eq!(
        border.color.pixel(0, 0),
        [top_left.x as u8, top_left.y as u8, 30]
    );
}

#[test]
fn narrow_window_fragments_players() {
    let (frame, _) = pitch_frame();
    let params = BlobExtractorParams {
        window_size: 2,
        min_blob_size: 50,
        ..BlobExtractorParams::default()
    };
    let labels = label_blobs(&frame.mask(), params.window_size);
    // Head, torso and two legs per player, plus ball and three speckles.
    assert_eq!(labels.blob_count(), 3 * 4 + 4);

    let players = BlobExtractor::new(params).extract(&frame);
    assert!(players.len() > 3);
}

#[test]
fn every_labelled_pixel_lies_in_its_candidate() {
    let (frame, _) = pitch_frame();
    let extractor = BlobExtractor::default();
    let labels = extractor.label(&frame.mask());
    let players = extractor.extract_labeled(&frame, &labels);

    for p in &players {
        for y in 0..labels.height() {
            for x in 0..labels.width() {
                if labels.label_at(x, y) == p.blob_label {
                    assert!(p.crop.contains(PixelPoint::new(x as i32, y as i32)));
                }
            }
        }
    }
}
