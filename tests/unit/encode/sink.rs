use super::*;
use crate::foundation::core::{CanvasSize, Fps, FrameIndex};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "polysketch_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn cfg(w: u32, h: u32) -> SinkConfig {
    SinkConfig {
        size: CanvasSize::new(w, h).unwrap(),
        fps: Fps::default(),
    }
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2, 2)).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &solid(2, 2, [0, 0, 0, 255]))
            .unwrap();
    }
    sink.end().unwrap();

    assert!(sink.is_ended());
    assert_eq!(sink.config(), Some(cfg(2, 2)));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn discard_sink_only_counts() {
    let mut sink = DiscardSink::new();
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &solid(2, 2, [1, 2, 3, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(1), &solid(2, 2, [1, 2, 3, 255]))
        .unwrap();
    sink.end().unwrap();
    assert_eq!(sink.pushed(), 2);
}

#[test]
fn png_sequence_writes_numbered_files() {
    let dir = temp_dir("png_sequence");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(4, 2)).unwrap();
    sink.push_frame(FrameIndex(0), &solid(4, 2, [255, 0, 0, 255]))
        .unwrap();
    sink.push_frame(FrameIndex(7), &solid(4, 2, [0, 255, 0, 255]))
        .unwrap();
    sink.end().unwrap();

    assert_eq!(
        sink.written(),
        &[dir.join("frame_000000.png"), dir.join("frame_000007.png")]
    );
    let img = image::open(dir.join("frame_000007.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [0, 255, 0, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_every_nth_skips_frames() {
    let dir = temp_dir("png_every_nth");
    let mut sink = PngSequenceSink::new(&dir).every_nth(2);
    sink.begin(cfg(2, 2)).unwrap();
    for i in 0..5 {
        sink.push_frame(FrameIndex(i), &solid(2, 2, [0, 0, 0, 255]))
            .unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.written().len(), 3);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn png_sequence_rejects_out_of_order_frames() {
    let dir = temp_dir("png_out_of_order");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(2, 2)).unwrap();
    sink.push_frame(FrameIndex(3), &solid(2, 2, [0, 0, 0, 255]))
        .unwrap();
    let err = sink
        .push_frame(FrameIndex(3), &solid(2, 2, [0, 0, 0, 255]))
        .unwrap_err();
    assert!(matches!(err, SketchError::Encode(_)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_png_rejects_truncated_data() {
    let dir = temp_dir("png_truncated");
    let mut frame = solid(2, 2, [0, 0, 0, 255]);
    frame.data.pop();
    let err = write_png(&dir.join("x.png"), &frame).unwrap_err();
    assert!(matches!(err, SketchError::Validation(_)));
}
