//! End-to-end session tests: real library import from disk, the pure-Rust
//! renderer, and the directory share target, driven through the shell.

use image::{ImageEncoder, RgbaImage};
use snapfx::imaging::{Quality, RustRenderer, ShareFormat};
use snapfx::session::{EffectOutcome, Session};
use snapfx::share::DirectoryShare;
use snapfx::shell::{Command, Event, Report, ShareOptions, Shell};
use snapfx::source::{DesktopSource, ImageSource, SourceError};
use std::path::Path;
use std::sync::mpsc;
use tempfile::TempDir;

fn write_photo(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 200, 255])
    });
    let file = std::fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
}

fn options() -> ShareOptions {
    ShareOptions {
        title: "Photo".into(),
        width: 1024,
    }
}

#[test]
fn import_three_effects_and_share() {
    let tmp = TempDir::new().unwrap();
    let photo = tmp.path().join("dawn.png");
    write_photo(&photo, 120, 90);
    let out = tmp.path().join("shared");

    let (tx, rx) = mpsc::channel();
    let mut shell = Shell::new(
        DesktopSource::new(Vec::new()),
        RustRenderer::new(),
        DirectoryShare::new(&out, ShareFormat::Png, Quality::default()),
        options(),
        tx.clone(),
    );

    assert_eq!(
        shell.handle(Event::Command(Command::Library(photo.clone()))),
        Report::PickStarted(photo)
    );
    // The import finishes on another thread and comes back through the channel.
    assert_eq!(
        shell.handle(rx.recv().unwrap()),
        Report::PhotoReady {
            width: 120,
            height: 90
        }
    );
    assert_eq!(shell.session().cursor().index(), 0);

    let mut filters = Vec::new();
    for _ in 0..3 {
        match shell.handle(Event::Command(Command::Effect)) {
            Report::Applied { filter, .. } => filters.push(filter),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(filters, vec!["mono", "chrome", "fade"]);
    assert_eq!(shell.session().cursor().index(), 3);

    let shared = match shell.handle(Event::Command(Command::Share)) {
        Report::Shared(path) => path,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(shared, out.join("photo-001.png"));
    let (w, h) = image::image_dimensions(&shared).unwrap();
    assert_eq!((w, h), (1024, 768));

    let sidecar: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("photo-001.json")).unwrap())
            .unwrap();
    assert_eq!(sidecar["title"], "Photo");
    assert_eq!(sidecar["filter"], "fade");
}

#[test]
fn renderings_never_chain() {
    let tmp = TempDir::new().unwrap();
    let photo = tmp.path().join("still.png");
    write_photo(&photo, 16, 16);

    let source = DesktopSource::new(Vec::new());
    let mut session = Session::new();
    session
        .source_resolved(source.pick_from_library(&photo).wait())
        .unwrap();
    let renderer = RustRenderer::new();

    // Walk the whole catalog once, then apply "mono" again: it must match the
    // first rendering exactly, which only holds if every pass started from
    // the untouched original.
    assert!(matches!(session.apply_effect(&renderer), EffectOutcome::Applied("mono")));
    let first = session.rendered().unwrap().pixels().clone();
    for _ in 0..8 {
        session.apply_effect(&renderer);
    }
    assert_eq!(session.cursor().index(), 0);
    assert!(matches!(session.apply_effect(&renderer), EffectOutcome::Applied("mono")));
    assert_eq!(session.rendered().unwrap().pixels(), &first);
}

#[test]
fn effect_before_any_photo_changes_nothing() {
    let (tx, _rx) = mpsc::channel();
    let tmp = TempDir::new().unwrap();
    let mut shell = Shell::new(
        DesktopSource::new(Vec::new()),
        RustRenderer::new(),
        DirectoryShare::new(tmp.path(), ShareFormat::Jpeg, Quality::default()),
        options(),
        tx,
    );

    assert_eq!(shell.handle(Event::Command(Command::Effect)), Report::NoPhoto);
    assert_eq!(shell.session().cursor().index(), 0);
    assert!(shell.session().rendered().is_none());
    assert_eq!(shell.handle(Event::Command(Command::Share)), Report::NothingToShare);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[test]
fn camera_missing_is_reported_and_harmless() {
    let (tx, _rx) = mpsc::channel();
    let tmp = TempDir::new().unwrap();
    let mut shell = Shell::new(
        DesktopSource::new(vec!["snapfx-no-such-camera-tool".into()]),
        RustRenderer::new(),
        DirectoryShare::new(tmp.path(), ShareFormat::Jpeg, Quality::default()),
        options(),
        tx,
    );

    assert_eq!(
        shell.handle(Event::Command(Command::Camera)),
        Report::CameraUnavailable
    );
    assert!(!shell.session().capture_dialog_visible());
}

#[test]
fn undecodable_import_is_decode_failure() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0x00, 0x01]).unwrap();

    let result = DesktopSource::new(Vec::new())
        .pick_from_library(&path)
        .wait();
    assert!(matches!(result, Err(SourceError::DecodeFailure(_))));
}
