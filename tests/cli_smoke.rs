use std::{fs::File, path::PathBuf};

use ndarray::Array2;
use ndarray_npy::NpzWriter;
use tetrascope::grid;

fn bin_path() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_tetrascope")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "tetrascope.exe"
            } else {
                "tetrascope"
            });
            p
        })
}

fn write_piece(dir: &std::path::Path, index: u64) {
    let mut cells = Array2::<u8>::zeros((2, 2));
    cells[(0, 0)] = 1;
    let file = File::create(grid::piece_path(dir, index)).unwrap();
    let mut npz = NpzWriter::new(file);
    npz.add_array("piece", &cells).unwrap();
    npz.finish().unwrap();
}

#[test]
fn cli_frame_writes_png() {
    let dir = PathBuf::from("target").join("cli_smoke_frame");
    std::fs::create_dir_all(&dir).unwrap();
    write_piece(&dir, 0);

    let out_path = dir.join("frame0.png");
    let _ = std::fs::remove_file(&out_path);

    let status = std::process::Command::new(bin_path())
        .arg("frame")
        .arg(&dir)
        .args(["--frame", "0", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(out_path.exists());
}

#[test]
fn cli_play_streams_one_raw_buffer_per_frame() {
    let dir = PathBuf::from("target").join("cli_smoke_play");
    std::fs::create_dir_all(&dir).unwrap();
    write_piece(&dir, 0);
    write_piece(&dir, 1);

    let output = std::process::Command::new(bin_path())
        .arg("play")
        .arg(&dir)
        .args(["--output", "--scale", "8", "--stroke-width", "2"])
        .output()
        .unwrap();

    assert!(output.status.success());
    // Two 16x16 bgr24 frames, nothing else on stdout.
    assert_eq!(output.stdout.len(), 2 * 16 * 16 * 3);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-pix_fmt bgr24"), "stderr: {stderr}");
}
