//! Webcam capture tests
//!
//! The capture widget's state machine, the camera request and the decoding
//! of captured frames.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use base64::Engine;
use messboard::config::{DashboardConfig, WebcamConfig};
use messboard::error::DashboardError;
use messboard::webcam::{CameraConstraints, CaptureState, CapturedFrame};
use serde_json::json;

#[test]
fn test_capture_recapture_cycle() {
    let mut state = CaptureState::Idle;
    assert!(state.view().start_visible);
    assert!(!state.view().capture_visible);

    state = state.started();
    let live = state.view();
    assert!(live.video_visible && live.capture_visible && !live.start_visible);
    assert_eq!(live.capture_label, "Capture");

    for _ in 0..3 {
        state = state.capture_clicked();
        assert_eq!(state, CaptureState::Captured);
        assert!(state.view().canvas_visible);
        assert!(!state.view().video_visible);
        assert_eq!(state.view().capture_label, "Recapture");

        state = state.capture_clicked();
        assert_eq!(state, CaptureState::Live);
    }

    assert_eq!(state.started(), CaptureState::Live);
    assert_eq!(state.stopped(), CaptureState::Idle);
}

#[test]
fn test_constraints_from_config() {
    let config = DashboardConfig::from_json(
        r#"{"webcam": {"idealWidth": 1280, "facingMode": "environment"}}"#,
    );
    let constraints = CameraConstraints::new(&config.webcam);
    assert_eq!(
        serde_json::to_value(&constraints).unwrap(),
        json!({
            "video": {
                "width": {"ideal": 1280},
                "height": {"ideal": 480},
                "facingMode": "environment"
            }
        })
    );
    assert_eq!(WebcamConfig::default().mime_type, "image/jpeg");
}

#[test]
fn test_frame_round_trips_through_form_value() {
    let bytes: Vec<u8> = (0..=255).collect();
    let url = format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    );
    let frame = CapturedFrame::from_data_url(&url).unwrap();
    assert_eq!(frame.mime_type, "image/jpeg");
    assert_eq!(frame.bytes, bytes);
    assert!(frame.is_image());
}

#[test]
fn test_blank_canvas_url_is_rejected() {
    // what toDataURL returns for a zero-sized canvas
    let err = CapturedFrame::from_data_url("data:,").unwrap_err();
    assert!(matches!(err, DashboardError::Camera(_)));
    assert!(err.to_string().starts_with("Camera error: invalid data URL"));
}

#[test]
fn test_non_image_frames_are_flagged() {
    let frame = CapturedFrame::from_data_url("data:text/plain;base64,aGk=").unwrap();
    assert!(!frame.is_image());
    assert_eq!(frame.bytes, b"hi");
}
