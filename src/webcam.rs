//! Camera capture for face registration forms.
//!
//! [`CaptureState`] drives which controls are visible; [`CapturedFrame`]
//! checks the data URL a capture produces. On wasm32, `WebcamSession` owns
//! the media stream and releases it on close, drop and page unload.

use base64::Engine;
use serde::Serialize;

use crate::config::WebcamConfig;
use crate::error::{DashboardError, Result};

/// Where the capture widget is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No stream yet; only the start button is shown.
    #[default]
    Idle,
    /// Live preview.
    Live,
    /// A still frame is shown and stored in the form.
    Captured,
}

/// Visibility and labels of the widget's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub video_visible: bool,
    pub canvas_visible: bool,
    pub start_visible: bool,
    pub capture_visible: bool,
    pub capture_label: &'static str,
}

impl CaptureState {
    /// The stream was acquired.
    #[must_use]
    pub fn started(self) -> Self {
        match self {
            Self::Idle => Self::Live,
            other => other,
        }
    }

    /// The capture button was clicked: take a frame, or go back to the
    /// live preview for a recapture.
    #[must_use]
    pub fn capture_clicked(self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Live => Self::Captured,
            Self::Captured => Self::Live,
        }
    }

    #[must_use]
    pub fn stopped(self) -> Self {
        Self::Idle
    }

    pub fn view(self) -> ControlView {
        match self {
            Self::Idle => ControlView {
                video_visible: false,
                canvas_visible: false,
                start_visible: true,
                capture_visible: false,
                capture_label: "Capture",
            },
            Self::Live => ControlView {
                video_visible: true,
                canvas_visible: false,
                start_visible: false,
                capture_visible: true,
                capture_label: "Capture",
            },
            Self::Captured => ControlView {
                video_visible: false,
                canvas_visible: true,
                start_visible: false,
                capture_visible: true,
                capture_label: "Recapture",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ideal {
    pub ideal: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub width: Ideal,
    pub height: Ideal,
    pub facing_mode: String,
}

/// `getUserMedia` constraints: video only, ideal size, facing the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraConstraints {
    pub video: VideoConstraints,
}

impl CameraConstraints {
    pub fn new(config: &WebcamConfig) -> Self {
        Self {
            video: VideoConstraints {
                width: Ideal {
                    ideal: config.ideal_width,
                },
                height: Ideal {
                    ideal: config.ideal_height,
                },
                facing_mode: config.facing_mode.clone(),
            },
        }
    }
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self::new(&WebcamConfig::default())
    }
}

/// A decoded `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl CapturedFrame {
    pub fn from_data_url(url: &str) -> Result<Self> {
        let invalid = |why: &str| DashboardError::Camera(format!("invalid data URL: {why}"));

        let rest = url.strip_prefix("data:").ok_or_else(|| invalid("missing data: prefix"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing payload"))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("not base64 encoded"))?;
        if mime_type.is_empty() {
            return Err(invalid("missing MIME type"));
        }
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| invalid(&e.to_string()))?;
        if bytes.is_empty() {
            return Err(invalid("empty image"));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{init_webcam, WebcamIds, WebcamSession};

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde::Serialize;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        HtmlVideoElement, MediaStream, MediaStreamConstraints, MediaStreamTrack,
    };

    use crate::config::WebcamConfig;
    use crate::error::{js_error, DashboardError, Result};

    use super::{CameraConstraints, CaptureState, CapturedFrame};

    const CAMERA_ALERT: &str =
        "Error accessing webcam. Please ensure your browser has permission to use the camera.";

    /// Element ids of one capture widget.
    #[derive(Debug, Clone)]
    pub struct WebcamIds {
        pub video: String,
        pub canvas: String,
        pub start_button: String,
        pub capture_button: String,
        pub image_input: String,
    }

    fn lookup<T: JsCast>(document: &Document, id: &str) -> Result<T> {
        document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<T>().ok())
            .ok_or_else(|| DashboardError::MissingTarget(id.to_string()))
    }

    fn set_visible(element: &HtmlElement, visible: bool, shown_as: &str) {
        let display = if visible { shown_as } else { "none" };
        let _ = element.style().set_property("display", display);
    }

    /// Ask the browser for a camera stream.
    async fn acquire(constraints: &CameraConstraints) -> Result<MediaStream> {
        let window = web_sys::window().ok_or("no window")?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;
        let constraints: MediaStreamConstraints = constraints
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| DashboardError::Camera(e.to_string()))?
            .unchecked_into();
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| DashboardError::Camera(js_error(&e)))?
            .dyn_into::<MediaStream>()
            .map_err(|_| DashboardError::Camera("not a media stream".to_string()))
    }

    /// One capture widget and the stream it holds.
    pub struct WebcamSession {
        video: HtmlVideoElement,
        canvas: HtmlCanvasElement,
        start_button: HtmlElement,
        capture_button: HtmlElement,
        image_input: HtmlInputElement,
        stream: Option<MediaStream>,
        state: CaptureState,
        constraints: CameraConstraints,
        mime_type: String,
    }

    impl WebcamSession {
        pub fn bind(document: &Document, ids: &WebcamIds, config: &WebcamConfig) -> Result<Self> {
            Ok(Self {
                video: lookup(document, &ids.video)?,
                canvas: lookup(document, &ids.canvas)?,
                start_button: lookup(document, &ids.start_button)?,
                capture_button: lookup(document, &ids.capture_button)?,
                image_input: lookup(document, &ids.image_input)?,
                stream: None,
                state: CaptureState::Idle,
                constraints: CameraConstraints::new(config),
                mime_type: config.mime_type.clone(),
            })
        }

        pub fn state(&self) -> CaptureState {
            self.state
        }

        fn apply_view(&self) {
            let view = self.state.view();
            set_visible(&self.video, view.video_visible, "block");
            set_visible(&self.canvas, view.canvas_visible, "block");
            set_visible(&self.start_button, view.start_visible, "inline-block");
            set_visible(&self.capture_button, view.capture_visible, "inline-block");
            self.capture_button.set_text_content(Some(view.capture_label));
        }

        /// Show a freshly acquired stream in the preview.
        fn attach(&mut self, stream: MediaStream) {
            self.close();
            self.video.set_src_object(Some(&stream));
            self.stream = Some(stream);
            self.state = self.state.started();
            self.apply_view();
        }

        /// Acquire the camera and start the preview.
        pub async fn open(session: &Rc<RefCell<Self>>) -> Result<()> {
            let constraints = session.borrow().constraints.clone();
            let stream = acquire(&constraints).await?;
            session.borrow_mut().attach(stream);
            Ok(())
        }

        /// Draw the current frame into the canvas and store it in the form.
        pub fn capture(&mut self) -> Result<String> {
            let width = self.video.video_width();
            let height = self.video.video_height();
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            let ctx = self
                .canvas
                .get_context("2d")
                .map_err(|e| DashboardError::Camera(js_error(&e)))?
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                .ok_or_else(|| DashboardError::Camera("2d context unavailable".to_string()))?;
            ctx.draw_image_with_html_video_element_and_dw_and_dh(
                &self.video,
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            )
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;

            let url = self
                .canvas
                .to_data_url_with_type(&self.mime_type)
                .map_err(|e| DashboardError::Camera(js_error(&e)))?;
            let frame = CapturedFrame::from_data_url(&url)?;
            log::debug!("webcam: captured {} bytes of {}", frame.bytes.len(), frame.mime_type);
            self.image_input.set_value(&url);
            Ok(url)
        }

        /// Handle a click on the capture button.
        pub fn capture_clicked(&mut self) -> Result<()> {
            let next = self.state.capture_clicked();
            if next == CaptureState::Captured {
                self.capture()?;
            }
            self.state = next;
            self.apply_view();
            Ok(())
        }

        /// Stop every track and forget the stream.
        pub fn close(&mut self) {
            if let Some(stream) = self.stream.take() {
                for track in stream.get_tracks().iter() {
                    if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                        track.stop();
                    }
                }
                self.video.set_src_object(None);
                log::debug!("webcam: stream released");
            }
            self.state = self.state.stopped();
        }
    }

    impl Drop for WebcamSession {
        fn drop(&mut self) {
            self.close();
        }
    }

    fn camera_failed(e: &DashboardError) {
        log::error!("Error accessing webcam: {e}");
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(CAMERA_ALERT);
        }
    }

    /// Wire the widget's buttons and release the camera on page unload.
    pub fn init_webcam(ids: &WebcamIds, config: &WebcamConfig) -> Result<Rc<RefCell<WebcamSession>>> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let session = Rc::new(RefCell::new(WebcamSession::bind(&document, ids, config)?));

        let (start_button, capture_button) = {
            let s = session.borrow();
            (s.start_button.clone(), s.capture_button.clone())
        };

        let on_start = {
            let session = Rc::clone(&session);
            Closure::wrap(Box::new(move || {
                let session = Rc::clone(&session);
                spawn_local(async move {
                    if let Err(e) = WebcamSession::open(&session).await {
                        camera_failed(&e);
                    }
                });
            }) as Box<dyn FnMut()>)
        };
        start_button
            .add_event_listener_with_callback("click", on_start.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;
        on_start.forget();

        let on_capture = {
            let session = Rc::clone(&session);
            Closure::wrap(Box::new(move || {
                if let Ok(mut s) = session.try_borrow_mut() {
                    if let Err(e) = s.capture_clicked() {
                        log::error!("webcam: {e}");
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        capture_button
            .add_event_listener_with_callback("click", on_capture.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;
        on_capture.forget();

        let on_unload = {
            let session = Rc::clone(&session);
            Closure::wrap(Box::new(move || {
                if let Ok(mut s) = session.try_borrow_mut() {
                    s.close();
                }
            }) as Box<dyn FnMut()>)
        };
        window
            .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Camera(js_error(&e)))?;
        on_unload.forget();

        Ok(session)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_cycle() {
        let state = CaptureState::default();
        assert_eq!(state.capture_clicked(), CaptureState::Idle);
        let live = state.started();
        assert_eq!(live, CaptureState::Live);
        let captured = live.capture_clicked();
        assert_eq!(captured.view().capture_label, "Recapture");
        assert!(captured.view().canvas_visible);
        assert_eq!(captured.capture_clicked(), CaptureState::Live);
        assert_eq!(captured.stopped(), CaptureState::Idle);
    }

    #[test]
    fn test_constraints_shape() {
        let value = serde_json::to_value(CameraConstraints::default()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "video": {
                    "width": {"ideal": 640},
                    "height": {"ideal": 480},
                    "facingMode": "user"
                }
            })
        );
    }

    #[test]
    fn test_data_url_decoding() {
        let frame = CapturedFrame::from_data_url("data:image/jpeg;base64,/9j/4AA=").unwrap();
        assert_eq!(frame.mime_type, "image/jpeg");
        assert_eq!(frame.bytes, vec![0xff, 0xd8, 0xff, 0xe0, 0x00]);
        assert!(frame.is_image());
    }

    #[test]
    fn test_bad_data_urls() {
        for url in [
            "image/jpeg;base64,AAAA",
            "data:image/jpeg;base64",
            "data:image/jpeg,AAAA",
            "data:;base64,AAAA",
            "data:image/png;base64,!!!",
            "data:image/png;base64,",
        ] {
            assert!(
                matches!(CapturedFrame::from_data_url(url), Err(DashboardError::Camera(_))),
                "{url}"
            );
        }
    }
}
