use image::RgbaImage;

use super::data::{FrameId, Photo};
use super::edit::Adjustments;
use crate::compose::export::ExportJob;
use crate::compose::Layering;
use crate::config::Settings;
use crate::error::{FrameError, Result};
use crate::frames::FrameCatalog;

/// Identifies one photo decode request.
/// Only the most recently issued ticket may store its photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a finished photo decode
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The photo replaced the previous one
    Loaded,
    /// Decoding failed; the session is unchanged
    Failed(String),
    /// A newer request (or a clear) superseded this one
    Stale,
}

/// Everything the user has chosen so far.
///
/// The session is plain data: the GUI forwards events to it and both the
/// preview and the export are rendered from a snapshot of it.
#[derive(Debug, Clone)]
pub struct Session {
    photo: Option<Photo>,
    frame: Option<FrameId>,
    adjustments: Adjustments,
    default_frame: Option<FrameId>,
    layering: Layering,
    reset_adjustments_on_upload: bool,
    generation: u64,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Self {
            photo: None,
            frame: settings.default_frame,
            adjustments: Adjustments::default(),
            default_frame: settings.default_frame,
            layering: settings.layering,
            reset_adjustments_on_upload: settings.reset_adjustments_on_upload,
            generation: 0,
        }
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn frame(&self) -> Option<FrameId> {
        self.frame
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn layering(&self) -> Layering {
        self.layering
    }

    /// Start a new photo decode, superseding any in flight
    pub fn begin_photo_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply the result of a decode started with `ticket`
    pub fn finish_photo_load(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<Photo, String>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(photo) => {
                self.photo = Some(photo);
                if self.reset_adjustments_on_upload && !self.adjustments.is_default() {
                    log::debug!("Resetting {:?} for the new photo", self.adjustments);
                    self.adjustments.reset();
                }
                LoadOutcome::Loaded
            }
            Err(message) => LoadOutcome::Failed(message),
        }
    }

    pub fn select_frame(&mut self, frame: FrameId) {
        self.frame = Some(frame);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.adjustments.scale = scale;
    }

    pub fn set_offset_x(&mut self, offset: i32) {
        self.adjustments.offset_x = offset;
    }

    pub fn set_offset_y(&mut self, offset: i32) {
        self.adjustments.offset_y = offset;
    }

    /// Move the photo by a pixel delta, staying within the slider range
    pub fn nudge(&mut self, dx: i32, dy: i32) {
        self.adjustments.offset_x = Adjustments::clamp_offset(self.adjustments.offset_x.saturating_add(dx));
        self.adjustments.offset_y = Adjustments::clamp_offset(self.adjustments.offset_y.saturating_add(dy));
    }

    /// Change the scale by whole slider steps, staying within range
    pub fn zoom(&mut self, steps: i32) {
        let scale = self.adjustments.scale + steps as f32 * super::edit::SCALE_STEP;
        self.adjustments.scale = Adjustments::snap_scale(scale);
    }

    /// Drop the photo and go back to the default frame.
    /// Adjustments are kept; pending decodes are discarded.
    pub fn clear(&mut self) {
        self.photo = None;
        self.frame = self.default_frame;
        self.generation += 1;
    }

    /// Snapshot the session for export
    pub fn prepare_export(&self) -> Result<ExportJob> {
        let frame = self.frame.ok_or(FrameError::NoFrameSelected)?;
        Ok(ExportJob {
            photo: self.photo.clone(),
            frame,
            adjustments: self.adjustments,
            layering: self.layering,
        })
    }

    /// Render the live preview; `None` while no frame is selected
    pub fn render_preview(&self, catalog: &FrameCatalog) -> Result<Option<RgbaImage>> {
        match self.prepare_export() {
            Ok(job) => job.render(catalog).map(Some),
            Err(FrameError::NoFrameSelected) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::export::{encode_png, FRAMED_FILE_NAME, FRAME_ONLY_FILE_NAME};
    use image::Rgba;

    fn settings() -> Settings {
        Settings {
            export_dir: None,
            ..Settings::default()
        }
    }

    fn photo(name: &str) -> Photo {
        Photo::new(name, RgbaImage::from_pixel(120, 80, Rgba([200, 30, 60, 255])))
    }

    fn loaded(settings: &Settings) -> Session {
        let mut session = Session::new(settings);
        let ticket = session.begin_photo_load();
        assert_eq!(session.finish_photo_load(ticket, Ok(photo("one.png"))), LoadOutcome::Loaded);
        session
    }

    #[test]
    fn test_new_session_uses_default_frame() {
        let session = Session::new(&settings());
        assert!(!session.has_photo());
        assert_eq!(session.frame(), Some(FrameId::Mahdiyya));
        assert!(session.adjustments().is_default());
    }

    #[test]
    fn test_adjustments_persist_across_uploads_by_default() {
        let mut session = loaded(&settings());
        session.set_scale(1.5);
        session.set_offset_x(-40);
        session.set_offset_y(25);

        let ticket = session.begin_photo_load();
        session.finish_photo_load(ticket, Ok(photo("two.png")));

        assert_eq!(session.photo().unwrap().name, "two.png");
        assert_eq!(
            session.adjustments(),
            Adjustments {
                scale: 1.5,
                offset_x: -40,
                offset_y: 25
            }
        );
    }

    #[test]
    fn test_adjustments_reset_on_upload_when_configured() {
        let settings = Settings {
            reset_adjustments_on_upload: true,
            ..settings()
        };
        let mut session = loaded(&settings);
        session.set_scale(0.7);
        session.set_offset_y(90);

        let ticket = session.begin_photo_load();
        session.finish_photo_load(ticket, Ok(photo("two.png")));

        assert!(session.adjustments().is_default());
    }

    #[test]
    fn test_superseded_decode_is_dropped() {
        let mut session = Session::new(&settings());
        let first = session.begin_photo_load();
        let second = session.begin_photo_load();

        // The newer request finishes first; the old one must not win
        assert_eq!(session.finish_photo_load(second, Ok(photo("new.png"))), LoadOutcome::Loaded);
        assert_eq!(session.finish_photo_load(first, Ok(photo("old.png"))), LoadOutcome::Stale);
        assert_eq!(session.photo().unwrap().name, "new.png");
    }

    #[test]
    fn test_failed_decode_keeps_previous_photo() {
        let mut session = loaded(&settings());
        session.set_scale(1.2);

        let ticket = session.begin_photo_load();
        let outcome = session.finish_photo_load(ticket, Err("bad data".to_string()));

        assert_eq!(outcome, LoadOutcome::Failed("bad data".to_string()));
        assert_eq!(session.photo().unwrap().name, "one.png");
        assert_eq!(session.adjustments().scale, 1.2);
    }

    #[test]
    fn test_clear_resets_photo_and_frame_but_not_adjustments() {
        let mut session = loaded(&settings());
        session.select_frame(FrameId::Classic);
        session.set_offset_x(33);

        session.clear();

        assert!(!session.has_photo());
        assert_eq!(session.frame(), Some(FrameId::Mahdiyya));
        assert_eq!(session.adjustments().offset_x, 33);
    }

    #[test]
    fn test_clear_invalidates_pending_decode() {
        let mut session = Session::new(&settings());
        let ticket = session.begin_photo_load();
        session.clear();
        assert_eq!(session.finish_photo_load(ticket, Ok(photo("late.png"))), LoadOutcome::Stale);
        assert!(!session.has_photo());
    }

    #[test]
    fn test_export_after_clear_matches_fresh_session() {
        let catalog = FrameCatalog::new();
        let fresh = Session::new(&settings());

        let mut cleared = loaded(&settings());
        cleared.set_scale(1.8);
        cleared.clear();

        let a = fresh.prepare_export().unwrap();
        let b = cleared.prepare_export().unwrap();
        assert_eq!(a.file_name(), FRAME_ONLY_FILE_NAME);
        assert_eq!(b.file_name(), FRAME_ONLY_FILE_NAME);
        assert_eq!(
            encode_png(&a.render(&catalog).unwrap()).unwrap(),
            encode_png(&b.render(&catalog).unwrap()).unwrap()
        );
    }

    #[test]
    fn test_export_without_frame_is_refused() {
        let settings = Settings {
            default_frame: None,
            ..settings()
        };
        let session = loaded(&settings);

        assert!(matches!(session.prepare_export(), Err(FrameError::NoFrameSelected)));
        assert!(session.render_preview(&FrameCatalog::new()).unwrap().is_none());
    }

    #[test]
    fn test_export_with_photo_uses_framed_name() {
        let session = loaded(&settings());
        let job = session.prepare_export().unwrap();
        assert_eq!(job.file_name(), FRAMED_FILE_NAME);
        assert_eq!(job.frame, FrameId::Mahdiyya);
    }

    #[test]
    fn test_preview_matches_export() {
        let catalog = FrameCatalog::new();
        let mut session = loaded(&settings());
        session.select_frame(FrameId::Blossom);
        session.set_scale(1.3);
        session.set_offset_x(-12);

        let preview = session.render_preview(&catalog).unwrap().unwrap();
        let export = session.prepare_export().unwrap().render(&catalog).unwrap();
        assert_eq!(preview.as_raw(), export.as_raw());
    }

    #[test]
    fn test_nudge_and_zoom_stay_in_range() {
        let mut session = Session::new(&settings());
        session.nudge(150, -30);
        assert_eq!((session.adjustments().offset_x, session.adjustments().offset_y), (100, -30));

        session.zoom(3);
        assert_eq!(session.adjustments().scale, 1.3);
        session.zoom(20);
        assert_eq!(session.adjustments().scale, 2.0);
        session.zoom(-40);
        assert_eq!(session.adjustments().scale, 0.5);
    }
}
