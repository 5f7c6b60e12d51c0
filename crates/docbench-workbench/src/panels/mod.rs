//! Per-tab panel state and the model-backed workbench operations.

pub mod note;
pub mod ocr;
pub mod qna;

pub use note::NotePanel;
pub use ocr::OcrPanel;
pub use qna::QnaPanel;

/// Raises a panel's busy flag and lowers it on drop, so a cancelled
/// request never leaves the flag set.
pub(crate) struct Pending<'a>(&'a mut bool);

impl<'a> Pending<'a> {
    pub(crate) fn start(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
