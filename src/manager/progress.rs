//! Progress reporting for pack loading.

/// Receives coarse progress notifications while packs load.
///
/// Both methods default to doing nothing, so a reporter only implements what
/// it displays.
pub trait ProgressReporter {
    /// Overall progress in the range 0.0 to 1.0.
    fn update_progress(&mut self, _progress: f32) {}

    /// Description of the current phase.
    fn update_progress_text(&mut self, _text: &str) {}
}

/// A reporter that discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidProgress;

impl ProgressReporter for VoidProgress {}

/// A reporter that forwards phase changes to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    last_percent: Option<u32>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogProgress {
    fn update_progress(&mut self, progress: f32) {
        let percent = (progress.clamp(0.0, 1.0) * 100.0).round() as u32;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            log::debug!("Loading: {}%", percent);
        }
    }

    fn update_progress_text(&mut self, text: &str) {
        log::info!("{}", text);
    }
}

/// Maps the 0-1 progress of a sub-task onto `start..end` of a parent reporter.
pub struct SubProgress<'a> {
    parent: &'a mut dyn ProgressReporter,
    start: f32,
    end: f32,
}

impl<'a> SubProgress<'a> {
    pub fn new(parent: &'a mut dyn ProgressReporter, start: f32, end: f32) -> Self {
        Self { parent, start, end }
    }
}

impl ProgressReporter for SubProgress<'_> {
    fn update_progress(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        self.parent
            .update_progress(self.start + (self.end - self.start) * progress);
    }

    fn update_progress_text(&mut self, text: &str) {
        self.parent.update_progress_text(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<f32>,
        text: Vec<String>,
    }

    impl ProgressReporter for Recorder {
        fn update_progress(&mut self, progress: f32) {
            self.progress.push(progress);
        }

        fn update_progress_text(&mut self, text: &str) {
            self.text.push(text.to_string());
        }
    }

    #[test]
    fn test_sub_progress_maps_range() {
        let mut recorder = Recorder::default();
        {
            let mut sub = SubProgress::new(&mut recorder, 0.5, 1.0);
            sub.update_progress(0.0);
            sub.update_progress(0.5);
            sub.update_progress(2.0);
            sub.update_progress_text("textures");
        }
        assert_eq!(recorder.progress, vec![0.5, 0.75, 1.0]);
        assert_eq!(recorder.text, vec!["textures"]);
    }

    #[test]
    fn test_void_progress_accepts_everything() {
        let mut void = VoidProgress;
        void.update_progress(0.3);
        void.update_progress_text("ignored");
    }
}
