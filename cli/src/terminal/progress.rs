use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use netprobe_core::pool::ProgressFn;

/// The bar currently on screen, if any. Log lines are printed around it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Shows a bar for `total` items, or nothing at all when `quiet > 0`.
    pub fn start(total: usize, label: &str, quiet: u8) -> Self {
        let bar = if quiet > 0 {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(total as u64);
            let style = ProgressStyle::with_template(
                "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({eta})",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_strings(&[
                "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
            ])
            .progress_chars("━╸ ");
            bar.set_style(style);
            bar.set_message(label.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };

        if let Ok(mut active) = ACTIVE.lock() {
            *active = Some(bar.clone());
        }

        Self { bar }
    }

    /// Callback for the engine: moves the bar to the finished count.
    pub fn callback(&self) -> ProgressFn {
        let bar = self.bar.clone();
        Arc::new(move |done: usize| bar.set_position(done as u64))
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
    }
}

/// Log writer that keeps the progress bar intact: the bar is hidden while a
/// line is written to stderr and redrawn afterwards.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let bar = ACTIVE.lock().ok().and_then(|active| active.clone());
        match bar {
            Some(bar) => bar.suspend(|| std::io::stderr().write_all(buf))?,
            None => std::io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stderr().flush()
    }
}
