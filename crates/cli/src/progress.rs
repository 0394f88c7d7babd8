use onehand_core::RunObserver;
use std::io::{self, Write};

/// Runs smaller than this finish too fast for a bar to be useful.
pub const PROGRESS_THRESHOLD: usize = 20;
const BAR_WIDTH: usize = 50;
const FILL: char = '█';

/// Draws the preparing/playing bars on stderr.
#[derive(Debug)]
pub struct ProgressBar {
    enabled: bool,
}

impl ProgressBar {
    pub fn for_count(count: usize) -> Self {
        Self {
            enabled: count >= PROGRESS_THRESHOLD,
        }
    }

    fn draw(&mut self, prefix: &str, iteration: usize, total: usize) {
        if !self.enabled || total == 0 {
            return;
        }
        let mut err = io::stderr().lock();
        self.draw_to(&mut err, prefix, iteration, total);
    }

    /// The bar is cosmetic: a failed write turns it off and the run carries on.
    fn draw_to(&mut self, out: &mut impl Write, prefix: &str, iteration: usize, total: usize) {
        if let Err(err) = write_bar(out, prefix, iteration, total) {
            tracing::debug!(%err, "progress bar disabled");
            self.enabled = false;
        }
    }
}

impl RunObserver for ProgressBar {
    fn on_prepared(&mut self, iteration: usize, total: usize) {
        self.draw("Preparing", iteration, total);
    }

    fn on_played(&mut self, game: usize, total: usize) {
        self.draw("Playing", game, total);
    }
}

fn write_bar(out: &mut impl Write, prefix: &str, iteration: usize, total: usize) -> io::Result<()> {
    write!(out, "\r{}", render_bar(prefix, iteration, total))?;
    if iteration == total {
        writeln!(out)?;
    }
    out.flush()
}

pub fn render_bar(prefix: &str, iteration: usize, total: usize) -> String {
    let percent = 100.0 * iteration as f64 / total as f64;
    let filled = BAR_WIDTH * iteration / total;
    let bar: String = std::iter::repeat(FILL)
        .take(filled)
        .chain(std::iter::repeat('-').take(BAR_WIDTH - filled))
        .collect();
    format!("{prefix}: |{bar}| {percent:.1}% Complete")
}
