use std::{
    io::Write,
    sync::mpsc::{channel, Receiver},
    time::{Duration, Instant},
};

use raycast::{
    renderer::{RenderOutput, Renderer},
    utils::timer::timed_scope_log,
    Scene,
};

use super::progress::Progress;

/// Runs a [Renderer] while drawing a progress bar on stdout.
pub struct Executor {
    renderer: Renderer,
}

impl Executor {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    pub fn run(&self, scene: &Scene) -> RenderOutput {
        let dimensions = self.renderer.dimensions;
        let progress = Progress::new(dimensions.height as usize);
        let (tx, rx) = channel();

        log::info!(
            "Generating {dimensions} image, execution mode: {}",
            self.renderer.execution_mode
        );
        let output = std::thread::scope(|s| {
            s.spawn(|| print_progress(rx, &progress));

            // Owned by this closure: the channel closes when rendering returns or unwinds
            let tx = tx;
            timed_scope_log("render image", || {
                self.renderer.render_with_progress(scene, |y| {
                    let _ = tx.send(y);
                })
            })
            .res
        });

        log::info!("Image fully generated");
        output
    }
}

/// Counts finished rows until every sender is gone, redrawing the bar at
/// most every 300ms.
fn print_progress(rx: Receiver<u32>, progress: &Progress) {
    let mut last_progress_update = Instant::now();
    for y in rx.iter() {
        log::trace!("row {y} done");
        progress.add(1);

        if last_progress_update.elapsed() >= Duration::from_millis(300) {
            print!("\r{progress}");
            let _ = std::io::stdout().flush();
            last_progress_update = Instant::now();
        }
    }
    println!("\r{progress}");
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use super::print_progress;
    use crate::progress::Progress;

    #[test]
    fn progress_ends_with_the_channel() {
        let progress = Progress::new(4);
        let (tx, rx) = channel();

        std::thread::scope(|s| {
            let printer = s.spawn(|| print_progress(rx, &progress));
            for y in 0..3 {
                tx.send(y).unwrap();
            }
            drop(tx);
            printer.join().unwrap();
        });

        assert_eq!(progress.get_raw(), 3);
    }

    #[test]
    fn progress_ends_when_the_producer_panics() {
        let progress = Progress::new(4);
        let (tx, rx) = channel::<u32>();

        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            std::thread::scope(|s| {
                s.spawn(|| print_progress(rx, &progress));
                let tx = tx;
                tx.send(0).unwrap();
                panic!("render failed");
            })
        }));

        assert!(res.is_err());
        assert_eq!(progress.get_raw(), 1);
    }
}
