use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Stage names reported through [`PipelineLogger::timing`].
pub mod stage {
    pub const DECODE: &str = "decode";
    pub const LOCALIZE: &str = "localize";
    pub const ENCODE: &str = "encode";
    pub const CLASSIFY: &str = "classify";
    pub const ANNOTATE: &str = "annotate";
    pub const DISPLAY: &str = "display";
}

/// Metric names reported through [`PipelineLogger::metric`].
pub mod metric {
    pub const FACES_PER_IMAGE: &str = "faces_per_image";
    pub const UNKNOWN_FACES: &str = "unknown_faces";
}

/// Observer for training and validation runs.
///
/// Use cases report through this trait instead of printing, so the CLI can
/// log to stderr while tests stay silent.
pub trait PipelineLogger: Send {
    /// Report image-level progress within the current phase.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one image.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a per-image metric (e.g. faces found).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// A phase (training, validation) is starting. Default: no-op.
    fn phase_started(&mut self, _phase: &str) {}

    /// A phase finished after `elapsed`. Default: no-op.
    fn phase_finished(&mut self, _phase: &str, _elapsed: Duration) {}

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// A finished phase with the number of images it reported progress for.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseRecord {
    pub name: String,
    pub elapsed: Duration,
    pub images: usize,
}

/// CLI logger: forwards to `log::info!`, keeps per-stage timings and
/// metrics, and reports a summary when the run ends.
///
/// Progress lines are throttled to every `throttle_images` images.
pub struct StdoutPipelineLogger {
    throttle_images: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    phases: Vec<PhaseRecord>,
    start_time: Instant,
    phase_images: usize,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new(throttle_images: usize) -> Self {
        Self {
            throttle_images: throttle_images.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            phases: Vec::new(),
            start_time: Instant::now(),
            phase_images: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() && self.phases.is_empty() {
            return None;
        }

        let elapsed = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!("Run summary ({elapsed:.1}s total):")];

        for phase in &self.phases {
            lines.push(format!(
                "  {:12}: {} images in {:.2}s",
                phase.name,
                phase.images,
                phase.elapsed.as_secs_f64()
            ));
        }

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for name in stages {
            let durations = &self.timings[name];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            lines.push(format!(
                "  {name:12}: avg {avg_ms:7.1}ms  total {total_ms:8.0}ms"
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let total: f64 = values.iter().sum();
            lines.push(format!("  {name}: avg {:.1}  total {total:.0}", mean(values)));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.phase_images += 1;
        if total > 0 && (current % self.throttle_images == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Processing: {current}/{total} images ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn phase_started(&mut self, phase: &str) {
        self.phase_images = 0;
        log::info!("[{}] Started", phase.to_uppercase());
    }

    fn phase_finished(&mut self, phase: &str, elapsed: Duration) {
        log::info!(
            "[{}] Finished (total time: {:.3}s)",
            phase.to_uppercase(),
            elapsed.as_secs_f64()
        );
        self.phases.push(PhaseRecord {
            name: phase.to_string(),
            elapsed,
            images: self.phase_images,
        });
        self.phase_images = 0;
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
