use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use super::sanitizer::row_to_name;
use super::table::CsvTable;
use crate::config::Config;
use crate::decoder::{FrameData, FrameSource};
use crate::error::{AppError, Result};

const DURATION_EPSILON: f64 = 1e-6;
const PROGRESS_EVERY: usize = 20;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SampleSummary {
    /// Timestamps that fit in the video.
    pub planned: usize,
    /// min(planned, CSV rows)
    pub attempted: usize,
    pub saved: usize,
    pub skipped: usize,
    pub cancelled: bool,
}

/// `0, interval, 2*interval, ...` up to and including `duration`, rounded to
/// the millisecond.
pub fn sample_timestamps(duration: f64, interval: f64) -> Vec<f64> {
    let mut times = Vec::new();
    if !(interval > 0.0) || duration < 0.0 {
        return times;
    }
    let mut i = 0u64;
    loop {
        let t = i as f64 * interval;
        if t > duration + DURATION_EPSILON {
            break;
        }
        times.push((t * 1000.0).round() / 1000.0);
        i += 1;
    }
    times
}

/// `dir/name.ext`, or the first free `dir/name_N.ext` if that exists.
pub fn unique_path(dir: &Path, name: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{}{}", name, ext));
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|suffix| dir.join(format!("{}_{}{}", name, suffix, ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Seek by time first, then fall back to the nearest frame index once.
fn grab_frame<S: FrameSource>(source: &mut S, t_sec: f64, fps: f64) -> Option<FrameData> {
    match source.frame_at_msec(t_sec * 1000.0) {
        Ok(Some(frame)) => return Some(frame),
        Ok(None) => {}
        Err(e) => debug!("Seek to {:.3}s failed: {}", t_sec, e),
    }

    let index = (t_sec * fps).round().max(0.0) as u64;
    match source.frame_at_index(index) {
        Ok(frame) => frame,
        Err(e) => {
            debug!("Seek to frame {} failed: {}", index, e);
            None
        }
    }
}

/// Saves one frame per sample timestamp, named after the matching CSV row.
/// Per-frame failures are logged and skipped; `stop` ends the run early.
pub fn sample_frames<S: FrameSource>(
    source: &mut S,
    table: &CsvTable,
    config: &Config,
    stop: &AtomicBool,
) -> Result<SampleSummary> {
    let video = source.info();
    let duration = video.duration_secs();
    if duration <= 0.0 {
        return Err(AppError::UnknownDuration {
            fps: video.fps,
            frame_count: video.frame_count,
        });
    }

    fs::create_dir_all(&config.out_dir)?;
    let ext = config.normalized_ext();

    let times = sample_timestamps(duration, config.interval_secs);
    let total = times.len().min(table.row_count());

    info!(
        "Video length: {:.3}s, FPS: {:.3}, frames: {}",
        duration, video.fps, video.frame_count
    );
    info!("Interval: {}s, planned samples: {}", config.interval_secs, times.len());
    info!("CSV rows: {}, frames to save: {}", table.row_count(), total);

    let mut summary = SampleSummary {
        planned: times.len(),
        attempted: total,
        ..SampleSummary::default()
    };

    for (i, &t_sec) in times.iter().take(total).enumerate() {
        if stop.load(Ordering::SeqCst) {
            warn!("Interrupted after {} of {} samples", i, total);
            summary.cancelled = true;
            break;
        }

        let frame = match grab_frame(source, t_sec, video.fps) {
            Some(frame) => frame,
            None => {
                warn!("Could not read a frame at {:.3}s, skipped", t_sec);
                summary.skipped += 1;
                continue;
            }
        };

        let cells = table.row(i).unwrap_or_default();
        let name = row_to_name(cells, config.max_name_len);
        let out_path = unique_path(&config.out_dir, &name, &ext);

        if let Err(e) = frame.save(&out_path) {
            warn!("Failed to save {}: {}", out_path.display(), e);
            summary.skipped += 1;
            continue;
        }

        summary.saved += 1;
        if summary.saved % PROGRESS_EVERY == 0 || i + 1 == total {
            info!("Saved {}/{}", summary.saved, total);
        }
    }

    info!(
        "Done: saved {} frames to {}",
        summary.saved,
        config.out_dir.display()
    );
    Ok(summary)
}
