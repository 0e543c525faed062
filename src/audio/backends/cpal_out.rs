use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio::AudioDriver;

/// Gain ramp on either side of a tone span. Prevents horrible clicking
/// from the speakers when the oscillator keys on or off.
const RAMP: f64 = 0.005;

const VOLUME: f64 = 0.6;

#[derive(Debug, Clone, Copy)]
struct ToneSpan {
    start: f64,
    end: f64,
}

/// Raised-cosine envelope over the scheduled spans at time `t`.
///
/// Spans are non-overlapping and sorted by start time, so the first span
/// whose ramp window contains `t` wins.
fn gain_at(spans: &[ToneSpan], t: f64) -> f64 {
    for span in spans {
        if t < span.start {
            break;
        }
        if t < span.start + RAMP {
            return 0.5 * (1.0 - (std::f64::consts::PI * (t - span.start) / RAMP).cos());
        }
        if t <= span.end {
            return 1.0;
        }
        if t < span.end + RAMP {
            return 0.5 * (1.0 + (std::f64::consts::PI * (t - span.end) / RAMP).cos());
        }
    }
    0.0
}

/// Sine-tone output through the default cpal device.
///
/// The driver's clock is derived from the number of samples the output
/// callback has rendered, so it is monotonic and agrees exactly with what
/// has been (or is about to be) heard.
pub struct CpalDriver {
    _stream: cpal::Stream,
    spans: Arc<Mutex<Vec<ToneSpan>>>,
    samples_rendered: Arc<AtomicU64>,
    sample_rate: f64,
}

impl CpalDriver {
    pub fn open(frequency_hz: f32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no default audio output device"))?;

        let supported = device
            .default_output_config()
            .context("failed to query default output config")?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(anyhow!(
                "unsupported output sample format {:?} (expected f32)",
                supported.sample_format()
            ));
        }

        let config: cpal::StreamConfig = supported.into();
        let sample_rate = config.sample_rate.0 as f64;
        let channels = config.channels as usize;

        let spans: Arc<Mutex<Vec<ToneSpan>>> = Arc::new(Mutex::new(Vec::new()));
        let samples_rendered = Arc::new(AtomicU64::new(0));

        let cb_spans = Arc::clone(&spans);
        let cb_samples = Arc::clone(&samples_rendered);
        let step = frequency_hz as f64 / sample_rate;
        let mut phase = 0.0f64;
        let mut rendered = 0u64;

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let Ok(mut spans) = cb_spans.lock() else {
                        data.fill(0.0);
                        return;
                    };

                    for frame in data.chunks_mut(channels) {
                        let t = rendered as f64 / sample_rate;
                        let amp = gain_at(&spans, t) * VOLUME;
                        let sample = ((phase * std::f64::consts::TAU).sin() * amp) as f32;

                        phase += step;
                        if phase >= 1.0 {
                            phase -= 1.0;
                        }

                        for out in frame {
                            *out = sample;
                        }
                        rendered += 1;
                    }

                    let now = rendered as f64 / sample_rate;
                    spans.retain(|span| span.end + RAMP >= now);
                    cb_samples.store(rendered, Ordering::Release);
                },
                |err| eprintln!("audio stream error: {err}"),
                None,
            )
            .context("failed to build output stream")?;

        stream.play().context("failed to start output stream")?;

        Ok(Self {
            _stream: stream,
            spans,
            samples_rendered,
            sample_rate,
        })
    }
}

impl AudioDriver for CpalDriver {
    fn schedule_tone(&mut self, start: f64, duration: f64) {
        if duration <= 0.0 {
            return;
        }
        if let Ok(mut spans) = self.spans.lock() {
            spans.push(ToneSpan {
                start,
                end: start + duration,
            });
            spans.sort_by(|a, b| a.start.total_cmp(&b.start));
        }
    }

    fn cancel_scheduled(&mut self, time: f64) {
        if let Ok(mut spans) = self.spans.lock() {
            spans.retain(|span| span.start < time);
            for span in spans.iter_mut() {
                span.end = span.end.min(time);
            }
        }
    }

    fn current_time(&self) -> f64 {
        self.samples_rendered.load(Ordering::Acquire) as f64 / self.sample_rate
    }

    fn unsuspend(&mut self) {
        // Restarts a stream paused by the host; harmless when running.
        let _ = self._stream.play();
    }
}

#[cfg(test)]
mod tests {
    use super::{gain_at, ToneSpan, RAMP};

    #[test]
    fn envelope_is_silent_outside_spans_and_full_inside() {
        let spans = [ToneSpan {
            start: 1.0,
            end: 1.1,
        }];

        assert_eq!(gain_at(&spans, 0.5), 0.0);
        assert_eq!(gain_at(&spans, 1.05), 1.0);
        assert_eq!(gain_at(&spans, 1.1 + RAMP), 0.0);

        let mid_attack = gain_at(&spans, 1.0 + RAMP / 2.0);
        assert!(mid_attack > 0.4 && mid_attack < 0.6);
    }
}
