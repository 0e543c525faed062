pub mod backends;

#[cfg(not(feature = "audio"))]
use anyhow::anyhow;
use anyhow::Result;

/// Clock and tone-scheduling surface of the audio layer.
///
/// Tones are queued ahead of time against the same monotonic clock the
/// engine polls, so audible output never depends on poll cadence. All
/// times are in seconds.
pub trait AudioDriver {
    /// Queue an inaudible-audible-inaudible tone ramp starting at `start`
    /// for `duration` seconds.
    fn schedule_tone(&mut self, start: f64, duration: f64);

    /// Drop every queued tone at or after `time` and return to silence.
    fn cancel_scheduled(&mut self, time: f64);

    /// Monotonic clock; pinned at 0.0 when no real backend exists.
    fn current_time(&self) -> f64;

    /// Resume a suspended backend (e.g. one waiting on user interaction).
    fn unsuspend(&mut self);
}

impl<T: AudioDriver + ?Sized> AudioDriver for Box<T> {
    fn schedule_tone(&mut self, start: f64, duration: f64) {
        (**self).schedule_tone(start, duration)
    }

    fn cancel_scheduled(&mut self, time: f64) {
        (**self).cancel_scheduled(time)
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn unsuspend(&mut self) {
        (**self).unsuspend()
    }
}

/// Silent driver with a dead clock; the degraded no-audio-backend mode.
///
/// With the clock pinned at 0 the engine only releases events scheduled at
/// the plan anchor itself and then stalls. Tests that want silent
/// full-speed playback use a scripted clock instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDriver;

impl AudioDriver for NullDriver {
    fn schedule_tone(&mut self, _start: f64, _duration: f64) {}

    fn cancel_scheduled(&mut self, _time: f64) {}

    fn current_time(&self) -> f64 {
        0.0
    }

    fn unsuspend(&mut self) {}
}

/// Open the tone backend compiled into this build.
pub fn create_driver(frequency_hz: f32) -> Result<Box<dyn AudioDriver>> {
    #[cfg(feature = "audio")]
    {
        let driver = backends::cpal_out::CpalDriver::open(frequency_hz)?;
        Ok(Box::new(driver))
    }

    #[cfg(not(feature = "audio"))]
    {
        let _ = frequency_hz;
        Err(anyhow!(
            "audio backend is disabled in this build (rebuild with `--features audio`)"
        ))
    }
}
