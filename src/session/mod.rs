//! Tracking sessions.
//!
//! A [`Session`] is the single owner of the rep counter for one tracking run.
//! Frames go in through [`Session::process_frame`] (live use) or
//! [`Session::replay`] (recordings); completed reps go out through the
//! session's [`EventBus`] and are tallied in a [`SessionReport`].

mod report;

pub use report::{RepMark, SessionReport};

use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::counter::{RepCounter, RepEvent};
use crate::events::EventBus;
use crate::geometry::ScaleMode;
use crate::pose::{Dimensions, LandmarkSet, Recording, RunningMode};
use crate::render::{FrameOutput, FrameRenderer, SkipReason};

/// One tracking session: configuration, counter state and event delivery.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    renderer: FrameRenderer,
    counter: RepCounter,
    bus: EventBus,
    last_timestamp_ms: Option<u64>,
    report: SessionReport,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let renderer = FrameRenderer::from_config(&config);
        let counter = config.build_counter();
        let report = Self::empty_report(&config);
        Self {
            config,
            renderer,
            counter,
            bus: EventBus::new(),
            last_timestamp_ms: None,
            report,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Registers a rep event consumer.
    pub fn subscribe(&mut self) -> Receiver<RepEvent> {
        self.bus.subscribe()
    }

    pub fn count(&self) -> u32 {
        self.counter.count()
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    /// Summary of the frames processed since creation or the last reset.
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Starts the session over: counter back to `Up`/0, statistics and the
    /// timestamp guard cleared. Subscribers stay registered.
    pub fn reset(&mut self) {
        self.counter.reset();
        self.last_timestamp_ms = None;
        self.report = Self::empty_report(&self.config);
        info!("session reset");
    }

    /// The scale policy for frames captured in `running_mode`.
    pub fn scale_mode_for(&self, running_mode: RunningMode) -> ScaleMode {
        self.config
            .scale_mode
            .unwrap_or_else(|| running_mode.scale_mode())
    }

    /// Processes one live frame.
    ///
    /// The surface is the configured one, or the frame's own image size when
    /// none is configured.
    pub fn process_frame(&mut self, frame: &LandmarkSet, running_mode: RunningMode) -> FrameOutput {
        let mode = self.scale_mode_for(running_mode);
        let surface = self.config.surface.unwrap_or(frame.image);
        self.process(frame, surface, mode)
    }

    /// Replays every frame of `recording` in order and returns the updated
    /// report.
    pub fn replay(&mut self, recording: &Recording) -> &SessionReport {
        self.replay_with(recording, |_, _| {})
    }

    /// Like [`Session::replay`], handing each frame's output to `on_frame`
    /// together with the frame's position in the recording.
    ///
    /// Surface precedence: session config, then the recording's surface, then
    /// each frame's image size.
    pub fn replay_with<F>(&mut self, recording: &Recording, mut on_frame: F) -> &SessionReport
    where
        F: FnMut(usize, &FrameOutput),
    {
        let mode = self.scale_mode_for(recording.running_mode);
        let surface = self.config.surface.or(recording.surface);
        info!(
            frames = recording.frames.len(),
            running_mode = ?recording.running_mode,
            scale_mode = %mode,
            "replaying recording"
        );

        for (position, frame) in recording.frames.iter().enumerate() {
            let output = self.process(frame, surface.unwrap_or(frame.image), mode);
            on_frame(position, &output);
        }

        info!(reps = self.report.reps, "replay finished");
        &self.report
    }

    fn process(&mut self, frame: &LandmarkSet, surface: Dimensions, mode: ScaleMode) -> FrameOutput {
        let position = self.report.frames;
        self.report.frames += 1;
        self.report.scale_mode = Some(mode);

        let output = match self.check_order(frame) {
            Some(reason) => {
                debug!(frame = position, %reason, "frame drawn without counting");
                self.renderer
                    .render_skipped(frame, surface, mode, &self.counter, reason)
            }
            None => self.renderer.render(frame, surface, mode, &mut self.counter),
        };

        if let Some(angle) = output.angle {
            self.report.frames_counted += 1;
            self.report.min_angle = Some(self.report.min_angle.map_or(angle, |m| m.min(angle)));
            self.report.max_angle = Some(self.report.max_angle.map_or(angle, |m| m.max(angle)));
        }
        if let Some(reason) = output.skipped {
            self.record_skip(reason);
        }
        if let Some(event) = output.event {
            self.report.reps = event.count;
            self.report.events.push(RepMark {
                frame: position,
                timestamp_ms: frame.timestamp_ms,
                count: event.count,
            });
            let delivered = self.bus.publish(event);
            info!(count = event.count, frame = position, delivered, "squat counted");
        }

        output
    }

    /// Rejects frames whose timestamp does not strictly follow the last
    /// accepted one. Frames without timestamps are always accepted.
    fn check_order(&mut self, frame: &LandmarkSet) -> Option<SkipReason> {
        let timestamp_ms = frame.timestamp_ms?;
        match self.last_timestamp_ms {
            Some(previous_ms) if timestamp_ms <= previous_ms => Some(SkipReason::OutOfOrder {
                previous_ms,
                timestamp_ms,
            }),
            _ => {
                self.last_timestamp_ms = Some(timestamp_ms);
                None
            }
        }
    }

    fn record_skip(&mut self, reason: SkipReason) {
        self.report.frames_skipped += 1;
        match reason {
            SkipReason::InvalidDimensions { .. } => self.report.invalid_dimension_frames += 1,
            SkipReason::MissingLandmark { .. } => self.report.missing_landmark_frames += 1,
            SkipReason::NonFiniteAngle => self.report.non_finite_angle_frames += 1,
            SkipReason::OutOfOrder { .. } => self.report.out_of_order_frames += 1,
        }
    }

    fn empty_report(config: &SessionConfig) -> SessionReport {
        SessionReport {
            threshold: config.threshold,
            hysteresis: config.hysteresis,
            scale_mode: config.scale_mode,
            ..Default::default()
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
