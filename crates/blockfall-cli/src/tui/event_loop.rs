use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// When to redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Redraw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Redraw after state changes, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    fn new(now: Instant) -> Self {
        let past = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: now,
            last_render: past,
            // first frame
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.set_tick_interval_at(interval, Instant::now());
    }

    fn set_tick_interval_at(&mut self, interval: Option<Duration>, now: Instant) {
        if self.tick_interval != interval {
            self.tick_interval = interval;
            self.last_tick = now;
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or render is due or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.due_event(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_event(&mut self, now: Instant) -> Option<TuiEvent> {
        if let Some(tick_interval) = self.tick_interval
            && now.duration_since(self.last_tick) >= tick_interval
        {
            self.last_tick = now;
            self.dirty = true;
            return Some(TuiEvent::Tick);
        }

        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Some(TuiEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.tick_interval.map(|interval| self.last_tick + interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_first_event_is_render() {
        let now = Instant::now();
        let mut events = EventLoop::new(now);
        assert_eq!(events.due_event(now), Some(TuiEvent::Render));
        assert_eq!(events.due_event(now), None);
        assert_eq!(events.compute_timeout(now), None);
    }

    #[test]
    fn test_tick_after_interval() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_tick_interval_at(Some(700 * MS), start);
        events.due_event(start);

        assert_eq!(events.compute_timeout(start), Some(700 * MS));
        assert_eq!(events.due_event(start + 699 * MS), None);
        assert_eq!(events.due_event(start + 700 * MS), Some(TuiEvent::Tick));
        assert_eq!(events.due_event(start + 700 * MS), Some(TuiEvent::Render));
        assert_eq!(events.compute_timeout(start + 700 * MS), Some(700 * MS));
    }

    #[test]
    fn test_changing_interval_restarts_timer() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.due_event(start);
        events.set_tick_interval_at(Some(700 * MS), start);

        events.set_tick_interval_at(Some(700 * MS), start + 500 * MS);
        assert_eq!(events.due_event(start + 700 * MS), Some(TuiEvent::Tick));

        events.set_tick_interval_at(None, start + 800 * MS);
        assert_eq!(events.due_event(start + 5000 * MS), Some(TuiEvent::Render));
        assert_eq!(events.due_event(start + 5000 * MS), None);

        events.set_tick_interval_at(Some(640 * MS), start + 6000 * MS);
        assert_eq!(events.due_event(start + 6100 * MS), None);
        assert_eq!(events.due_event(start + 6640 * MS), Some(TuiEvent::Tick));
    }

    #[test]
    fn test_throttled_render() {
        let start = Instant::now();
        let mut events = EventLoop::new(start);
        events.set_render_mode(RenderMode::Throttled(16 * MS));
        assert_eq!(events.due_event(start), Some(TuiEvent::Render));

        events.dirty = true;
        assert_eq!(events.due_event(start + 10 * MS), None);
        assert_eq!(events.compute_timeout(start + 10 * MS), Some(6 * MS));
        assert_eq!(events.due_event(start + 16 * MS), Some(TuiEvent::Render));
    }
}
