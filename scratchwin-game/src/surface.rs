use scratchwin_core::SurfaceConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPAQUE: u8 = u8::MAX;
const CLEAR: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceState {
    Covered,
    /// Terminal until an explicit reset
    Revealed,
}

/// Pointer input as delivered by the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave,
}

/// Permission to run the delayed post-reveal clear. A reset in between
/// invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Emitted once per cover, the first time the erased fraction exceeds the threshold
    Revealed(ClearTicket),
}

/// Opacity mask over the prize, one alpha byte per pixel
#[derive(Debug, Clone)]
pub struct ScratchSurface {
    width: u32,
    height: u32,
    brush_radius: f64,
    reveal_threshold: f64,
    reset_offer_threshold: f64,
    clear_delay: Duration,
    mask: Vec<u8>,
    erased: usize,
    state: SurfaceState,
    disabled: bool,
    pointer_down: bool,
    generation: u64,
}

impl ScratchSurface {
    pub fn new(config: &SurfaceConfig) -> Self {
        let pixels = config.width as usize * config.height as usize;

        Self {
            width: config.width,
            height: config.height,
            brush_radius: config.brush_radius,
            reveal_threshold: config.reveal_threshold,
            reset_offer_threshold: config.reset_offer_threshold,
            clear_delay: config.clear_delay,
            mask: vec![OPAQUE; pixels],
            erased: 0,
            state: SurfaceState::Covered,
            disabled: false,
            pointer_down: false,
            generation: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    pub fn clear_delay(&self) -> Duration {
        self.clear_delay
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state == SurfaceState::Revealed
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Stop accepting input. Used once the page has committed the prize.
    pub fn disable(&mut self) {
        self.disabled = true;
        self.pointer_down = false;
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<SurfaceEvent> {
        if self.disabled {
            return None;
        }

        match event {
            PointerEvent::Down(point) => {
                self.pointer_down = true;
                self.erase(point, self.brush_radius)
            }
            PointerEvent::Move(point) if self.pointer_down => self.erase(point, self.brush_radius),
            PointerEvent::Move(_) => None,
            PointerEvent::Up | PointerEvent::Leave => {
                self.pointer_down = false;
                None
            }
        }
    }

    /// Clear every pixel whose center lies within `radius` of `point`.
    /// The part of the circle outside the surface is ignored.
    pub fn erase(&mut self, point: Point, radius: f64) -> Option<SurfaceEvent> {
        if self.disabled {
            tracing::debug!("Ignoring erase on disabled surface");
            return None;
        }

        if self.mask.is_empty()
            || !point.x.is_finite()
            || !point.y.is_finite()
            || !(radius > 0.0 && radius.is_finite())
        {
            return None;
        }

        let x_min = ((point.x - radius).floor() as i64).max(0);
        let x_max = ((point.x + radius).ceil() as i64).min(i64::from(self.width) - 1);
        let y_min = ((point.y - radius).floor() as i64).max(0);
        let y_max = ((point.y + radius).ceil() as i64).min(i64::from(self.height) - 1);

        let radius_sq = radius * radius;
        let row_len = self.width as usize;

        for py in y_min..=y_max {
            let dy = py as f64 + 0.5 - point.y;
            for px in x_min..=x_max {
                let dx = px as f64 + 0.5 - point.x;
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }

                let pixel = &mut self.mask[py as usize * row_len + px as usize];
                if *pixel != CLEAR {
                    *pixel = CLEAR;
                    self.erased += 1;
                }
            }
        }

        self.check_reveal()
    }

    fn check_reveal(&mut self) -> Option<SurfaceEvent> {
        if self.state == SurfaceState::Revealed {
            return None;
        }

        let fraction = self.erased_fraction();
        if fraction <= self.reveal_threshold {
            return None;
        }

        self.state = SurfaceState::Revealed;
        tracing::info!("Surface revealed at {:.1}% erased", fraction * 100.0);

        Some(SurfaceEvent::Revealed(ClearTicket {
            generation: self.generation,
        }))
    }

    /// Erased fraction from the running counter
    pub fn erased_fraction(&self) -> f64 {
        if self.mask.is_empty() {
            return 0.0;
        }
        self.erased as f64 / self.mask.len() as f64
    }

    /// Erased fraction from a full scan of the mask
    pub fn compute_erased_fraction(&self) -> f64 {
        if self.mask.is_empty() {
            return 0.0;
        }
        let clear = self.mask.iter().filter(|&&alpha| alpha == CLEAR).count();
        clear as f64 / self.mask.len() as f64
    }

    pub fn mask_opaque_fraction(&self) -> f64 {
        if self.mask.is_empty() {
            return 1.0;
        }
        1.0 - self.erased_fraction()
    }

    pub fn progress_percent(&self) -> u8 {
        (self.erased_fraction() * 100.0).round() as u8
    }

    pub fn can_offer_reset(&self) -> bool {
        !self.disabled && self.erased_fraction() > self.reset_offer_threshold
    }

    /// Finish a pending post-reveal clear. Returns false for a stale ticket.
    pub fn apply_clear(&mut self, ticket: ClearTicket) -> bool {
        if ticket.generation != self.generation || self.state != SurfaceState::Revealed {
            tracing::debug!("Dropping stale clear for generation {}", ticket.generation);
            return false;
        }

        self.mask.fill(CLEAR);
        self.erased = self.mask.len();
        true
    }

    /// Cover the surface again. Refused while disabled.
    pub fn reset(&mut self) -> bool {
        if self.disabled {
            tracing::debug!("Ignoring reset on disabled surface");
            return false;
        }

        self.mask.fill(OPAQUE);
        self.erased = 0;
        self.state = SurfaceState::Covered;
        self.pointer_down = false;
        self.generation += 1;

        tracing::debug!("Surface reset, generation {}", self.generation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(width: u32, height: u32) -> ScratchSurface {
        ScratchSurface::new(&SurfaceConfig {
            width,
            height,
            brush_radius: 2.0,
            ..Default::default()
        })
    }

    /// Erase exactly one pixel
    fn erase_pixel(surface: &mut ScratchSurface, x: u32, y: u32) -> Option<SurfaceEvent> {
        surface.erase(Point::new(x as f64 + 0.5, y as f64 + 0.5), 0.5)
    }

    fn wipe(surface: &mut ScratchSurface) -> Option<SurfaceEvent> {
        let (w, h) = (surface.width() as f64, surface.height() as f64);
        surface.erase(Point::new(w / 2.0, h / 2.0), w + h)
    }

    #[test]
    fn test_starts_covered() {
        let s = surface(40, 30);
        assert_eq!(s.state(), SurfaceState::Covered);
        assert_eq!(s.mask_opaque_fraction(), 1.0);
        assert_eq!(s.compute_erased_fraction(), 0.0);
        assert_eq!(s.progress_percent(), 0);
    }

    #[test]
    fn test_incremental_count_matches_full_scan() {
        let mut s = surface(40, 30);
        s.erase(Point::new(10.0, 10.0), 5.0);
        s.erase(Point::new(12.0, 11.0), 5.0);
        s.erase(Point::new(39.0, 29.0), 4.0);

        assert!(s.erased_fraction() > 0.0);
        assert_eq!(s.erased_fraction(), s.compute_erased_fraction());
    }

    #[test]
    fn test_repeated_erase_is_idempotent() {
        let mut s = surface(40, 30);
        s.erase(Point::new(20.0, 15.0), 6.0);
        let once = s.compute_erased_fraction();
        for _ in 0..50 {
            s.erase(Point::new(20.0, 15.0), 6.0);
        }
        assert_eq!(s.compute_erased_fraction(), once);
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut s = surface(10, 10);

        for i in 0..70 {
            assert_eq!(erase_pixel(&mut s, i % 10, i / 10), None);
        }
        assert_eq!(s.erased_fraction(), 0.70);
        assert!(!s.is_revealed());

        let event = erase_pixel(&mut s, 0, 7);
        assert!(matches!(event, Some(SurfaceEvent::Revealed(_))));
        assert!(s.is_revealed());
    }

    #[test]
    fn test_reveal_fires_once() {
        let mut s = surface(40, 30);
        let mut events = 0;

        // under the threshold first
        if s.erase(Point::new(5.0, 5.0), 3.0).is_some() {
            events += 1;
        }
        assert_eq!(events, 0);

        for _ in 0..5 {
            if wipe(&mut s).is_some() {
                events += 1;
            }
            if s.erase(Point::new(1.0, 1.0), 1.0).is_some() {
                events += 1;
            }
        }

        assert_eq!(events, 1);
        assert_eq!(s.state(), SurfaceState::Revealed);
    }

    #[test]
    fn test_reset_after_reveal() {
        let mut s = surface(40, 30);
        wipe(&mut s).unwrap();

        assert!(s.reset());
        assert_eq!(s.state(), SurfaceState::Covered);
        assert_eq!(s.erased_fraction(), 0.0);
        assert_eq!(s.compute_erased_fraction(), 0.0);

        // a fresh cover reveals again
        assert!(wipe(&mut s).is_some());
    }

    #[test]
    fn test_clear_ticket() {
        let mut s = surface(40, 30);
        let Some(SurfaceEvent::Revealed(ticket)) = wipe(&mut s) else {
            panic!("expected reveal");
        };

        assert!(s.apply_clear(ticket));
        assert_eq!(s.compute_erased_fraction(), 1.0);
        assert_eq!(s.erased_fraction(), 1.0);
    }

    #[test]
    fn test_stale_clear_after_reset_is_ignored() {
        let mut s = surface(40, 30);
        let Some(SurfaceEvent::Revealed(ticket)) = wipe(&mut s) else {
            panic!("expected reveal");
        };

        s.reset();
        assert!(!s.apply_clear(ticket));
        assert_eq!(s.compute_erased_fraction(), 0.0);
        assert_eq!(s.state(), SurfaceState::Covered);
    }

    #[test]
    fn test_disabled_surface_ignores_input() {
        let mut s = surface(40, 30);
        s.erase(Point::new(10.0, 10.0), 8.0);
        let before = s.compute_erased_fraction();

        s.disable();
        assert!(wipe(&mut s).is_none());
        assert!(s.handle(PointerEvent::Down(Point::new(20.0, 20.0))).is_none());
        assert_eq!(s.compute_erased_fraction(), before);
        assert!(!s.reset());
        assert!(!s.can_offer_reset());
    }

    #[test]
    fn test_out_of_bounds_and_degenerate_input() {
        let mut s = surface(40, 30);
        assert!(s.erase(Point::new(-100.0, -100.0), 10.0).is_none());
        assert!(s.erase(Point::new(500.0, 15.0), 10.0).is_none());
        assert!(s.erase(Point::new(f64::NAN, 15.0), 10.0).is_none());
        assert!(s.erase(Point::new(20.0, 15.0), 0.0).is_none());
        assert!(s.erase(Point::new(20.0, 15.0), -3.0).is_none());
        assert_eq!(s.compute_erased_fraction(), 0.0);

        // a circle centred just off the edge still clears the overlap
        s.erase(Point::new(-1.0, 15.0), 3.0);
        assert!(s.compute_erased_fraction() > 0.0);
        assert_eq!(s.erased_fraction(), s.compute_erased_fraction());
    }

    #[test]
    fn test_zero_size_surface() {
        let mut s = surface(0, 30);
        assert!(s.erase(Point::new(0.0, 0.0), 50.0).is_none());
        assert_eq!(s.compute_erased_fraction(), 0.0);
        assert!(!s.is_revealed());
        assert!(s.reset());
    }

    #[test]
    fn test_pointer_protocol() {
        let mut s = surface(40, 30);

        s.handle(PointerEvent::Move(Point::new(10.0, 10.0)));
        assert_eq!(s.compute_erased_fraction(), 0.0);

        s.handle(PointerEvent::Down(Point::new(10.0, 10.0)));
        let after_down = s.compute_erased_fraction();
        assert!(after_down > 0.0);

        s.handle(PointerEvent::Move(Point::new(20.0, 10.0)));
        let after_move = s.compute_erased_fraction();
        assert!(after_move > after_down);

        s.handle(PointerEvent::Leave);
        s.handle(PointerEvent::Move(Point::new(30.0, 20.0)));
        assert_eq!(s.compute_erased_fraction(), after_move);
    }

    #[test]
    fn test_reset_offer() {
        let mut s = surface(10, 10);
        for i in 0..10 {
            erase_pixel(&mut s, i, 0);
        }
        assert_eq!(s.progress_percent(), 10);
        assert!(!s.can_offer_reset());

        erase_pixel(&mut s, 0, 1);
        assert!(s.can_offer_reset());
    }
}
