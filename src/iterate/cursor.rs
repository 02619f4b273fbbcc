//! Cursor - the resumable keyed traversal engine.
//!
//! State:
//! - keys: snapshot of the record's key order, taken once in `new`.
//! - position: next index to yield (signed; `skip_next` may push it anywhere).
//! - step: increment per advance (negative = walk backwards).
//! - end_bound: exclusive upper bound, always clamped to the snapshot length.
//! - floor_bound: exclusive lower bound, clamped to -1 from below.
//! - halted: absorbing terminal flag.
//!
//! Values are NOT snapshotted: every step does a fresh `Record::lookup`, so a
//! record with interior mutability is observed as it is at step time.
//!
//! `skip_next`, `limit` and `stop_at` act in the direction of travel: with a
//! negative step they move the position down and set `floor_bound` instead of
//! `end_bound`. Position arithmetic saturates, so huge arguments just leave the
//! valid range and the next advance halts.
//!
//! The cursor is its own `Iterator`. Drive it with `while let Some(x) = c.advance()`
//! (or `for x in &mut c`) and the combinators below act on the traversal in flight.

use log::{debug, trace, warn};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::keys::Key;
use crate::metrics::{
    record_cursor_created, record_cursor_halted, record_early_stop, record_missing_key_skipped,
    record_step_yielded, record_zero_step_halt,
};
use crate::record::Record;

/// Windowing options: `{start, end, step}`.
///
/// Defaults: start = 0 (or the last index when step < 0), end = unbounded, step = 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: Option<isize>,
    pub end: Option<isize>,
    pub step: isize,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            step: 1,
        }
    }
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: isize) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: isize) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = step;
        self
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Window {{ start: {}, end: {}, step: {} }}",
            self.start
                .map(|v| v.to_string())
                .unwrap_or_else(|| "default".to_string()),
            self.end
                .map(|v| v.to_string())
                .unwrap_or_else(|| "unbounded".to_string()),
            self.step,
        )
    }
}

/// Something a terminal consumer can drain: an indexed advance plus a halt switch.
pub trait Traverse {
    type Item;

    /// Next produced value together with the record index it came from.
    fn next_indexed(&mut self) -> Option<(usize, Self::Item)>;

    /// Enter the terminal state.
    fn halt(&mut self);
}

impl<C: Traverse + ?Sized> Traverse for &mut C {
    type Item = C::Item;

    fn next_indexed(&mut self) -> Option<(usize, C::Item)> {
        (**self).next_indexed()
    }

    fn halt(&mut self) {
        (**self).halt()
    }
}

/// Stateful cursor over `record`, projecting each step through `project`.
pub struct Cursor<'r, R: ?Sized, T, P> {
    record: &'r R,
    keys: Vec<Key>,
    project: P,
    position: isize,
    step: isize,
    end_bound: Option<isize>,
    floor_bound: Option<isize>,
    halted: bool,
    _out: PhantomData<fn() -> T>,
}

impl<'r, R, T, P> Cursor<'r, R, T, P>
where
    R: Record + ?Sized,
    P: FnMut(&'r R, &Key, &'r R::Value, usize) -> T,
{
    pub fn new(record: &'r R, project: P, window: Window) -> Self {
        let keys = record.key_snapshot();
        let count = keys.len() as isize;
        // Обратный обход без явного start начинается с последнего индекса.
        let position = match window.start {
            Some(s) => s,
            None if window.step < 0 => count - 1,
            None => 0,
        };

        let mut cursor = Self {
            record,
            keys,
            project,
            position,
            step: window.step,
            end_bound: window.end,
            floor_bound: None,
            halted: false,
            _out: PhantomData,
        };
        record_cursor_created();
        debug!("cursor: created over {} key(s), {}", count, window);

        if window.step == 0 {
            warn!("cursor: zero step would never progress, halting");
            record_zero_step_halt();
            cursor.enter_halted();
        }
        cursor
    }

    /// Produce the next projected value, or None once the cursor is halted.
    #[inline]
    pub fn advance(&mut self) -> Option<T> {
        self.advance_indexed().map(|(_, v)| v)
    }

    /// Like `advance`, also returning the record index of the produced value.
    pub fn advance_indexed(&mut self) -> Option<(usize, T)> {
        loop {
            if self.halted {
                return None;
            }
            if !self.in_range() {
                trace!(
                    "cursor: position {} outside ({}, {}), halting",
                    self.position,
                    self.effective_floor(),
                    self.effective_end()
                );
                self.enter_halted();
                return None;
            }

            let index = self.position as usize;
            self.position = self.position.saturating_add(self.step);

            let record: &'r R = self.record;
            let key = &self.keys[index];
            match record.lookup(key) {
                Some(value) => {
                    record_step_yielded();
                    let out = (self.project)(record, key, value, index);
                    return Some((index, out));
                }
                None => {
                    // Ключ из снимка не найден в записи, пропускаем слот.
                    debug!("cursor: key '{}' has no value in record, skipping", key);
                    record_missing_key_skipped();
                }
            }
        }
    }
}

impl<'r, R: ?Sized, T, P> Cursor<'r, R, T, P> {
    /// Move the position `n` slots in the direction of travel (may leave the valid range).
    pub fn skip_next(&mut self, n: isize) -> &mut Self {
        self.position = if self.step < 0 {
            self.position.saturating_sub(n)
        } else {
            self.position.saturating_add(n)
        };
        self
    }

    /// Yield at most `n` more indices, counted from the current position
    /// in the direction of travel.
    pub fn limit(&mut self, n: isize) -> &mut Self {
        if self.step < 0 {
            self.floor_bound = Some(self.position.saturating_sub(n));
        } else {
            self.end_bound = Some(self.position.saturating_add(n));
        }
        self
    }

    /// Use `n` as the increment for all subsequent advances. Zero halts.
    pub fn stride(&mut self, n: isize) -> &mut Self {
        if n == 0 {
            warn!("cursor: stride(0) would never progress, halting");
            record_zero_step_halt();
            self.enter_halted();
        }
        self.step = n;
        self
    }

    /// Absolute exclusive end index; with a negative step, the exclusive floor.
    pub fn stop_at(&mut self, n: isize) -> &mut Self {
        if self.step < 0 {
            self.floor_bound = Some(n);
        } else {
            self.end_bound = Some(n);
        }
        self
    }

    /// Halt now; the next advance yields nothing.
    pub fn stop(&mut self) -> &mut Self {
        if !self.halted {
            record_early_stop();
        }
        self.enter_halted();
        self
    }

    /// Next index to yield.
    pub fn current_position(&self) -> isize {
        self.position
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn end_bound(&self) -> Option<isize> {
        self.end_bound
    }

    pub fn floor_bound(&self) -> Option<isize> {
        self.floor_bound
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Number of keys in the snapshot.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// min(end_bound, key_count)
    pub fn effective_end(&self) -> isize {
        let count = self.keys.len() as isize;
        match self.end_bound {
            Some(end) => end.min(count),
            None => count,
        }
    }

    /// max(floor_bound, -1)
    pub fn effective_floor(&self) -> isize {
        match self.floor_bound {
            Some(floor) => floor.max(-1),
            None => -1,
        }
    }

    #[inline]
    fn in_range(&self) -> bool {
        self.position > self.effective_floor() && self.position < self.effective_end()
    }

    fn enter_halted(&mut self) {
        if !self.halted {
            self.halted = true;
            record_cursor_halted();
        }
    }

    /// Upper bound on how many indices are still reachable.
    fn remaining_upper(&self) -> usize {
        if self.halted || !self.in_range() {
            return 0;
        }
        // in range: both distances are in 1..=key_count
        let dist = (if self.step > 0 {
            self.effective_end() - self.position
        } else {
            self.position - self.effective_floor()
        }) as usize;
        (dist - 1) / self.step.unsigned_abs() + 1
    }
}

impl<'r, R, T, P> Iterator for Cursor<'r, R, T, P>
where
    R: Record + ?Sized,
    P: FnMut(&'r R, &Key, &'r R::Value, usize) -> T,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining_upper()))
    }
}

impl<'r, R, T, P> FusedIterator for Cursor<'r, R, T, P>
where
    R: Record + ?Sized,
    P: FnMut(&'r R, &Key, &'r R::Value, usize) -> T,
{
}

impl<'r, R, T, P> Traverse for Cursor<'r, R, T, P>
where
    R: Record + ?Sized,
    P: FnMut(&'r R, &Key, &'r R::Value, usize) -> T,
{
    type Item = T;

    fn next_indexed(&mut self) -> Option<(usize, T)> {
        self.advance_indexed()
    }

    fn halt(&mut self) {
        self.stop();
    }
}

impl<'r, R: ?Sized, T, P> fmt::Debug for Cursor<'r, R, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("keys", &self.keys)
            .field("position", &self.position)
            .field("step", &self.step)
            .field("end_bound", &self.end_bound)
            .field("floor_bound", &self.floor_bound)
            .field("halted", &self.halted)
            .finish()
    }
}
