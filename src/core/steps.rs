use crate::core::range::{Boundary, Direction, Step};
use crate::domain::instant::Steppable;
use std::iter::FusedIterator;

/// Lazy traversal of a range.
///
/// Each call to `next` computes at most one new point. Only the cursor lives here,
/// so an unbounded traversal runs in constant memory for as long as it is pulled.
#[derive(Debug, Clone)]
pub struct Steps<T> {
    cursor: Option<T>,
    boundary: Option<Boundary<T>>,
    step: Step,
    direction: Direction,
}

impl<T: Steppable> Steps<T> {
    pub(crate) fn new(
        start: T,
        boundary: Option<Boundary<T>>,
        step: Step,
        direction: Direction,
    ) -> Self {
        Self {
            cursor: Some(start),
            boundary,
            step,
            direction,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The point the next call to `next` will consider, if any.
    pub fn peek(&self) -> Option<&T> {
        let cursor = self.cursor.as_ref()?;
        match &self.boundary {
            Some(boundary) if !boundary.admits(cursor, self.direction) => None,
            _ => Some(cursor),
        }
    }

    fn successor(&self, current: &T) -> Option<T> {
        match self.step.apply(current, self.direction) {
            Some(next) if self.direction.advanced(current, &next) => Some(next),
            Some(_) => {
                tracing::warn!("Step {} made no progress, ending range", self.step);
                None
            }
            // 有邊界時代表尚未抵達終點就停止 (溢位或 DST 空隙中的本地時間)
            None if self.boundary.is_some() => {
                tracing::warn!(
                    "Step {} cannot be represented by the instant type, ending range before its boundary",
                    self.step
                );
                None
            }
            None => {
                tracing::debug!("Step {} cannot be represented by the instant type, ending range", self.step);
                None
            }
        }
    }
}

impl<T: Steppable> Iterator for Steps<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let current = self.cursor.take()?;
        if let Some(boundary) = &self.boundary {
            if !boundary.admits(&current, self.direction) {
                tracing::trace!("Range boundary reached");
                return None;
            }
        }
        self.cursor = self.successor(&current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.peek() {
            None => (0, Some(0)),
            Some(_) => (1, None),
        }
    }
}

impl<T: Steppable> FusedIterator for Steps<T> {}
