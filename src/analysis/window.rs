//! Codepoint-granular sliding window over a string.

use crate::analysis::char_class::Codepoint;
use crate::analysis::utf8::{self, Decoded};

/// A `[start, end)` window over an immutable string.
///
/// The window grows at the back and shrinks at the front one codepoint at a
/// time and hands out borrowed sub-slices of the original string, so
/// fragments are produced without copying. The codepoint right after `end`
/// is decoded ahead of time and available through [`peek`](Self::peek).
#[derive(Debug, Clone)]
pub struct SlidingWindow<'a> {
    text: &'a str,
    start: usize,
    end: usize,
    len: usize,
    next: Decoded,
}

impl<'a> SlidingWindow<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut window = SlidingWindow {
            text,
            start: 0,
            end: 0,
            len: 0,
            next: Decoded::END,
        };
        window.prepare_next();
        window
    }

    /// Whether nothing is left behind the window.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.next.is_end()
    }

    /// The codepoint immediately after the window, if any.
    #[inline]
    pub fn peek(&self) -> Option<Codepoint> {
        (!self.next.is_end()).then(|| Codepoint::new(self.next.ch))
    }

    /// Number of codepoints inside the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current window contents.
    #[inline]
    pub fn value(&self) -> &'a str {
        &self.text[self.start..self.end]
    }

    /// Collapse the window onto its end.
    #[inline]
    pub fn clear(&mut self) {
        self.start = self.end;
        self.len = 0;
    }

    /// Extend the window past the next codepoint. Returns `false` at end of
    /// input.
    pub fn grow_back(&mut self) -> bool {
        if self.next.is_end() {
            return false;
        }
        self.end += self.next.len;
        self.len += 1;
        self.prepare_next();
        true
    }

    /// Drop the first codepoint of the window. No-op on an empty window.
    pub fn shrink_front(&mut self) {
        if self.start == self.end {
            return;
        }
        let bytes = &self.text.as_bytes()[self.start..self.end];
        self.start += utf8::decode(bytes, bytes.len()).len;
        self.len -= 1;
    }

    /// Move the whole window forward by one codepoint.
    pub fn shift(&mut self) -> bool {
        self.shrink_front();
        self.grow_back()
    }

    /// Consume codepoints while `pred` holds, then collapse the window.
    pub fn skip<P>(&mut self, mut pred: P)
    where
        P: FnMut(Codepoint) -> bool,
    {
        while self.peek().is_some_and(&mut pred) && self.grow_back() {}
        self.clear();
    }

    /// Emit every `max_len`-sized sub-window of the run of codepoints
    /// accepted by `accepts`, advancing one codepoint at a time. A run
    /// shorter than `max_len` is emitted once as a whole.
    ///
    /// Returns whether anything was emitted. The window is collapsed
    /// afterwards.
    pub fn slide<E, P>(&mut self, max_len: usize, mut emit: E, mut accepts: P) -> bool
    where
        E: FnMut(&'a str),
        P: FnMut(Codepoint) -> bool,
    {
        while self.len < max_len && self.peek().is_some_and(&mut accepts) {
            if !self.grow_back() {
                break;
            }
        }
        if self.is_empty() {
            return false;
        }

        emit(self.value());
        while self.peek().is_some_and(&mut accepts) && self.shift() {
            emit(self.value());
        }

        self.clear();
        true
    }

    fn prepare_next(&mut self) {
        self.next = utf8::decode_str(&self.text[self.end..]);
    }
}
