#![forbid(unsafe_code)]

//! Ordered sequences of inline runs.
//!
//! An [`InlineSequence`] owns its runs and exposes the slicing and search
//! primitives line wrapping is built from: snapshot by length, roll back
//! with [`truncate_to`](InlineSequence::truncate_to), scan with
//! [`find_first`](InlineSequence::find_first), and move contiguous runs into
//! another sequence with [`copy_to`](InlineSequence::copy_to).
//!
//! # Whitespace compaction
//!
//! A sequence built with `compact_whitespace = true` measures and renders
//! every whitespace run as a single space. The stored runs are never
//! modified, so compaction is purely a view over the content.

use termdoc_style::Style;

use crate::inline::Inline;
use crate::width::split_whitespace_runs;

/// An owned, ordered collection of [`Inline`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InlineSequence {
    inlines: Vec<Inline>,
    compact_whitespace: bool,
}

impl InlineSequence {
    /// Create an empty sequence.
    #[must_use]
    pub const fn new(compact_whitespace: bool) -> Self {
        Self {
            inlines: Vec::new(),
            compact_whitespace,
        }
    }

    /// Create an empty sequence with the same compaction policy as `self`.
    #[must_use]
    pub const fn empty_like(&self) -> Self {
        Self::new(self.compact_whitespace)
    }

    /// Whether whitespace runs are folded to a single space.
    #[inline]
    #[must_use]
    pub const fn compacts_whitespace(&self) -> bool {
        self.compact_whitespace
    }

    /// Number of runs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inlines.len()
    }

    /// Whether the sequence holds no runs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    /// Run at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Inline> {
        self.inlines.get(index)
    }

    /// Iterate over the runs.
    pub fn iter(&self) -> std::slice::Iter<'_, Inline> {
        self.inlines.iter()
    }

    /// The runs as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Inline] {
        &self.inlines
    }

    /// Append a single run.
    pub fn push(&mut self, inline: Inline) {
        self.inlines.push(inline);
    }

    /// Tokenize `text` into alternating whitespace / non-whitespace runs of
    /// `style` and append them.
    ///
    /// Line wrapping only ever breaks between runs, so this is what makes
    /// whitespace the only break opportunity.
    pub fn add_inlines_for_string(&mut self, text: &str, style: Style) {
        self.inlines.extend(
            split_whitespace_runs(text)
                .into_iter()
                .map(|run| Inline::new(run.to_owned(), style)),
        );
    }

    /// Drop every run from `len` onwards.
    ///
    /// Together with [`len`](Self::len) this is the snapshot / rollback pair
    /// used by tentative line filling.
    pub fn truncate_to(&mut self, len: usize) {
        self.inlines.truncate(len);
    }

    /// Index of the first run at or after `start` matching `predicate`,
    /// or [`len`](Self::len) if there is none.
    #[must_use]
    pub fn find_first(&self, start: usize, predicate: impl Fn(&Inline) -> bool) -> usize {
        self.inlines
            .iter()
            .skip(start)
            .position(predicate)
            .map_or(self.inlines.len().max(start), |offset| start + offset)
    }

    /// Copy runs from `start` into `target` for as long as `predicate` holds.
    ///
    /// Returns the index of the first run that failed the predicate (or
    /// [`len`](Self::len)), which is where the next scan should resume.
    pub fn copy_to(
        &self,
        target: &mut InlineSequence,
        start: usize,
        predicate: impl Fn(&Inline) -> bool,
    ) -> usize {
        let end = self.find_first(start, |inline| !predicate(inline));
        if start < end {
            target.inlines.extend_from_slice(&self.inlines[start..end]);
        }
        end
    }

    /// Width of a single run under this sequence's compaction policy.
    #[inline]
    #[must_use]
    pub fn inline_width(&self, inline: &Inline) -> usize {
        if self.compact_whitespace && inline.is_whitespace() {
            1
        } else {
            inline.visible_width()
        }
    }

    /// Total width of all runs.
    #[must_use]
    pub fn visible_width(&self) -> usize {
        self.inlines.iter().map(|i| self.inline_width(i)).sum()
    }

    /// Width of the widest single run.
    #[must_use]
    pub fn max_inline_length(&self) -> usize {
        self.inlines
            .iter()
            .map(|i| self.inline_width(i))
            .max()
            .unwrap_or(0)
    }

    /// Width of the widest group of adjacent non-whitespace runs.
    ///
    /// Adjacent runs with different styles (`**bold**text`) have no break
    /// opportunity between them, so the group is the unbreakable unit.
    #[must_use]
    pub fn max_word_width(&self) -> usize {
        let mut widest = 0;
        let mut current = 0;
        for inline in &self.inlines {
            if inline.is_whitespace() {
                current = 0;
            } else {
                current += inline.visible_width();
                widest = widest.max(current);
            }
        }
        widest
    }

    /// Append all runs to `out`, folding whitespace when compacting.
    pub fn append_to(&self, out: &mut String, with_styles: bool) {
        for inline in &self.inlines {
            if self.compact_whitespace && inline.is_whitespace() {
                inline.append_text_to(out, " ", with_styles);
            } else {
                inline.append_to(out, with_styles);
            }
        }
    }

    /// The rendered plain text of the sequence.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        self.append_to(&mut out, false);
        out
    }
}

impl<'a> IntoIterator for &'a InlineSequence {
    type Item = &'a Inline;
    type IntoIter = std::slice::Iter<'a, Inline>;

    fn into_iter(self) -> Self::IntoIter {
        self.inlines.iter()
    }
}

impl Extend<Inline> for InlineSequence {
    fn extend<T: IntoIterator<Item = Inline>>(&mut self, iter: T) {
        self.inlines.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str, compact: bool) -> InlineSequence {
        let mut s = InlineSequence::new(compact);
        s.add_inlines_for_string(text, Style::NORMAL);
        s
    }

    #[test]
    fn tokenizes_into_alternating_runs() {
        let s = seq("Hello lovely World!", false);
        let texts: Vec<_> = s.iter().map(Inline::text).collect();
        assert_eq!(texts, vec!["Hello", " ", "lovely", " ", "World!"]);
    }

    #[test]
    fn add_keeps_style() {
        let mut s = InlineSequence::new(false);
        s.add_inlines_for_string("a b", Style::BOLD);
        assert!(s.iter().all(|i| i.style() == Style::BOLD));
    }

    #[test]
    fn compaction_changes_measure_not_content() {
        let loose = seq("a    b", false);
        let compact = seq("a    b", true);
        assert_eq!(loose.visible_width(), 6);
        assert_eq!(compact.visible_width(), 3);
        assert_eq!(compact.get(1).map(Inline::text), Some("    "));
        assert_eq!(compact.to_plain_text(), "a b");
        assert_eq!(loose.to_plain_text(), "a    b");
    }

    #[test]
    fn max_inline_length_respects_compaction() {
        assert_eq!(seq("a      b", false).max_inline_length(), 6);
        assert_eq!(seq("a      b", true).max_inline_length(), 1);
        assert_eq!(InlineSequence::new(true).max_inline_length(), 0);
    }

    #[test]
    fn max_word_width_joins_adjacent_runs() {
        let mut s = InlineSequence::new(true);
        s.push(Inline::styled("bold", Style::BOLD));
        s.push(Inline::raw("text"));
        s.push(Inline::raw(" "));
        s.push(Inline::raw("tiny"));
        assert_eq!(s.max_inline_length(), 4);
        assert_eq!(s.max_word_width(), 8);
    }

    #[test]
    fn find_first_scans_from_start() {
        let s = seq("a b c", false);
        assert_eq!(s.find_first(0, Inline::is_whitespace), 1);
        assert_eq!(s.find_first(2, Inline::is_whitespace), 3);
        assert_eq!(s.find_first(4, Inline::is_whitespace), 5);
        assert_eq!(s.find_first(9, Inline::is_whitespace), 9);
    }

    #[test]
    fn copy_to_stops_at_first_failure() {
        let s = seq("ab  cd", false);
        let mut target = s.empty_like();
        let next = s.copy_to(&mut target, 0, |i| !i.is_whitespace());
        assert_eq!(next, 1);
        assert_eq!(target.to_plain_text(), "ab");

        let next = s.copy_to(&mut target, next, Inline::is_whitespace);
        assert_eq!(next, 2);
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn copy_to_with_no_match_copies_nothing() {
        let s = seq("ab", false);
        let mut target = s.empty_like();
        assert_eq!(s.copy_to(&mut target, 0, Inline::is_whitespace), 0);
        assert!(target.is_empty());
    }

    #[test]
    fn truncate_rolls_back() {
        let mut s = seq("one two", false);
        let snapshot = s.len();
        s.add_inlines_for_string(" three", Style::NORMAL);
        assert_eq!(s.len(), 5);
        s.truncate_to(snapshot);
        assert_eq!(s.to_plain_text(), "one two");
    }

    #[test]
    fn styled_whitespace_compacts_inside_style() {
        let mut s = InlineSequence::new(true);
        s.add_inlines_for_string("a  b", Style::ITALIC);
        let mut out = String::new();
        s.append_to(&mut out, true);
        assert_eq!(out, "\x1b[0;3ma\x1b[0m\x1b[0;3m \x1b[0m\x1b[0;3mb\x1b[0m");
    }
}
