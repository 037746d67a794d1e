use core::ops::Range;

/// 行内字节区间 (相对于当前行的起点)
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Span start must be <= end");
        Self { start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// 从源码中切出该区间，越界时返回空串
    pub fn slice(self, src: &str) -> &str {
        src.get(self.start..self.end).unwrap_or("")
    }
}

/// let span: Span = (0..10).into();
impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_within_line() {
        let span: Span = (6..9).into();
        assert_eq!(span.len(), 3);
        assert_eq!(span.slice("while (b) {"), "(b)");
        assert_eq!(Span::new(0, 3).slice("int x;"), "int");
        assert_eq!(Span::new(4, 40).slice("int x;"), "");
        assert!(Span::new(3, 3).is_empty());
    }
}
