use std::ops::Range;

/// One page of an ordered result set.
///
/// Pages are 1-indexed. The window of page `n` is
/// `[(n-1)*size, (n-1)*size + size)`, clamped to the length of the result.
/// Pages below 1 select nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
    size: usize,
}

impl Page {
    pub const FIRST: i64 = 1;

    pub fn new(number: i64, size: usize) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Parse a `page` query parameter, falling back to the first page when it
    /// is absent or not an integer.
    pub fn from_param(param: Option<&str>, size: usize) -> Self {
        let number = param
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(Self::FIRST);
        Self::new(number, size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Unclamped `[start, end)` window for this page
    pub fn window(&self) -> Range<usize> {
        if self.number < Self::FIRST {
            return 0..0;
        }
        let index = usize::try_from(self.number - 1).unwrap_or(usize::MAX);
        let start = index.saturating_mul(self.size);
        start..start.saturating_add(self.size)
    }

    /// Take this page's items out of `items`
    pub fn take<T>(&self, items: Vec<T>) -> Vec<T> {
        let Range { start, end } = self.window();
        items.into_iter().skip(start).take(end - start).collect()
    }
}
