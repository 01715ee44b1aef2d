/// An iterator that can look at its next item without consuming it.
pub trait Peek: Iterator {
    fn peek(&self) -> Option<Self::Item>;

    /// Consumes items for as long as `pred` holds, returning how many were
    /// consumed.
    fn eat_while(&mut self, mut pred: impl FnMut(&Self::Item) -> bool) -> usize {
        let mut n = 0;
        while self.peek().is_some_and(|item| pred(&item)) {
            self.next();
            n += 1;
        }
        n
    }
}

impl Peek for std::str::Bytes<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.clone().next()
    }
}
