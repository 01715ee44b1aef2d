use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;

/// A `Vec` indexed by a typed key instead of `usize`.
pub struct KeyVec<K, V> {
    inner: Vec<V>,
    _phantom: PhantomData<*const K>,
}

impl<K: Key, V> KeyVec<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert(&mut self, value: V) -> K {
        let key = K::from_usize(self.inner.len());
        self.inner.push(value);
        key
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key.as_usize())
    }

    pub fn position(&self, mut pred: impl FnMut(&V) -> bool) -> Option<K> {
        self.inner.iter().position(|v| pred(v)).map(K::from_usize)
    }

    pub fn iter_keyed(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.inner
            .iter()
            .enumerate()
            .map(|(i, v)| (K::from_usize(i), v))
    }
}

impl<K, V> Default for KeyVec<K, V> {
    fn default() -> Self {
        Self {
            inner: vec![],
            _phantom: PhantomData,
        }
    }
}

impl<K, V> Deref for KeyVec<K, V> {
    type Target = [V];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<K: Key + fmt::Debug, V: fmt::Debug> fmt::Debug for KeyVec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter_keyed()).finish()
    }
}

pub trait Key: Copy {
    fn from_usize(n: usize) -> Self;
    fn as_usize(&self) -> usize;
}

#[macro_export]
macro_rules! declare_key_type {
(
    $(#[$attr:meta])*
    $v:vis struct $i:ident;
) => {
    $(#[$attr])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    $v struct $i(pub usize);

    impl $crate::keyvec::Key for $i {
        fn from_usize(n: usize) -> Self {
            Self(n)
        }

        fn as_usize(&self) -> usize {
            self.0
        }
    }
};
}
pub use crate::declare_key_type;

#[cfg(test)]
mod tests {
    use super::KeyVec;

    declare_key_type! { struct Id; }

    #[test]
    fn keys_follow_insertion_order() {
        let mut vec = KeyVec::<Id, &str>::new();
        let a = vec.insert("a");
        let b = vec.insert("b");

        assert_eq!(a, Id(0));
        assert_eq!(b, Id(1));
        assert_eq!(vec.get(b), Some(&"b"));
        assert_eq!(vec.get(Id(2)), None);
        assert_eq!(vec.position(|&v| v == "b"), Some(b));

        let keyed: Vec<_> = vec.iter_keyed().collect();
        assert_eq!(keyed, [(a, &"a"), (b, &"b")]);
    }
}
