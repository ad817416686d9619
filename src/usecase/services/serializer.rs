use std::marker::PhantomData;

/// Per-item transformation applied when a view hands records out.
pub trait Serializer<T> {
    type Output<'a>
    where
        T: 'a;

    fn serialize<'a>(&self, record: &'a T) -> Self::Output<'a>;
}

/// No serializer: records are handed out by reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T> Serializer<T> for Identity {
    type Output<'a>
        = &'a T
    where
        T: 'a;

    fn serialize<'a>(&self, record: &'a T) -> &'a T {
        record
    }
}

/// Serializer backed by a caller closure.
///
/// A closure that panics propagates the panic to whoever read the view. A
/// fallible closure should return `Result` and let the reader collect it.
pub struct MapFn<F, U> {
    map: F,
    _output: PhantomData<fn() -> U>,
}

impl<F, U> MapFn<F, U> {
    pub fn new(map: F) -> Self {
        Self {
            map,
            _output: PhantomData,
        }
    }
}

impl<T, U, F> Serializer<T> for MapFn<F, U>
where
    F: Fn(&T) -> U,
{
    type Output<'a>
        = U
    where
        T: 'a;

    fn serialize<'a>(&self, record: &'a T) -> U {
        (self.map)(record)
    }
}
