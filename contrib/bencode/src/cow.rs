use std::borrow::Cow;

/// Converts the key and byte arguments of the construction macros into `Cow<[u8]>`.
///
/// Borrowed inputs stay borrowed and owned inputs stay owned, so
/// `ben_bytes!(vec)` moves the vector instead of copying it.
pub trait BCowConvert<'a> {
    fn convert(self) -> Cow<'a, [u8]>;
}

impl<'a> BCowConvert<'a> for &'a [u8] {
    fn convert(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<'a, const N: usize> BCowConvert<'a> for &'a [u8; N] {
    fn convert(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(&self[..])
    }
}

impl<'a> BCowConvert<'a> for &'a str {
    fn convert(self) -> Cow<'a, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl BCowConvert<'static> for String {
    fn convert(self) -> Cow<'static, [u8]> {
        Cow::Owned(self.into_bytes())
    }
}

impl BCowConvert<'static> for Vec<u8> {
    fn convert(self) -> Cow<'static, [u8]> {
        Cow::Owned(self)
    }
}
