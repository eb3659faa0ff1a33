//! Byte builder for record tests.

/// Little-endian record writer with nested sub-record support.
#[derive(Debug, Default, Clone)]
pub struct RecordBuilder {
    out: Vec<u8>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(&mut self, tag: impl Into<u8>) -> &mut Self {
        self.out.push(tag.into());
        self
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.out.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.out.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.out.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.out.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i32(&mut self, value: i32) -> &mut Self {
        self.out.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f64(&mut self, value: f64) -> &mut Self {
        self.out.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.out.resize(self.out.len() + n, 0);
        self
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.out.extend_from_slice(bytes);
        self
    }

    /// 1-byte length prefixed Latin-1 string.
    pub fn pascal(&mut self, text: &[u8]) -> &mut Self {
        self.out.push(text.len() as u8);
        self.out.extend_from_slice(text);
        self
    }

    /// UTF-16LE text padded with NULs to `size` bytes.
    pub fn utf16_fixed(&mut self, text: &str, size: usize) -> &mut Self {
        let start = self.out.len();
        for unit in text.encode_utf16() {
            self.out.extend_from_slice(&unit.to_le_bytes());
        }
        self.out.resize(start + size, 0);
        self
    }

    /// `u32` length, text, trailing NUL.
    pub fn properties(&mut self, text: &str) -> &mut Self {
        self.out
            .extend_from_slice(&(text.len() as u32 + 1).to_le_bytes());
        self.out.extend_from_slice(text.as_bytes());
        self.out.push(0);
        self
    }

    /// `u32` length followed by whatever `body` writes.
    pub fn subrecord<F: FnOnce(&mut RecordBuilder)>(&mut self, body: F) -> &mut Self {
        let mut inner = RecordBuilder::new();
        body(&mut inner);
        self.out
            .extend_from_slice(&(inner.out.len() as u32).to_le_bytes());
        self.out.extend(inner.out);
        self
    }

    /// Sub-record of `length` zero bytes.
    pub fn empty_subrecord(&mut self, length: usize) -> &mut Self {
        self.subrecord(|b| {
            b.zeros(length);
        })
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn build(&self) -> Vec<u8> {
        self.out.clone()
    }
}
