use bytes::Bytes;

#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: TestPayload,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: TestPayload) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: TestPayload) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &TestPayload {
        &self.payload
    }
}

/// A buffer of `buffer_size` bytes with a `[offset, offset + count)` window.
#[derive(Debug, Copy, Clone)]
pub struct TestPayload {
    buffer_size: usize,
    offset: usize,
    count: usize,
}

impl TestPayload {
    pub const fn whole(buffer_size: usize) -> Self {
        Self { buffer_size, offset: 0, count: buffer_size }
    }

    pub const fn window(buffer_size: usize, offset: usize, count: usize) -> Self {
        Self { buffer_size, offset, count }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Fills the buffer with a repeating byte pattern.
    pub fn buffer(&self) -> Bytes {
        (0..self.buffer_size).map(|i| (i % 251) as u8).collect::<Vec<u8>>().into()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}
